pub mod autocorrelation;
pub mod results;
mod running;

pub use autocorrelation::{sokal_tau, AutocorrAccum};
pub use results::{AutocorrelationTimes, ChainResult};
pub use running::RunningMean;
