pub mod sampler;
pub mod sweep;

pub use sampler::MetropolisSampler;
