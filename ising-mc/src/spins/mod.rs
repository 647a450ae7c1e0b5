pub mod bitstring;
pub mod energy;

pub use bitstring::{BitConfiguration, MAX_ENCODED_SITES};
pub use energy::HamiltonianModel;
