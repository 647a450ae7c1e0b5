//! Error types for ising-mc.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    #[error("site index {index} out of range for {len} sites")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("magnetization target {target} outside [0, {len}]")]
    InvalidMagnetizationTarget { target: usize, len: usize },

    #[error("value {value} does not fit in {digits} bits")]
    InvalidEncodingWidth { value: u64, digits: usize },

    #[error("{len} sites cannot be encoded in a 64-bit integer")]
    EncodingTooWide { len: usize },

    #[error("bit {index} has value {value}, expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },

    #[error("site {site} lists neighbor {neighbor}, but there are only {n_sites} sites")]
    NeighborOutOfRange {
        site: usize,
        neighbor: usize,
        n_sites: usize,
    },

    #[error("site {site} is coupled to itself")]
    SelfCoupling { site: usize },

    #[error("{fields} field strengths given for {sites} sites")]
    FieldLengthMismatch { sites: usize, fields: usize },

    #[error("configuration has {actual} sites, model expects {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("temperature must be finite and positive, got {0}")]
    InvalidTemperature(f64),

    #[error("exact enumeration over {n_sites} sites exceeds the limit of {max}")]
    TooManySites { n_sites: usize, max: usize },

    #[error("invalid chain configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown sweep mode '{0}', expected 'metropolis' or 'heat-bath'")]
    UnknownSweepMode(String),
}

pub type Result<T> = std::result::Result<T, IsingError>;

/// Reject temperatures that would make `exp(-dE / T)` meaningless.
pub(crate) fn check_temperature(temperature: f64) -> Result<()> {
    if temperature.is_finite() && temperature > 0.0 {
        Ok(())
    } else {
        Err(IsingError::InvalidTemperature(temperature))
    }
}
