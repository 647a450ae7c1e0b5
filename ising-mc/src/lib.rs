//! Ising-type bit lattices under a pairwise-coupling Hamiltonian with a local
//! field: exact enumeration of all `2^N` configurations for small systems and
//! sequential single-site Metropolis sampling for larger ones.
//!
//! Typical use: build a [`CouplingGraph`], wrap it in a [`HamiltonianModel`],
//! then either call [`ExactEnumerator::compute_averages`] or drive a
//! [`BitConfiguration`] with [`run_chain`].

pub mod config;
pub mod coupling;
pub mod error;
pub mod exact;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

pub use config::{ChainConfig, SweepMode};
pub use coupling::{Bond, CouplingGraph};
pub use error::{IsingError, Result};
pub use exact::{ExactAverages, ExactEnumerator, MAX_EXACT_SITES};
pub use mcmc::MetropolisSampler;
pub use simulation::{run_chain, Chain};
pub use spins::{BitConfiguration, HamiltonianModel};
pub use statistics::{AutocorrelationTimes, ChainResult};
