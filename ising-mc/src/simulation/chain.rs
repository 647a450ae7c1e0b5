use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::ChainConfig;
use crate::error::Result;
use crate::spins::{BitConfiguration, HamiltonianModel};
use crate::statistics::ChainResult;

/// Mutable state of one Markov chain: the evolving configuration and the
/// random stream that drives it.
///
/// Each chain owns both exclusively; several chains may share one
/// [`HamiltonianModel`] read-only.
#[derive(Debug, Clone)]
pub struct Chain {
    pub conf: BitConfiguration,
    pub rng: Xoshiro256StarStar,
}

impl Chain {
    pub fn new(conf: BitConfiguration, seed: u64) -> Self {
        Self {
            conf,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Start from `n_on` randomly placed 1-bits, drawn from the chain's own
    /// stream so the whole run is fixed by `seed`.
    pub fn with_magnetization(n_sites: usize, n_on: usize, seed: u64) -> Result<Self> {
        let mut chain = Self::new(BitConfiguration::zeros(n_sites), seed);
        chain.conf.set_magnetization(n_on, &mut chain.rng)?;
        Ok(chain)
    }

    pub fn run(&mut self, model: &HamiltonianModel, config: &ChainConfig) -> Result<ChainResult> {
        super::run_chain(model, &mut self.conf, &mut self.rng, config, &|| {})
    }
}
