use rand::Rng;

use crate::config::SweepMode;
use crate::error::Result;
use crate::mcmc::sweep::{heat_bath_sweep, metropolis_sweep};
use crate::spins::{BitConfiguration, HamiltonianModel};

/// Sweeps a configuration under one model with a fixed acceptance rule.
#[derive(Debug, Clone, Copy)]
pub struct MetropolisSampler<'m> {
    model: &'m HamiltonianModel,
    mode: SweepMode,
}

impl<'m> MetropolisSampler<'m> {
    pub fn new(model: &'m HamiltonianModel) -> Self {
        Self::with_mode(model, SweepMode::Metropolis)
    }

    pub fn with_mode(model: &'m HamiltonianModel, mode: SweepMode) -> Self {
        Self { model, mode }
    }

    pub fn model(&self) -> &'m HamiltonianModel {
        self.model
    }

    pub fn mode(&self) -> SweepMode {
        self.mode
    }

    /// One trial flip per site, in ascending order, mutating `conf` in place.
    ///
    /// Returns the number of accepted flips. On error `conf` is untouched.
    pub fn sweep<R: Rng + ?Sized>(
        &self,
        conf: &mut BitConfiguration,
        temperature: f64,
        rng: &mut R,
    ) -> Result<usize> {
        match self.mode {
            SweepMode::Metropolis => metropolis_sweep(self.model, conf, temperature, rng),
            SweepMode::HeatBath => heat_bath_sweep(self.model, conf, temperature, rng),
        }
    }
}
