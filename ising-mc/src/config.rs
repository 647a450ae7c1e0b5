use validator::{Validate, ValidationError};

use crate::error::IsingError;

/// Single-site acceptance rule used during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// Accept if `dE <= 0`, otherwise with probability `exp(-dE / T)`.
    #[default]
    Metropolis,
    /// Glauber acceptance: probability `1 / (1 + exp(dE / T))`.
    HeatBath,
}

impl TryFrom<&str> for SweepMode {
    type Error = IsingError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "metropolis" => Ok(Self::Metropolis),
            "heat-bath" | "heatbath" | "gibbs" => Ok(Self::HeatBath),
            _ => Err(IsingError::UnknownSweepMode(s.to_string())),
        }
    }
}

fn validate_chain_config(cfg: &ChainConfig) -> Result<(), ValidationError> {
    if !(cfg.temperature.is_finite() && cfg.temperature > 0.0) {
        return Err(ValidationError::new(
            "temperature must be finite and positive",
        ));
    }
    if cfg.n_sweeps < 1 {
        return Err(ValidationError::new("n_sweeps must be >= 1"));
    }
    if cfg.burn_in_sweeps >= cfg.n_sweeps {
        return Err(ValidationError::new("burn_in_sweeps must be < n_sweeps"));
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new(
            "autocorrelation_max_lag must be >= 1",
        ));
    }
    Ok(())
}

/// Parameters of one Markov chain run.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_chain_config"))]
pub struct ChainConfig {
    pub temperature: f64,
    /// Total sweeps, burn-in included.
    pub n_sweeps: usize,
    /// Leading sweeps discarded before statistics are recorded.
    pub burn_in_sweeps: usize,
    pub sweep_mode: SweepMode,
    /// Track the integrated autocorrelation time of E and M up to this lag.
    pub autocorrelation_max_lag: Option<usize>,
}

impl ChainConfig {
    pub fn new(temperature: f64, n_sweeps: usize, burn_in_sweeps: usize) -> Self {
        Self {
            temperature,
            n_sweeps,
            burn_in_sweeps,
            sweep_mode: SweepMode::Metropolis,
            autocorrelation_max_lag: None,
        }
    }

    pub fn with_sweep_mode(mut self, sweep_mode: SweepMode) -> Self {
        self.sweep_mode = sweep_mode;
        self
    }

    pub fn with_autocorrelation(mut self, max_lag: usize) -> Self {
        self.autocorrelation_max_lag = Some(max_lag);
        self
    }

    /// Number of sweeps that contribute to the running averages.
    pub fn recorded_sweeps(&self) -> usize {
        self.n_sweeps.saturating_sub(self.burn_in_sweeps)
    }

    pub(crate) fn check(&self) -> crate::Result<()> {
        self.validate()
            .map_err(|e| IsingError::InvalidConfig(format!("{e}")))
    }
}
