use crate::error::{check_temperature, IsingError, Result};
use crate::spins::{BitConfiguration, HamiltonianModel};

/// Largest lattice accepted for exact enumeration.
///
/// Cost grows as `2^N`; around N = 20 a run already takes on the order of a
/// second. Boltzmann weights are summed directly, so at low temperature and
/// large |E| they may overflow to `inf` or underflow to zero, which shows up as
/// `inf`/`NaN` averages.
pub const MAX_EXACT_SITES: usize = 30;

/// Thermodynamic averages over the full Boltzmann distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactAverages {
    /// ⟨E⟩
    pub energy: f64,
    /// ⟨M⟩, M being the sum of ±1 spins.
    pub magnetization: f64,
    /// (⟨E²⟩ − ⟨E⟩²) / T²
    pub heat_capacity: f64,
    /// (⟨M²⟩ − ⟨M⟩²) / T
    pub susceptibility: f64,
    /// Z = Σ exp(−E/T)
    pub partition_function: f64,
}

/// Brute-force sum over all `2^N` configurations.
#[derive(Debug, Clone, Copy)]
pub struct ExactEnumerator<'m> {
    model: &'m HamiltonianModel,
}

impl<'m> ExactEnumerator<'m> {
    pub fn new(model: &'m HamiltonianModel) -> Self {
        Self { model }
    }

    /// Enumerate every configuration by integer encoding, using `conf` as the
    /// scratch configuration. `conf` holds its original bits again on return.
    pub fn compute_averages(
        &self,
        conf: &mut BitConfiguration,
        temperature: f64,
    ) -> Result<ExactAverages> {
        self.model.check_size(conf)?;
        check_temperature(temperature)?;
        let n_sites = conf.len();
        if n_sites > MAX_EXACT_SITES {
            return Err(IsingError::TooManySites {
                n_sites,
                max: MAX_EXACT_SITES,
            });
        }
        let n_states = conf.n_states()?;
        tracing::debug!(n_sites, n_states, temperature, "exact enumeration");

        let saved = conf.to_int()?;

        let mut z = 0.0;
        let mut e = 0.0;
        let mut ee = 0.0;
        let mut m = 0.0;
        let mut mm = 0.0;

        for k in 0..n_states {
            conf.write_int(k);
            let ei = self.model.energy_unchecked(conf.bits());
            let zi = (-ei / temperature).exp();
            let mi = conf.magnetization() as f64;
            z += zi;
            e += ei * zi;
            ee += ei * ei * zi;
            m += mi * zi;
            mm += mi * mi * zi;
        }

        conf.write_int(saved);

        e /= z;
        m /= z;
        ee /= z;
        mm /= z;

        Ok(ExactAverages {
            energy: e,
            magnetization: m,
            heat_capacity: (ee - e * e) / (temperature * temperature),
            susceptibility: (mm - m * m) / temperature,
            partition_function: z,
        })
    }
}
