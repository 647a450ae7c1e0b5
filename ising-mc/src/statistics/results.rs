/// Running averages recorded by a chain, one entry per post-burn-in sweep.
///
/// Element `k` of each sequence is the mean over the first `k + 1` recorded
/// sweeps, so the last element is the converged estimate. Energies are totals,
/// magnetization is the sum of ±1 spins.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainResult {
    pub temperature: f64,
    /// ⟨E⟩
    pub energy: Vec<f64>,
    /// ⟨M⟩
    pub magnetization: Vec<f64>,
    /// ⟨E²⟩
    pub energy2: Vec<f64>,
    /// ⟨M²⟩
    pub magnetization2: Vec<f64>,
    /// Accepted flips over attempted flips, burn-in included.
    pub acceptance_rate: f64,
    /// Integrated autocorrelation times in sweeps, when tracking was requested.
    pub autocorrelation: Option<AutocorrelationTimes>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutocorrelationTimes {
    pub energy: f64,
    pub magnetization: f64,
}

impl ChainResult {
    pub fn n_recorded(&self) -> usize {
        self.energy.len()
    }

    pub fn final_energy(&self) -> Option<f64> {
        self.energy.last().copied()
    }

    pub fn final_magnetization(&self) -> Option<f64> {
        self.magnetization.last().copied()
    }

    /// (⟨E²⟩ − ⟨E⟩²) / T² from the final estimates.
    pub fn heat_capacity(&self) -> Option<f64> {
        let e = self.energy.last()?;
        let ee = self.energy2.last()?;
        let t = self.temperature;
        Some((ee - e * e) / (t * t))
    }

    /// (⟨M²⟩ − ⟨M⟩²) / T from the final estimates.
    pub fn susceptibility(&self) -> Option<f64> {
        let m = self.magnetization.last()?;
        let mm = self.magnetization2.last()?;
        Some((mm - m * m) / self.temperature)
    }
}
