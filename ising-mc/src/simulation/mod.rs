pub mod chain;

pub use chain::Chain;

use rand::Rng;

use crate::config::ChainConfig;
use crate::mcmc::MetropolisSampler;
use crate::spins::{BitConfiguration, HamiltonianModel};
use crate::statistics::{sokal_tau, AutocorrAccum, AutocorrelationTimes, ChainResult, RunningMean};
use crate::Result;

/// Run a full chain (burn-in + measurement) on `conf` in place.
///
/// Every sweep visits each site once in ascending order. After each sweep
/// past `burn_in_sweeps`, the instantaneous energy and magnetization update
/// cumulative means of E, M, E² and M², and the current means are appended to
/// the output sequences, which end up `n_sweeps - burn_in_sweeps` long.
///
/// `on_sweep` is called once per sweep (useful for progress bars).
pub fn run_chain<R: Rng + ?Sized>(
    model: &HamiltonianModel,
    conf: &mut BitConfiguration,
    rng: &mut R,
    config: &ChainConfig,
    on_sweep: &dyn Fn(),
) -> Result<ChainResult> {
    config.check()?;
    model.check_size(conf)?;

    let n_sites = conf.len();
    let n_sweeps = config.n_sweeps;
    let burn_in = config.burn_in_sweeps;
    let temperature = config.temperature;
    let n_recorded = config.recorded_sweeps();
    let sampler = MetropolisSampler::with_mode(model, config.sweep_mode);

    tracing::debug!(
        n_sites,
        n_sweeps,
        burn_in,
        temperature,
        mode = ?config.sweep_mode,
        "starting chain"
    );

    let mut energy_stat = RunningMean::new(1);
    let mut energy2_stat = RunningMean::new(2);
    let mut mag_stat = RunningMean::new(1);
    let mut mag2_stat = RunningMean::new(2);

    let mut energy = Vec::with_capacity(n_recorded);
    let mut energy2 = Vec::with_capacity(n_recorded);
    let mut magnetization = Vec::with_capacity(n_recorded);
    let mut magnetization2 = Vec::with_capacity(n_recorded);

    let ac_max_lag = config
        .autocorrelation_max_lag
        .map(|k| k.min(n_recorded / 4).max(1));
    let mut e_accum = ac_max_lag.map(AutocorrAccum::new);
    let mut m_accum = ac_max_lag.map(AutocorrAccum::new);

    let mut accepted = 0usize;

    for sweep_id in 0..n_sweeps {
        on_sweep();
        accepted += sampler.sweep(conf, temperature, rng)?;

        if sweep_id < burn_in {
            continue;
        }

        let e = model.energy_unchecked(conf.bits());
        let m = conf.magnetization() as f64;

        energy_stat.update(e);
        energy2_stat.update(e);
        mag_stat.update(m);
        mag2_stat.update(m);

        energy.push(energy_stat.average());
        energy2.push(energy2_stat.average());
        magnetization.push(mag_stat.average());
        magnetization2.push(mag2_stat.average());

        if let Some(ref mut acc) = e_accum {
            acc.push(e);
        }
        if let Some(ref mut acc) = m_accum {
            acc.push(m);
        }
    }

    let ac_recorded = e_accum.as_ref().map_or(0, AutocorrAccum::n_recorded);
    let autocorrelation = match (e_accum, m_accum) {
        (Some(e_acc), Some(m_acc)) => Some(AutocorrelationTimes {
            energy: sokal_tau(&e_acc.finish()),
            magnetization: sokal_tau(&m_acc.finish()),
        }),
        _ => None,
    };

    let attempted = n_sweeps * n_sites;
    let acceptance_rate = if attempted > 0 {
        accepted as f64 / attempted as f64
    } else {
        0.0
    };

    tracing::debug!(
        energy = energy_stat.average(),
        magnetization = mag_stat.average(),
        acceptance_rate,
        ac_recorded,
        "chain finished"
    );

    Ok(ChainResult {
        temperature,
        energy,
        magnetization,
        energy2,
        magnetization2,
        acceptance_rate,
        autocorrelation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SweepMode;
    use crate::coupling::CouplingGraph;
    use crate::error::IsingError;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use std::cell::Cell;

    fn ring_model(n: usize, j: f64, mu: f64) -> HamiltonianModel {
        let couplings: Vec<Vec<(usize, f64)>> = (0..n)
            .map(|i| vec![((i + 1) % n, j), ((i + n - 1) % n, j)])
            .collect();
        HamiltonianModel::new(CouplingGraph::new(&couplings, vec![mu; n]).unwrap())
    }

    #[test]
    fn test_output_lengths_and_callback() {
        let model = ring_model(6, 1.0, 0.1);
        let mut conf = BitConfiguration::zeros(6);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let calls = Cell::new(0usize);
        let config = ChainConfig::new(2.0, 30, 10);
        let result = run_chain(&model, &mut conf, &mut rng, &config, &|| {
            calls.set(calls.get() + 1)
        })
        .unwrap();

        assert_eq!(calls.get(), 30);
        assert_eq!(result.energy.len(), 20);
        assert_eq!(result.energy2.len(), 20);
        assert_eq!(result.magnetization.len(), 20);
        assert_eq!(result.magnetization2.len(), 20);
        assert!(result.autocorrelation.is_none());
        assert!((0.0..=1.0).contains(&result.acceptance_rate));
    }

    #[test]
    fn test_running_means_match_replay() {
        // Replaying the same stream sweep by sweep must give the same averages.
        let model = ring_model(8, 1.0, 0.1);
        let config = ChainConfig::new(1.5, 40, 15);

        let mut conf = BitConfiguration::zeros(8);
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let result = run_chain(&model, &mut conf, &mut rng, &config, &|| {}).unwrap();

        let sampler = MetropolisSampler::new(&model);
        let mut replay = BitConfiguration::zeros(8);
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let mut energies = Vec::new();
        let mut mags = Vec::new();
        for sweep_id in 0..40 {
            sampler.sweep(&mut replay, 1.5, &mut rng).unwrap();
            if sweep_id >= 15 {
                energies.push(model.energy(&replay).unwrap());
                mags.push(replay.magnetization() as f64);
            }
        }

        assert_eq!(replay, conf);
        for k in 0..energies.len() {
            let n = (k + 1) as f64;
            let e: f64 = energies[..=k].iter().sum::<f64>() / n;
            let ee: f64 = energies[..=k].iter().map(|v| v * v).sum::<f64>() / n;
            let m: f64 = mags[..=k].iter().sum::<f64>() / n;
            let mm: f64 = mags[..=k].iter().map(|v| v * v).sum::<f64>() / n;
            assert_abs_diff_eq!(result.energy[k], e, epsilon = 1e-9);
            assert_abs_diff_eq!(result.energy2[k], ee, epsilon = 1e-9);
            assert_abs_diff_eq!(result.magnetization[k], m, epsilon = 1e-9);
            assert_abs_diff_eq!(result.magnetization2[k], mm, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_autocorrelation_tracking() {
        let model = ring_model(12, 1.0, 0.0);
        let mut chain = Chain::new(BitConfiguration::zeros(12), 5);
        let config = ChainConfig::new(2.0, 4000, 200)
            .with_sweep_mode(SweepMode::HeatBath)
            .with_autocorrelation(50);
        let result = chain.run(&model, &config).unwrap();
        let tau = result.autocorrelation.unwrap();
        assert!(tau.energy >= 0.0 && tau.energy.is_finite());
        assert!(tau.magnetization >= 0.0 && tau.magnetization.is_finite());
    }

    #[test]
    fn test_rejects_invalid_input() {
        let model = ring_model(4, 1.0, 0.0);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut conf = BitConfiguration::zeros(4);

        let bad = ChainConfig::new(2.0, 10, 10);
        assert!(matches!(
            run_chain(&model, &mut conf, &mut rng, &bad, &|| {}),
            Err(IsingError::InvalidConfig(_))
        ));

        let mut wrong = BitConfiguration::zeros(3);
        assert!(matches!(
            run_chain(&model, &mut wrong, &mut rng, &ChainConfig::new(2.0, 10, 0), &|| {}),
            Err(IsingError::SizeMismatch { .. })
        ));
    }
}
