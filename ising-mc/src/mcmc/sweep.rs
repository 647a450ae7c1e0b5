use rand::Rng;

use crate::error::{check_temperature, Result};
use crate::spins::{BitConfiguration, HamiltonianModel};

/// Sequential single-site sweep with a generic acceptance rule.
///
/// Sites are visited in ascending order and accepted flips are applied at once,
/// so later sites see the partially updated configuration.
/// `accept_fn(rng, delta_e, temp)` decides each trial flip.
/// Returns the number of accepted flips.
fn sweep_generic<R: Rng + ?Sized>(
    model: &HamiltonianModel,
    conf: &mut BitConfiguration,
    temperature: f64,
    rng: &mut R,
    accept_fn: impl Fn(&mut R, f64, f64) -> bool,
) -> Result<usize> {
    model.check_size(conf)?;
    check_temperature(temperature)?;

    let mut accepted = 0;
    for i in 0..conf.len() {
        let delta_e = model.delta_energy_unchecked(i, conf.bits());
        if accept_fn(rng, delta_e, temperature) {
            conf.flip_unchecked(i);
            accepted += 1;
        }
    }
    Ok(accepted)
}

/// Metropolis acceptance: downhill moves always, uphill with `exp(-dE / T)`.
///
/// No random number is drawn for a downhill move.
#[inline]
pub fn metropolis_accept<R: Rng + ?Sized>(rng: &mut R, delta_e: f64, temp: f64) -> bool {
    if delta_e <= 0.0 {
        return true;
    }
    rng.gen::<f64>() <= (-delta_e / temp).exp()
}

/// Heat-bath acceptance: `1 / (1 + exp(dE / T))`, one draw per trial.
#[inline]
pub fn heat_bath_accept<R: Rng + ?Sized>(rng: &mut R, delta_e: f64, temp: f64) -> bool {
    let p = 1.0 / (1.0 + (delta_e / temp).exp());
    rng.gen::<f64>() < p
}

/// One Metropolis sweep over all sites.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_sweep<R: Rng + ?Sized>(
    model: &HamiltonianModel,
    conf: &mut BitConfiguration,
    temperature: f64,
    rng: &mut R,
) -> Result<usize> {
    sweep_generic(model, conf, temperature, rng, metropolis_accept::<R>)
}

/// One heat-bath sweep over all sites.
#[cfg_attr(feature = "profile", inline(never))]
pub fn heat_bath_sweep<R: Rng + ?Sized>(
    model: &HamiltonianModel,
    conf: &mut BitConfiguration,
    temperature: f64,
    rng: &mut R,
) -> Result<usize> {
    sweep_generic(model, conf, temperature, rng, heat_bath_accept::<R>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::CouplingGraph;
    use crate::error::IsingError;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn ring_model(n: usize, j: f64, mu: f64) -> HamiltonianModel {
        let couplings: Vec<Vec<(usize, f64)>> = (0..n)
            .map(|i| vec![((i + 1) % n, j), ((i + n - 1) % n, j)])
            .collect();
        HamiltonianModel::new(CouplingGraph::new(&couplings, vec![mu; n]).unwrap())
    }

    #[test]
    fn test_downhill_always_accepted() {
        // StepRng(u64::MAX, 0) yields the largest possible uniform draw.
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(metropolis_accept(&mut rng, 0.0, 0.5));
        assert!(metropolis_accept(&mut rng, -3.0, 0.5));
        assert!(!metropolis_accept(&mut rng, 50.0, 0.5));
    }

    #[test]
    fn test_downhill_draws_nothing() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let mut untouched = rng.clone();
        for _ in 0..10 {
            assert!(metropolis_accept(&mut rng, -1.0, 1.0));
        }
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_strong_field_aligns_ring() {
        // Ferromagnetic ring (J < 0 favors equal bits) in a field favoring 1.
        // The cheapest uphill move costs 2.2, so at T = 0.1 none gets through.
        let model = ring_model(10, -1.0, -1.1);
        let mut rng = Xoshiro256StarStar::seed_from_u64(2);
        let mut conf = BitConfiguration::from_bits(&[1, 1, 1, 0, 0, 0, 0, 1, 1, 0]).unwrap();
        metropolis_sweep(&model, &mut conf, 0.1, &mut rng).unwrap();
        assert_eq!(conf.on_count(), 10);
    }

    #[test]
    fn test_sequential_update_order() {
        // Antiferromagnetic bonds (J > 0 favors unequal bits) on an open chain
        // with a field pulling every site to 1. At T -> 0 only downhill moves
        // pass, and site 1 must see the flip already made at site 0.
        let couplings: Vec<Vec<(usize, f64)>> =
            vec![vec![(1, 1.0)], vec![(0, 1.0), (2, 1.0)], vec![(1, 1.0)]];
        let model = HamiltonianModel::new(CouplingGraph::new(&couplings, vec![-0.1; 3]).unwrap());
        let mut conf = BitConfiguration::zeros(3);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let accepted = metropolis_sweep(&model, &mut conf, 1e-9, &mut rng).unwrap();
        // site 0: dE = 2 * (-1 - 0.1) < 0, flips.
        // site 1 sees (1, 0): dE = 2 * (1 - 1 - 0.1) < 0, flips.
        // site 2 sees 1: dE = 2 * (1 - 0.1) > 0, stays.
        assert_eq!(conf.bits(), &[1, 1, 0]);
        assert_eq!(accepted, 2);
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let model = ring_model(16, 1.0, 0.1);
        let run = |seed| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
            let mut conf = BitConfiguration::zeros(16);
            for _ in 0..50 {
                heat_bath_sweep(&model, &mut conf, 2.0, &mut rng).unwrap();
            }
            conf
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_sweep_rejects_bad_input() {
        let model = ring_model(4, 1.0, 0.0);
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        let mut conf = BitConfiguration::zeros(5);
        assert!(matches!(
            metropolis_sweep(&model, &mut conf, 1.0, &mut rng),
            Err(IsingError::SizeMismatch { .. })
        ));
        let mut conf = BitConfiguration::zeros(4);
        assert_eq!(
            metropolis_sweep(&model, &mut conf, -1.0, &mut rng),
            Err(IsingError::InvalidTemperature(-1.0))
        );
    }
}
