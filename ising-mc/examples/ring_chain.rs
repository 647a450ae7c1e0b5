use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use ising_mc::{
    run_chain, BitConfiguration, ChainConfig, CouplingGraph, ExactEnumerator, HamiltonianModel,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing_subscriber::EnvFilter;

const N_EXACT: usize = 10;
const N_SAMPLED: usize = 20;
const COUPLING: f64 = 1.0;
const FIELD: f64 = 0.1;
const TEMPERATURE: f64 = 2.0;
const N_SWEEPS: usize = 8000;
const BURN_IN: usize = 1000;
const SEED: u64 = 2;

fn ring(n: usize) -> ising_mc::Result<HamiltonianModel> {
    let couplings: Vec<Vec<(usize, f64)>> = (0..n)
        .map(|i| vec![((i + 1) % n, COUPLING), ((i + n - 1) % n, COUPLING)])
        .collect();
    Ok(HamiltonianModel::new(CouplingGraph::new(
        &couplings,
        vec![FIELD; n],
    )?))
}

fn main() -> ising_mc::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model = ring(N_EXACT)?;
    let t0 = Instant::now();
    let exact = ExactEnumerator::new(&model)
        .compute_averages(&mut BitConfiguration::zeros(N_EXACT), TEMPERATURE)?;
    println!(
        "Exact   N={N_EXACT:<3} T={TEMPERATURE}  |  ({:.3} s)",
        t0.elapsed().as_secs_f64()
    );
    println!("     E:  {:12.8}", exact.energy);
    println!("     M:  {:12.8}", exact.magnetization);
    println!("     HC: {:12.8}", exact.heat_capacity);
    println!("     MS: {:12.8}", exact.susceptibility);
    println!("{}", "-".repeat(50));

    let model = ring(N_SAMPLED)?;
    let config = ChainConfig::new(TEMPERATURE, N_SWEEPS, BURN_IN);
    let mut conf = BitConfiguration::zeros(N_SAMPLED);
    let mut rng = Xoshiro256StarStar::seed_from_u64(SEED);

    let pb = ProgressBar::new(N_SWEEPS as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> "),
    );
    pb.set_message("sweeps");

    let t0 = Instant::now();
    let result = run_chain(&model, &mut conf, &mut rng, &config, &|| pb.inc(1))?;
    pb.finish();

    println!(
        "Sampled N={N_SAMPLED:<3} T={TEMPERATURE}  |  {N_SWEEPS} sweeps, {BURN_IN} burn-in  |  ({:.3} s)",
        t0.elapsed().as_secs_f64()
    );
    println!("     E:  {:12.8}", result.final_energy().unwrap_or(f64::NAN));
    println!("     M:  {:12.8}", result.final_magnetization().unwrap_or(f64::NAN));
    println!("     HC: {:12.8}", result.heat_capacity().unwrap_or(f64::NAN));
    println!("     MS: {:12.8}", result.susceptibility().unwrap_or(f64::NAN));
    println!("     acceptance: {:.3}", result.acceptance_rate);
    println!("     final: {conf}");
    Ok(())
}
