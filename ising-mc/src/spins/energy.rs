use crate::coupling::CouplingGraph;
use crate::error::{IsingError, Result};
use crate::spins::BitConfiguration;

/// Pairwise-coupling Hamiltonian with a local field:
///
/// `E = sum_{i<j} J_ij s_i s_j + sum_i mu_i s_i`, with `s = 2 * bit - 1`.
///
/// Only the field strengths can change after construction, and only as a whole.
#[derive(Debug, Clone)]
pub struct HamiltonianModel {
    graph: CouplingGraph,
}

impl HamiltonianModel {
    pub fn new(graph: CouplingGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &CouplingGraph {
        &self.graph
    }

    pub fn n_sites(&self) -> usize {
        self.graph.n_sites()
    }

    pub fn field(&self) -> &[f64] {
        self.graph.fields()
    }

    /// Replace every field strength at once.
    pub fn set_field(&mut self, field: Vec<f64>) -> Result<()> {
        self.graph.replace_fields(field)
    }

    pub(crate) fn check_size(&self, conf: &BitConfiguration) -> Result<()> {
        if conf.len() != self.n_sites() {
            return Err(IsingError::SizeMismatch {
                expected: self.n_sites(),
                actual: conf.len(),
            });
        }
        Ok(())
    }

    /// Total energy, counting each listed pair once from its lower index.
    pub fn energy(&self, conf: &BitConfiguration) -> Result<f64> {
        self.check_size(conf)?;
        Ok(self.energy_unchecked(conf.bits()))
    }

    #[inline]
    pub(crate) fn energy_unchecked(&self, bits: &[u8]) -> f64 {
        let mut e = 0.0;
        for (i, &bi) in bits.iter().enumerate() {
            for (&j, &c) in self.graph.neighbors(i).iter().zip(self.graph.strengths(i)) {
                if j < i {
                    continue;
                }
                if bi == bits[j] {
                    e += c;
                } else {
                    e -= c;
                }
            }
        }
        for (&mu, &bi) in self.graph.fields().iter().zip(bits) {
            e += mu * (2.0 * f64::from(bi) - 1.0);
        }
        e
    }

    /// Energy change from flipping site `i`, without mutating `conf`.
    ///
    /// Sums over every listed neighbor of `i` regardless of index order.
    pub fn delta_energy_for_flip(&self, i: usize, conf: &BitConfiguration) -> Result<f64> {
        self.check_size(conf)?;
        if i >= conf.len() {
            return Err(IsingError::IndexOutOfRange {
                index: i,
                len: conf.len(),
            });
        }
        Ok(self.delta_energy_unchecked(i, conf.bits()))
    }

    #[inline]
    pub(crate) fn delta_energy_unchecked(&self, i: usize, bits: &[u8]) -> f64 {
        let delta_spin = if bits[i] == 1 { -2.0 } else { 2.0 };
        let mut h = 0.0;
        for (&j, &c) in self.graph.neighbors(i).iter().zip(self.graph.strengths(i)) {
            h += (2.0 * f64::from(bits[j]) - 1.0) * c;
        }
        (h + self.graph.fields()[i]) * delta_spin
    }

    /// Reference path: flip, recompute the full energy, flip back.
    pub fn delta_energy_for_flip_slow(&self, i: usize, conf: &BitConfiguration) -> Result<f64> {
        let e0 = self.energy(conf)?;
        let mut flipped = conf.clone();
        flipped.flip(i)?;
        Ok(self.energy_unchecked(flipped.bits()) - e0)
    }
}
