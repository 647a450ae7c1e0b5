use std::collections::HashMap;

use crate::error::{IsingError, Result};

/// One directed entry of a site's coupling list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub neighbor: usize,
    pub strength: f64,
}

impl Bond {
    pub fn new(neighbor: usize, strength: f64) -> Self {
        Self { neighbor, strength }
    }
}

impl From<(usize, f64)> for Bond {
    fn from((neighbor, strength): (usize, f64)) -> Self {
        Self { neighbor, strength }
    }
}

/// Static per-site adjacency with coupling strengths and local fields.
///
/// Bonds are stored in compressed rows: the bonds of site `i` occupy
/// `offsets[i]..offsets[i + 1]` of `neighbors` and `strengths`, in the order
/// they were supplied.
///
/// The exact energy counts the pair `(i, j)` only from the lower index, so the
/// coupling lists are expected to be symmetric: if `i` lists `(j, J)` then `j`
/// lists `(i, J)`. Asymmetric input is accepted but logged, since the exact and
/// incremental energies disagree on it.
#[derive(Debug, Clone)]
pub struct CouplingGraph {
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
    strengths: Vec<f64>,
    fields: Vec<f64>,
}

impl CouplingGraph {
    /// Build from a per-site bond list and one field strength per site.
    ///
    /// Fails on neighbor indices outside `[0, n_sites)`, on a site listing
    /// itself, and when `fields.len()` differs from the number of sites.
    pub fn new<B>(couplings: &[Vec<B>], fields: Vec<f64>) -> Result<Self>
    where
        B: Into<Bond> + Copy,
    {
        let n_sites = couplings.len();
        if fields.len() != n_sites {
            return Err(IsingError::FieldLengthMismatch {
                sites: n_sites,
                fields: fields.len(),
            });
        }

        let n_bonds: usize = couplings.iter().map(Vec::len).sum();
        let mut offsets = Vec::with_capacity(n_sites + 1);
        let mut neighbors = Vec::with_capacity(n_bonds);
        let mut strengths = Vec::with_capacity(n_bonds);
        offsets.push(0);

        for (site, bonds) in couplings.iter().enumerate() {
            for &bond in bonds {
                let bond: Bond = bond.into();
                if bond.neighbor >= n_sites {
                    return Err(IsingError::NeighborOutOfRange {
                        site,
                        neighbor: bond.neighbor,
                        n_sites,
                    });
                }
                if bond.neighbor == site {
                    return Err(IsingError::SelfCoupling { site });
                }
                neighbors.push(bond.neighbor);
                strengths.push(bond.strength);
            }
            offsets.push(neighbors.len());
        }

        let graph = Self {
            offsets,
            neighbors,
            strengths,
            fields,
        };
        if !graph.is_symmetric(1e-12) {
            tracing::warn!(
                n_sites,
                "coupling lists are asymmetric; exact and incremental energies may disagree"
            );
        }
        Ok(graph)
    }

    pub fn n_sites(&self) -> usize {
        self.fields.len()
    }

    pub fn n_bonds(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbor indices of site `i`, in input order.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.neighbors[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Coupling strengths of site `i`, aligned with [`Self::neighbors`].
    #[inline]
    pub fn strengths(&self, i: usize) -> &[f64] {
        &self.strengths[self.offsets[i]..self.offsets[i + 1]]
    }

    pub fn bonds(&self, i: usize) -> impl Iterator<Item = Bond> + '_ {
        self.neighbors(i)
            .iter()
            .zip(self.strengths(i))
            .map(|(&neighbor, &strength)| Bond { neighbor, strength })
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    pub(crate) fn replace_fields(&mut self, fields: Vec<f64>) -> Result<()> {
        if fields.len() != self.n_sites() {
            return Err(IsingError::FieldLengthMismatch {
                sites: self.n_sites(),
                fields: fields.len(),
            });
        }
        self.fields = fields;
        Ok(())
    }

    /// True when every pair carries the same total strength in both directions.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        // (lower, upper) -> (strength listed by lower, strength listed by upper)
        let mut pairs: HashMap<(usize, usize), (f64, f64)> =
            HashMap::with_capacity(self.n_bonds());
        for i in 0..self.n_sites() {
            for bond in self.bonds(i) {
                let j = bond.neighbor;
                let sums = pairs.entry((i.min(j), i.max(j))).or_insert((0.0, 0.0));
                if i < j {
                    sums.0 += bond.strength;
                } else {
                    sums.1 += bond.strength;
                }
            }
        }
        pairs
            .values()
            .all(|&(forward, backward)| (forward - backward).abs() <= tol)
    }
}
