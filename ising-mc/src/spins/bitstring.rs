use std::fmt;
use std::ops::Index;

use rand::Rng;

use crate::error::{IsingError, Result};

/// Widest configuration that fits the integer encoding.
pub const MAX_ENCODED_SITES: usize = 64;

/// Fixed-length string of 0/1 site values.
///
/// Bit `i` maps to the spin `2 * bit - 1`, so 0 is spin down and 1 is spin up.
/// The integer encoding is big-endian: site 0 is the most significant bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitConfiguration {
    bits: Vec<u8>,
}

impl BitConfiguration {
    pub fn zeros(n_sites: usize) -> Self {
        Self {
            bits: vec![0; n_sites],
        }
    }

    /// Build from an explicit 0/1 sequence.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        check_bits(bits)?;
        Ok(Self {
            bits: bits.to_vec(),
        })
    }

    /// Build a `digits`-wide configuration holding `value`.
    pub fn from_int(value: u64, digits: usize) -> Result<Self> {
        let mut conf = Self::zeros(digits);
        conf.set_int(value)?;
        Ok(conf)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    /// Number of distinct configurations of this width, `2^N`.
    pub fn n_states(&self) -> Result<u64> {
        let n = self.len();
        if n >= MAX_ENCODED_SITES {
            return Err(IsingError::EncodingTooWide { len: n });
        }
        Ok(1u64 << n)
    }

    /// Replace every bit at once. The length must match.
    pub fn set_bits(&mut self, bits: &[u8]) -> Result<()> {
        if bits.len() != self.len() {
            return Err(IsingError::SizeMismatch {
                expected: self.len(),
                actual: bits.len(),
            });
        }
        check_bits(bits)?;
        self.bits.copy_from_slice(bits);
        Ok(())
    }

    pub fn flip(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        let bit = self
            .bits
            .get_mut(index)
            .ok_or(IsingError::IndexOutOfRange { index, len })?;
        *bit ^= 1;
        Ok(())
    }

    /// Toggle without bounds reporting; callers have already validated `index`.
    #[inline]
    pub(crate) fn flip_unchecked(&mut self, index: usize) {
        self.bits[index] ^= 1;
    }

    pub fn to_int(&self) -> Result<u64> {
        if self.len() > MAX_ENCODED_SITES {
            return Err(IsingError::EncodingTooWide { len: self.len() });
        }
        Ok(self
            .bits
            .iter()
            .fold(0u64, |acc, &b| (acc << 1) | u64::from(b)))
    }

    /// Overwrite with the big-endian binary digits of `value`, zero padded.
    ///
    /// Values needing more than `len()` bits are rejected rather than truncated.
    pub fn set_int(&mut self, value: u64) -> Result<()> {
        let digits = self.len();
        let needed = (u64::BITS - value.leading_zeros()) as usize;
        if needed > digits {
            return Err(IsingError::InvalidEncodingWidth { value, digits });
        }
        self.write_int(value);
        Ok(())
    }

    /// Encode `value` with no width check; bits above `len()` are dropped.
    #[inline]
    pub(crate) fn write_int(&mut self, value: u64) {
        let n = self.len();
        for (i, bit) in self.bits.iter_mut().enumerate() {
            let shift = n - 1 - i;
            *bit = if shift < MAX_ENCODED_SITES {
                ((value >> shift) & 1) as u8
            } else {
                0
            };
        }
    }

    /// Set exactly `n_on` sites to 1, chosen uniformly without replacement,
    /// and every other site to 0.
    pub fn set_magnetization<R: Rng + ?Sized>(&mut self, n_on: usize, rng: &mut R) -> Result<()> {
        let len = self.len();
        if n_on > len {
            return Err(IsingError::InvalidMagnetizationTarget { target: n_on, len });
        }
        self.bits.fill(0);
        for i in rand::seq::index::sample(rng, len, n_on).iter() {
            self.bits[i] = 1;
        }
        Ok(())
    }

    /// Spin at site `i`, `+1.0` or `-1.0`.
    #[inline]
    pub fn spin(&self, i: usize) -> f64 {
        2.0 * f64::from(self.bits[i]) - 1.0
    }

    /// The configuration as ±1 spins.
    pub fn signed_array(&self) -> Vec<i8> {
        self.bits.iter().map(|&b| 2 * b as i8 - 1).collect()
    }

    /// Sum of ±1 spins.
    pub fn magnetization(&self) -> i64 {
        let on = self.on_count() as i64;
        2 * on - self.len() as i64
    }

    pub fn on_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    pub fn off_count(&self) -> usize {
        self.len() - self.on_count()
    }

    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|&b| b ^ 1).collect(),
        }
    }
}

fn check_bits(bits: &[u8]) -> Result<()> {
    match bits.iter().position(|&b| b > 1) {
        Some(index) => Err(IsingError::InvalidBit {
            index,
            value: bits[index],
        }),
        None => Ok(()),
    }
}

impl Index<usize> for BitConfiguration {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bits[index]
    }
}

impl fmt::Display for BitConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}
