//! Hash functions and probe generation for the Bloom filter
//!
//! Two independent 32-bit seeds are taken from two different hash functions.
//! Each seed is the lowest 4 bytes of the full digest, read little-endian.
//!
//! Probes come from a stateful double-hashing generator:
//!
//! ```text
//! index  = (index + offset) mod m
//! offset = (offset + i)     mod m
//! ```
//!
//! starting from `index = h1`, `offset = h2`, with `i` counting calls from 0.
//! Both `index` and `offset` evolve, so probes must be drawn in order from a
//! single generator.

use std::hash::Hasher;
use std::io::Cursor;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use siphasher::sip128::{Hasher128, SipHasher13};

/// Pair of hash functions used to seed the probe generator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashScheme {
    /// MurmurHash3 x64_128 for `h1`, SipHash-1-3 128-bit for `h2`
    #[default]
    Murmur3,
    /// SHA-256 for `h1`, SHA-512 for `h2`
    Sha2,
}

impl HashScheme {
    /// Compute the `(h1, h2)` seed pair for `data`
    pub fn seeds(self, data: &[u8]) -> (u32, u32) {
        match self {
            HashScheme::Murmur3 => (murmur_seed(data), sip_seed(data)),
            HashScheme::Sha2 => (
                low_u32(&Sha256::digest(data)),
                low_u32(&Sha512::digest(data)),
            ),
        }
    }
}

fn murmur_seed(data: &[u8]) -> u32 {
    let mut cursor = Cursor::new(data);
    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, 0).unwrap_or(0);
    hash as u32
}

fn sip_seed(data: &[u8]) -> u32 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(data);
    hasher.finish128().as_u128() as u32
}

fn low_u32(digest: &[u8]) -> u32 {
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Stateful probe generator over `[0, modulus)`
///
/// Yields an unbounded sequence; callers take as many probes as the filter
/// has hash functions. Yields nothing when `modulus` is 0.
#[derive(Clone, Debug)]
pub struct ProbeGenerator {
    index: u64,
    offset: u64,
    modulus: u64,
    step: u64,
}

impl ProbeGenerator {
    /// Seed a generator for `data` under `scheme`
    pub fn new(data: &[u8], scheme: HashScheme, modulus: usize) -> Self {
        let (h1, h2) = scheme.seeds(data);
        Self::from_seeds(h1, h2, modulus)
    }

    /// Seed a generator from precomputed hash values
    pub fn from_seeds(h1: u32, h2: u32, modulus: usize) -> Self {
        Self {
            index: u64::from(h1),
            offset: u64::from(h2),
            modulus: modulus as u64,
            step: 0,
        }
    }
}

impl Iterator for ProbeGenerator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.modulus == 0 {
            return None;
        }
        self.index = (self.index + self.offset) % self.modulus;
        self.offset = (self.offset + self.step % self.modulus) % self.modulus;
        self.step = self.step.wrapping_add(1);
        Some(self.index as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.modulus == 0 {
            (0, Some(0))
        } else {
            (usize::MAX, None)
        }
    }
}

/// Compute the first `k` probe positions for `data` in an array of `m` bits
pub fn probe_positions(data: &[u8], scheme: HashScheme, m: usize, k: usize) -> Vec<usize> {
    ProbeGenerator::new(data, scheme, m).take(k).collect()
}
