//! Core Bloom filter implementation
//!
//! INVARIANTS:
//! - m = ceil(-n * ln(p) / ln(2)^2), k = ceil(m / n * ln(2))
//! - No false negatives: after `add(x)`, `contains(x)` MUST return true
//! - `add` only ever sets bits

use tracing::debug;

use super::bit_array::BitArray;
use super::config::BloomConfig;
use super::hash_functions::{HashScheme, ProbeGenerator};
use super::parameters::calculate_parameters;
use crate::error::FilterError;

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not.
#[derive(Clone, Debug)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitArray,
    /// Size in bits (m)
    number_of_bits: usize,
    /// Number of probes per element (k)
    number_of_hashes: usize,
    /// Expected element count, target FPR and hash scheme
    config: BloomConfig,
}

impl BloomFilter {
    /// Create a filter sized for `size` elements at false positive rate `fp_rate`
    ///
    /// # Errors
    /// `InvalidConfiguration` when `size` is 0 or `fp_rate` is not in (0, 1).
    pub fn new(size: usize, fp_rate: f64) -> Result<Self, FilterError> {
        Self::with_config(BloomConfig {
            filter_size: size,
            fp_rate,
            hash_scheme: HashScheme::default(),
        })
    }

    /// Create a filter from a full configuration
    pub fn with_config(config: BloomConfig) -> Result<Self, FilterError> {
        config.validate()?;

        let params = calculate_parameters(config.filter_size, config.fp_rate);
        let bits = BitArray::new(params.number_of_bits)?;

        debug!(
            filter_size = config.filter_size,
            fp_rate = config.fp_rate,
            number_of_bits = params.number_of_bits,
            number_of_hashes = params.number_of_hashes,
            hash_scheme = ?config.hash_scheme,
            "Created bloom filter"
        );

        Ok(Self {
            bits,
            number_of_bits: params.number_of_bits,
            number_of_hashes: params.number_of_hashes,
            config,
        })
    }

    /// Insert an element into the filter
    pub fn add(&mut self, data: &[u8]) {
        for index in self.probes(data) {
            self.bits.set_bit(index);
        }
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    ///
    /// Stops at the first unset probe.
    pub fn contains(&self, data: &[u8]) -> bool {
        self.probes(data).all(|index| self.bits.bit(index))
    }

    /// Merge another filter into this one (OR operation)
    ///
    /// After merge, this filter matches every element added to either filter.
    /// Nothing is modified on error.
    ///
    /// # Errors
    /// `ConfigMismatch` when the filters differ in size, FPR or hash scheme.
    pub fn merge(&mut self, other: &BloomFilter) -> Result<(), FilterError> {
        self.check_compatible(other)?;
        self.bits.merge(&other.bits)?;

        debug!(
            number_of_bits = self.number_of_bits,
            bits_set = self.bits.count_ones(),
            "Merged bloom filter"
        );
        Ok(())
    }

    /// Return a new filter holding the union of both filters
    ///
    /// Neither input is modified.
    ///
    /// # Errors
    /// `ConfigMismatch` when the filters differ in size, FPR or hash scheme.
    pub fn union(&self, other: &BloomFilter) -> Result<BloomFilter, FilterError> {
        self.check_compatible(other)?;
        let bits = self.bits.union(&other.bits)?;

        debug!(
            number_of_bits = self.number_of_bits,
            bits_set = bits.count_ones(),
            "Built bloom filter union"
        );

        Ok(Self {
            bits,
            number_of_bits: self.number_of_bits,
            number_of_hashes: self.number_of_hashes,
            config: self.config.clone(),
        })
    }

    /// The configured expected element count (not a live count)
    pub fn size(&self) -> usize {
        self.config.filter_size
    }

    /// Clear the filter (reset all bits to 0)
    pub fn clear(&mut self) {
        self.bits.clear();
        debug!(number_of_bits = self.number_of_bits, "Cleared bloom filter");
    }

    /// Get the filter size in bits
    pub fn number_of_bits(&self) -> usize {
        self.number_of_bits
    }

    /// Get the number of probes per element
    pub fn number_of_hashes(&self) -> usize {
        self.number_of_hashes
    }

    /// Get the target false positive rate
    pub fn fp_rate(&self) -> f64 {
        self.config.fp_rate
    }

    pub fn hash_scheme(&self) -> HashScheme {
        self.config.hash_scheme
    }

    pub fn config(&self) -> &BloomConfig {
        &self.config
    }

    /// Underlying bit array
    pub fn bit_array(&self) -> &BitArray {
        &self.bits
    }

    /// Whether `other` can be merged into this filter
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.config == other.config
    }

    /// True if no bit is set
    pub fn is_empty(&self) -> bool {
        self.bits.count_ones() == 0
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.number_of_bits as f64
    }

    /// Estimate how many distinct elements have been added
    ///
    /// Formula: n ≈ -(m/k) * ln(1 - X/m), X = bits set.
    /// Infinite once every bit is set.
    pub fn estimated_cardinality(&self) -> f64 {
        let m = self.number_of_bits as f64;
        let k = self.number_of_hashes as f64;
        -(m / k) * (1.0 - self.fill_ratio()).ln()
    }

    /// False positive rate implied by the current fill
    ///
    /// Formula: FPR ≈ (X/m)^k
    pub fn estimated_fpr(&self) -> f64 {
        self.fill_ratio().powi(self.number_of_hashes as i32)
    }

    fn probes(&self, data: &[u8]) -> std::iter::Take<ProbeGenerator> {
        ProbeGenerator::new(data, self.config.hash_scheme, self.number_of_bits)
            .take(self.number_of_hashes)
    }

    fn check_compatible(&self, other: &BloomFilter) -> Result<(), FilterError> {
        if !self.is_compatible(other) {
            return Err(FilterError::ConfigMismatch {
                expected: self.config.clone(),
                found: other.config.clone(),
            });
        }
        Ok(())
    }
}
