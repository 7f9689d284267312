//! Bloom filter sizing
//!
//! Formulas:
//! - m = ceil(-n * ln(p) / ln(2)^2)  -- bits
//! - k = ceil(m / n * ln(2))         -- hash functions
//!
//! Inputs are assumed validated (`n >= 1`, `0 < p < 1`); see `BloomConfig`.

use std::f64::consts::LN_2;

/// Derived filter dimensions
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParameters {
    /// Number of bits in the array (m)
    pub number_of_bits: usize,
    /// Number of probes per element (k)
    pub number_of_hashes: usize,
    /// False positive rate at full design load with these m and k
    pub expected_fpr: f64,
}

/// Compute array size and hash count for `filter_size` elements at `fp_rate`
pub fn calculate_parameters(filter_size: usize, fp_rate: f64) -> FilterParameters {
    let number_of_bits = number_of_bits(filter_size, fp_rate);
    let number_of_hashes = number_of_hashes(number_of_bits, filter_size);

    FilterParameters {
        number_of_bits,
        number_of_hashes,
        expected_fpr: calculate_fpr(number_of_bits, filter_size, number_of_hashes),
    }
}

/// Bits needed to hold `filter_size` elements at `fp_rate`
pub fn number_of_bits(filter_size: usize, fp_rate: f64) -> usize {
    (-(filter_size as f64) * fp_rate.ln() / (LN_2 * LN_2)).ceil() as usize
}

/// Hash functions for an array of `number_of_bits` holding `filter_size` elements
pub fn number_of_hashes(number_of_bits: usize, filter_size: usize) -> usize {
    (number_of_bits as f64 / filter_size as f64 * LN_2).ceil() as usize
}

/// False positive rate for m bits, n elements and k hashes
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
