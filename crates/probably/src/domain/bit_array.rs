//! Packed bit array
//!
//! Bits are stored eight to a byte, least significant bit first, so bit `i`
//! lives at `bytes[i / 8] & (1 << (i % 8))`.
//!
//! The public `set`/`is_set` entry points are bounds-checked. The Bloom filter
//! uses the crate-internal accessors instead, since every probe it produces is
//! already reduced modulo the array length.

use bitvec::prelude::*;

use crate::error::BitArrayError;

/// Fixed-size packed bit array
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u8, Lsb0>,
}

impl BitArray {
    /// Allocate a zeroed array holding `requested_bits` bits
    ///
    /// Storage is `ceil(requested_bits / 8)` bytes.
    pub fn new(requested_bits: usize) -> Result<Self, BitArrayError> {
        let bytes = requested_bits.div_ceil(8);
        if requested_bits > BitSlice::<u8, Lsb0>::MAX_BITS {
            return Err(BitArrayError::Allocation { bytes });
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(bytes)
            .map_err(|_| BitArrayError::Allocation { bytes })?;
        storage.resize(bytes, 0u8);

        let mut bits = BitVec::<u8, Lsb0>::from_vec(storage);
        bits.truncate(requested_bits);
        Ok(Self { bits })
    }

    /// Set the bit at `bit`
    pub fn set(&mut self, bit: usize) -> Result<(), BitArrayError> {
        self.check_index(bit)?;
        self.set_bit(bit);
        Ok(())
    }

    /// Test the bit at `bit`
    pub fn is_set(&self, bit: usize) -> Result<bool, BitArrayError> {
        self.check_index(bit)?;
        Ok(self.bit(bit))
    }

    /// Zero every bit, keeping the allocation
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// OR `other` into this array in place
    ///
    /// Nothing is modified when the lengths differ.
    pub fn merge(&mut self, other: &BitArray) -> Result<(), BitArrayError> {
        self.check_length(other)?;

        let self_raw = self.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (s, o) in self_raw.iter_mut().zip(other_raw.iter()) {
            *s |= *o;
        }
        Ok(())
    }

    /// Return a new array holding the OR of both inputs
    pub fn union(&self, other: &BitArray) -> Result<BitArray, BitArrayError> {
        self.check_length(other)?;

        let mut result = self.clone();
        result.merge(other)?;
        Ok(result)
    }

    /// Length in bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Length of the backing storage in bytes
    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Raw backing bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    #[inline]
    pub(crate) fn set_bit(&mut self, bit: usize) {
        self.bits.set(bit, true);
    }

    #[inline]
    pub(crate) fn bit(&self, bit: usize) -> bool {
        self.bits[bit]
    }

    fn check_index(&self, bit: usize) -> Result<(), BitArrayError> {
        if bit >= self.bits.len() {
            return Err(BitArrayError::IndexOutOfRange {
                index: bit,
                len: self.bits.len(),
            });
        }
        Ok(())
    }

    fn check_length(&self, other: &BitArray) -> Result<(), BitArrayError> {
        if self.bits.len() != other.bits.len() {
            return Err(BitArrayError::LengthMismatch {
                left: self.bits.len(),
                right: other.bits.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_ceiling_of_bits_to_bytes() {
        assert_eq!(BitArray::new(21).unwrap().byte_len(), 3);
        assert_eq!(BitArray::new(32).unwrap().byte_len(), 4);
        assert_eq!(BitArray::new(4).unwrap().byte_len(), 1);
        assert_eq!(BitArray::new(0).unwrap().byte_len(), 0);
    }

    #[test]
    fn test_new_array_is_zeroed() {
        let array = BitArray::new(100).unwrap();
        assert_eq!(array.len(), 100);
        assert_eq!(array.count_ones(), 0);
        assert!(array.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_bit() {
        let mut array1 = BitArray::new(4).unwrap();
        let mut array2 = BitArray::new(10).unwrap();

        array1.set(2).unwrap();
        array2.set(9).unwrap();

        assert!(array1.is_set(2).unwrap(), "Bit 2 should be set");
        assert!(array2.is_set(9).unwrap(), "Bit 9 should be set");
        assert!(!array1.is_set(3).unwrap(), "Bit 3 should not be set");
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut array = BitArray::new(16).unwrap();
        array.set(5).unwrap();
        array.set(5).unwrap();
        assert_eq!(array.count_ones(), 1);
    }

    #[test]
    fn test_bit_layout_is_lsb_first_within_byte() {
        let mut array = BitArray::new(16).unwrap();
        array.set(0).unwrap();
        array.set(9).unwrap();
        array.set(15).unwrap();

        assert_eq!(array.as_bytes(), &[0b0000_0001, 0b1000_0010]);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut array = BitArray::new(10).unwrap();

        assert_eq!(
            array.set(10),
            Err(BitArrayError::IndexOutOfRange { index: 10, len: 10 })
        );
        // Still inside the last byte, but past the requested length
        assert_eq!(
            array.is_set(15),
            Err(BitArrayError::IndexOutOfRange { index: 15, len: 10 })
        );
        assert_eq!(array.count_ones(), 0);
    }

    #[test]
    fn test_merge_two_bit_arrays() {
        let mut array1 = BitArray::new(4).unwrap();
        let mut array2 = BitArray::new(4).unwrap();

        array1.set(2).unwrap();
        array2.set(3).unwrap();

        array1.merge(&array2).unwrap();

        assert!(array1.is_set(2).unwrap() && array1.is_set(3).unwrap());
        assert!(array2.is_set(3).unwrap() && !array2.is_set(2).unwrap());
    }

    #[test]
    fn test_union_of_two_bit_arrays() {
        let mut array1 = BitArray::new(4).unwrap();
        let mut array2 = BitArray::new(4).unwrap();

        array1.set(2).unwrap();
        array2.set(3).unwrap();

        let result = array1.union(&array2).unwrap();

        assert!(result.is_set(2).unwrap() && result.is_set(3).unwrap());
        assert!(!array1.is_set(3).unwrap(), "Union must not modify the receiver");
        assert!(!array2.is_set(2).unwrap(), "Union must not modify the argument");
    }

    #[test]
    fn test_merge_rejects_length_mismatch() {
        let mut array1 = BitArray::new(16).unwrap();
        let mut array2 = BitArray::new(24).unwrap();
        array2.set(1).unwrap();

        assert_eq!(
            array1.merge(&array2),
            Err(BitArrayError::LengthMismatch { left: 16, right: 24 })
        );
        assert_eq!(array1.count_ones(), 0, "Failed merge must not mutate");
        assert!(array1.union(&array2).is_err());
    }

    #[test]
    fn test_clear_bit_array_state() {
        let mut array = BitArray::new(4).unwrap();
        array.set(2).unwrap();
        array.set(3).unwrap();

        array.clear();

        assert!(!array.is_set(2).unwrap());
        assert!(!array.is_set(3).unwrap());
        assert_eq!(array.len(), 4, "Clear keeps the size");
        assert_eq!(array.byte_len(), 1);
    }

    #[test]
    fn test_oversized_request_fails_with_allocation_error() {
        let result = BitArray::new(usize::MAX);
        assert!(matches!(result, Err(BitArrayError::Allocation { .. })));
    }
}
