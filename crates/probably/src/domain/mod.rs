//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Packed bit array
//! - Hash seeding and probe generation
//! - Parameter calculations
//! - Configuration
//! - Core Bloom filter
//! - Lock-guarded wrapper for shared use
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod bit_array;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;
pub mod shared;

pub use bit_array::BitArray;
pub use bloom_filter::BloomFilter;
pub use config::{BloomConfig, BloomConfigBuilder};
pub use hash_functions::{probe_positions, HashScheme, ProbeGenerator};
pub use parameters::{calculate_fpr, calculate_parameters, FilterParameters};
pub use shared::SharedBloomFilter;
