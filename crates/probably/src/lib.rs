//! # Probably
//!
//! Probabilistic set membership: a Bloom filter over a packed bit array.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BitArray`: Packed, bounds-checked bit storage
//!   - `BloomFilter`: Core probabilistic data structure
//!   - `BloomConfig`: Configuration with validation
//!   - `BloomConfigBuilder`: Fluent builder for configuration
//!   - `ProbeGenerator`: Stateful double-hashing probe sequence
//!   - `SharedBloomFilter`: Opt-in `RwLock` wrapper for concurrent use
//!
//! - **Metrics** (`metrics`): Counters fed by `SharedBloomFilter`
//!
//! ## Invariants
//!
//! - m = ceil(-n * ln(p) / ln(2)^2), k = ceil(m / n * ln(2))
//! - No false negatives: if added, `contains()` MUST return true
//! - Only filters with equal configuration can be merged
//!
//! `BloomFilter` is not synchronized. Wrap it in `SharedBloomFilter` to use it
//! from several threads.
//!
//! ## Usage Example
//!
//! ```
//! use probably::BloomFilter;
//!
//! let mut seen = BloomFilter::new(100, 0.001)?;
//! seen.add(b"hello");
//!
//! let mut other = BloomFilter::new(100, 0.001)?;
//! other.add(b"world");
//!
//! seen.merge(&other)?;
//! assert!(seen.contains(b"hello"));
//! assert!(seen.contains(b"world"));
//! # Ok::<(), probably::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod metrics;

// Re-exports for convenience
pub use domain::{
    BitArray, BloomConfig, BloomConfigBuilder, BloomFilter, HashScheme, ProbeGenerator,
    SharedBloomFilter,
};
pub use error::{BitArrayError, FilterError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
