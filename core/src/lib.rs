//! histosketch: a streaming, bounded-memory log-scale histogram.
//!
//! Samples are folded into a bounded set of logarithmically-spaced buckets.
//! When the bucket budget is exceeded the histogram compacts itself by
//! widening its scale and merging buckets that collapse together, so memory
//! use never exceeds [`BIN_CAP`] occupied bins regardless of how many
//! samples have been ingested. From the resulting buckets, arbitrary
//! percentiles can be estimated by linear interpolation between bucket
//! edges.
//!
//! This is an approximate sketch, not an exact-quantile structure: accuracy
//! is bounded by bucket width, which narrows as `base` shrinks but costs
//! more compaction passes to reach a given range. There is no statistical
//! error bound published for this scheme (contrast with ε-approximate
//! sketches); see the crate-level design notes in `SPEC_FULL.md` for the
//! rationale.
//!
//! # Example
//!
//! ```
//! use histosketch::Histogram;
//!
//! let mut h = Histogram::new(2, -3).unwrap();
//! for i in 1..=1000 {
//!     h.update(f64::from(i)).unwrap();
//! }
//!
//! let table = h.percentiles();
//! let median = table.quantile(0.5).unwrap();
//! assert!(median > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bin;
mod display;
mod error;
mod histogram;
mod percentile;
mod persistence;

pub use bin::Bin;
pub use error::{Context, HistogramError, Result};
pub use histogram::{Histogram, BIN_CAP};
pub use percentile::Percentiles;
