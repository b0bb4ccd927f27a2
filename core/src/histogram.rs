//! The sketch itself: bucket state, the update path, and compaction.

use crate::bin::Bin;
use crate::error::{HistogramError, Result};

/// Maximum number of occupied bins a [`Histogram`] may hold before it must
/// compact. Matches the source implementation's `BIN_COUNT`.
pub const BIN_CAP: usize = 100;

/// A streaming, bounded-memory log-scale histogram.
///
/// Samples are mapped to an integer bucket index `alpha = floor(v /
/// base^exponent)` at the histogram's current scale. Buckets are held in a
/// `Vec` kept sorted ascending by `alpha`, capped at [`BIN_CAP`] entries.
/// When an update would grow the bin count past the cap, the histogram
/// compacts: `exponent` is incremented and adjacent bins whose indices
/// collapse under the new scale are merged, which is repeated until the bin
/// count is back under the cap.
///
/// See the crate-level documentation for the full invariant list (I1–I6).
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub(crate) base: i64,
    pub(crate) exponent: i64,
    pub(crate) count: u64,
    pub(crate) bins: Vec<Bin>,
}

impl Histogram {
    /// Creates an empty histogram with the given base and initial exponent.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::PreconditionViolation`] if `base < 2`: a
    /// base of 1 would make `floor(alpha / base)` the identity, so
    /// compaction could never reduce the bin count and I6 could never be
    /// restored.
    pub fn new(base: i64, exponent: i64) -> Result<Self> {
        if base < 2 {
            return Err(HistogramError::precondition(format!(
                "base must be >= 2, got {base}"
            )));
        }
        Ok(Self {
            base,
            exponent,
            count: 0,
            bins: Vec::with_capacity(BIN_CAP),
        })
    }

    /// The logarithmic base of the bucketing scheme.
    #[must_use]
    pub fn base(&self) -> i64 {
        self.base
    }

    /// The histogram's current scale exponent. Grows monotonically.
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Total number of samples ever ingested.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of currently occupied bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Read-only access to the occupied bins, ascending by `alpha`.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// `true` if no sample has been ingested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn scale_factor(&self, exponent: i64) -> f64 {
        (self.base as f64).powi(i32::try_from(exponent).unwrap_or(i32::MAX))
    }

    /// Maps a sample to its bucket index at the current scale.
    ///
    /// For negative exponents this multiplies by `base^(-exponent)` rather
    /// than dividing by `base^exponent`, avoiding the floating-point
    /// rounding asymmetry that direct division exhibits near bin boundaries
    /// for small `v` and very negative `exponent`.
    fn alpha_for(&self, v: f64) -> i64 {
        let alpha = if self.exponent < 0 {
            v * self.scale_factor(-self.exponent)
        } else {
            v / self.scale_factor(self.exponent)
        };
        alpha.floor() as i64
    }

    /// The representative (left-edge) value of bucket `alpha` at this
    /// histogram's current scale.
    pub(crate) fn representative_value(&self, alpha: i64) -> f64 {
        alpha as f64 * self.scale_factor(self.exponent)
    }

    /// Ingests one sample.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::PreconditionViolation`] if `v` is not
    /// finite, and [`HistogramError::InvariantViolation`] if an internal
    /// consistency check fails (a bug in this crate, not caller error).
    pub fn update(&mut self, v: f64) -> Result<()> {
        if !v.is_finite() {
            return Err(HistogramError::precondition(format!(
                "sample must be finite, got {v}"
            )));
        }

        let alpha = self.alpha_for(v);
        match self.bins.binary_search_by_key(&alpha, |b| b.alpha) {
            Ok(idx) => {
                self.bins[idx].count += 1;
                self.count += 1;
                return Ok(());
            }
            Err(idx) if self.bins.len() < BIN_CAP => {
                self.bins.insert(idx, Bin::new(alpha, 1));
                self.count += 1;
                return Ok(());
            }
            Err(_) => {}
        }

        // Full with no match: compact, then retry exactly once. The scale
        // has changed, so the bucket index must be recomputed.
        self.compact()?;
        let alpha = self.alpha_for(v);
        match self.bins.binary_search_by_key(&alpha, |b| b.alpha) {
            Ok(idx) => {
                self.bins[idx].count += 1;
                self.count += 1;
                Ok(())
            }
            Err(idx) => {
                if self.bins.len() >= BIN_CAP {
                    return Err(HistogramError::invariant(
                        "compaction did not reduce bin count below capacity",
                    ));
                }
                self.bins.insert(idx, Bin::new(alpha, 1));
                self.count += 1;
                Ok(())
            }
        }
    }

    /// Rescales the histogram by incrementing `exponent` and merging
    /// adjacent bins whose indices collapse under the new scale, repeating
    /// until the bin count is strictly under [`BIN_CAP`].
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::InvariantViolation`] if called while
    /// `bin_count != BIN_CAP`, or if an occupied bin with a zero count is
    /// found in the active prefix.
    fn compact(&mut self) -> Result<()> {
        if self.bins.len() != BIN_CAP {
            return Err(HistogramError::invariant(format!(
                "compact() called with bin_count {} != BIN_CAP {}",
                self.bins.len(),
                BIN_CAP
            )));
        }

        loop {
            let mut merged: Vec<Bin> = Vec::with_capacity(BIN_CAP);
            for bin in &self.bins {
                if bin.count == 0 {
                    return Err(HistogramError::invariant(
                        "encountered an active bin with a zero count",
                    ));
                }
                let new_alpha = bin.alpha.div_euclid(self.base);
                match merged.last_mut() {
                    Some(last) if last.alpha == new_alpha => last.count += bin.count,
                    _ => merged.push(Bin::new(new_alpha, bin.count)),
                }
            }
            self.bins = merged;
            self.exponent += 1;
            tracing::debug!(
                exponent = self.exponent,
                bin_count = self.bins.len(),
                "histogram compaction pass completed"
            );
            if self.bins.len() < BIN_CAP {
                break;
            }
        }
        Ok(())
    }
}
