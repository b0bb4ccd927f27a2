//! Percentile extraction: turning the occupied bins into a queryable table.

use std::io::Write;

use crate::error::{HistogramError, Result};
use crate::histogram::Histogram;

/// A monotone `(cumulative_pct, representative_value)` table derived from a
/// [`Histogram`]'s bins at the moment [`Histogram::percentiles`] was called.
///
/// `cumulative_pct` is the fraction of the histogram's total count found in
/// bins strictly before the entry; `representative_value` is the bin's left
/// edge. Both columns are non-decreasing; the value column is strictly
/// increasing because bins are strictly sorted by `alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    entries: Vec<(f64, f64)>,
}

impl Histogram {
    /// Builds the percentile table for the histogram's current state. An
    /// empty histogram yields an empty table (not an error) — the error
    /// only surfaces when a quantile is actually requested of it.
    #[must_use]
    pub fn percentiles(&self) -> Percentiles {
        let mut entries = Vec::with_capacity(self.bins.len());
        let mut cumulative = 0u64;
        for bin in &self.bins {
            let pct = if self.count == 0 {
                0.0
            } else {
                cumulative as f64 / self.count as f64
            };
            entries.push((pct, self.representative_value(bin.alpha)));
            cumulative += bin.count;
        }
        Percentiles { entries }
    }

    /// Writes a tab-separated `(pct, value)` table to `out`, for `p = 0,
    /// precision, 2*precision, ...` while `p < 1`, preceded by a `PCT\tVALUE`
    /// header.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::PreconditionViolation`] if `precision` is
    /// not in `(0, 1)`, or propagates any I/O error from `out`, or any error
    /// from the underlying [`Percentiles::quantile`] call.
    pub fn display_percentiles(&self, out: &mut impl Write, precision: f64) -> Result<()> {
        if !(precision > 0.0 && precision < 1.0) {
            return Err(HistogramError::precondition(format!(
                "precision must be in (0, 1), got {precision}"
            )));
        }
        let table = self.percentiles();
        writeln!(out, "PCT\tVALUE")?;
        let mut p = 0.0;
        while p < 1.0 {
            let value = table.quantile(p)?;
            writeln!(out, "{p}\t{value}")?;
            p += precision;
        }
        Ok(())
    }
}

impl Percentiles {
    /// Number of entries in the table (equal to the source histogram's
    /// `bin_count` at the time it was built).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no entries (the source histogram was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interpolates the value at percentile `p`.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::PreconditionViolation`] if `p` is outside
    /// `[0, 1)` or the table is empty, and
    /// [`HistogramError::InvariantViolation`] if the interpolation
    /// correction term falls outside the bin's range (a bug, not a caller
    /// error).
    pub fn quantile(&self, p: f64) -> Result<f64> {
        if !(p >= 0.0 && p < 1.0) {
            return Err(HistogramError::precondition(format!(
                "percentile must be in [0, 1), got {p}"
            )));
        }
        if self.entries.is_empty() {
            return Err(HistogramError::precondition(
                "percentile table is empty: histogram has no samples",
            ));
        }

        // Largest index i with cumulative_pct_i <= p; ties resolve to the
        // lower index because partition_point returns the first index that
        // fails the predicate.
        let i = self
            .entries
            .partition_point(|&(pct, _)| pct <= p)
            .saturating_sub(1);

        let (pct_i, value_i) = self.entries[i];
        if i == self.entries.len() - 1 {
            return Ok(value_i);
        }

        let (pct_next, value_next) = self.entries[i + 1];
        let bin_range = value_next - value_i;
        let correction = (p - pct_i) / (pct_next - pct_i) * bin_range;
        if !(0.0..=bin_range).contains(&correction) {
            return Err(HistogramError::invariant(format!(
                "interpolation correction {correction} outside bin range [0, {bin_range}]"
            )));
        }
        Ok(value_i + correction)
    }
}
