//! The single bucket type the histogram is built from.

/// One occupied bucket: every sample `v` with `floor(v / base^exponent) ==
/// alpha` (at the histogram's current scale) collapses into this bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    /// The bucket index at the histogram's current scale.
    pub alpha: i64,
    /// Number of samples collapsed into this bucket. Always `>= 1` for an
    /// active bin — see invariant I2 in the crate-level docs.
    pub count: u64,
}

impl Bin {
    pub(crate) fn new(alpha: i64, count: u64) -> Self {
        Self { alpha, count }
    }
}
