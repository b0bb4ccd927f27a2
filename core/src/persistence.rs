//! Binary (de)serialization of a [`Histogram`] to a fixed-size little-endian
//! record.
//!
//! The layout is deliberately explicit and width-fixed rather than a raw
//! struct dump, per the source program's own portability caveat: a 4-byte
//! magic tag, then `base`, `exponent` (as `i64`), `count`, `bin_count` (as
//! `u64`), then [`BIN_CAP`] `(alpha: i64, count: u64)` pairs, padded with
//! `(0, 0)` past `bin_count`. Byte-exact compatibility with the original C
//! implementation is not a goal; only round-tripping within this crate is.

use std::io::{Read, Write};

use crate::bin::Bin;
use crate::error::{HistogramError, Result};
use crate::histogram::{Histogram, BIN_CAP};

/// Four-byte identifier written at the start of every persisted record,
/// matching the source's `memcpy(hst->header, "HST", 4)`.
const MAGIC: [u8; 4] = *b"HST\0";

impl Histogram {
    /// Serializes this histogram as a fixed-size binary record.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `sink`.
    pub fn save(&self, sink: &mut impl Write) -> Result<()> {
        sink.write_all(&MAGIC)?;
        sink.write_all(&self.base.to_le_bytes())?;
        sink.write_all(&self.exponent.to_le_bytes())?;
        sink.write_all(&self.count.to_le_bytes())?;
        sink.write_all(&(self.bins.len() as u64).to_le_bytes())?;
        for slot in 0..BIN_CAP {
            let (alpha, count) = self
                .bins
                .get(slot)
                .map_or((0, 0), |bin| (bin.alpha, bin.count));
            sink.write_all(&alpha.to_le_bytes())?;
            sink.write_all(&count.to_le_bytes())?;
        }
        Ok(())
    }

    /// Reads a histogram back from a record previously written by
    /// [`Histogram::save`], re-validating invariants I1–I3 and I5.
    ///
    /// # Errors
    ///
    /// Returns [`HistogramError::FormatError`] if the magic tag doesn't
    /// match, or if the record's `bin_count`, sort order, per-bin counts, or
    /// count conservation are inconsistent. Propagates I/O errors from
    /// `source`.
    pub fn load(source: &mut impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        source.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(HistogramError::format(
                "bad magic tag: not a histosketch record",
            ));
        }

        let base = read_i64(source)?;
        let exponent = read_i64(source)?;
        let count = read_u64(source)?;
        let bin_count = read_u64(source)? as usize;

        if bin_count > BIN_CAP {
            return Err(HistogramError::format(format!(
                "bin_count {bin_count} exceeds BIN_CAP {BIN_CAP}"
            )));
        }
        if base < 2 {
            return Err(HistogramError::format(format!(
                "base must be >= 2, got {base}"
            )));
        }

        let mut bins = Vec::with_capacity(bin_count);
        for slot in 0..BIN_CAP {
            let alpha = read_i64(source)?;
            let raw_count = read_u64(source)?;
            if slot < bin_count {
                bins.push(Bin::new(alpha, raw_count));
            }
        }

        let mut prev_alpha: Option<i64> = None;
        let mut total = 0u64;
        for bin in &bins {
            if bin.count == 0 {
                return Err(HistogramError::format(
                    "record contains an active bin with a zero count",
                ));
            }
            if let Some(prev) = prev_alpha {
                if bin.alpha <= prev {
                    return Err(HistogramError::format(
                        "record's bins are not strictly sorted by alpha",
                    ));
                }
            }
            prev_alpha = Some(bin.alpha);
            total += bin.count;
        }
        if total != count {
            return Err(HistogramError::format(format!(
                "bin counts sum to {total} but recorded total count is {count}"
            )));
        }

        Ok(Self {
            base,
            exponent,
            count,
            bins,
        })
    }
}

fn read_i64(source: &mut impl Read) -> Result<i64> {
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

fn read_u64(source: &mut impl Read) -> Result<u64> {
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
