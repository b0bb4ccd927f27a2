//! Plain-text rendering of a histogram's raw bins, restored from the
//! original source's `hst_display` (dropped by the distilled spec, brought
//! back here as the CLI's default non-percentile output).

use std::io::Write;

use crate::error::Result;
use crate::histogram::Histogram;

impl Histogram {
    /// Writes a one-line summary followed by the raw `(value, count)` pairs
    /// for every active bin, five per line.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn display(&self, out: &mut impl Write) -> Result<()> {
        writeln!(
            out,
            "Histogram: Count = {}, Bin Count = {}, Base = {}, Exponent = {}",
            self.count,
            self.bins.len(),
            self.base,
            self.exponent
        )?;
        writeln!(out, "    Bins: ")?;
        for (i, bin) in self.bins.iter().enumerate() {
            let value = self.representative_value(bin.alpha);
            if i % 5 == 0 {
                write!(out, "    ")?;
            }
            write!(out, "({value:.2}, {})", bin.count)?;
            if i % 5 == 4 {
                writeln!(out)?;
            } else {
                write!(out, " ")?;
            }
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reports_summary_line() {
        let mut h = Histogram::new(2, -3).unwrap();
        h.update(1.0).unwrap();
        let mut buf = Vec::new();
        h.display(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Histogram: Count = 1, Bin Count = 1, Base = 2, Exponent = -3"));
        assert!(text.contains("(1.00, 1)"));
    }
}
