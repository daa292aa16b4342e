//! Buffered summary output.
//!
//! Tenths values are rendered straight from integers: sign, whole
//! part via itoa, then the single fraction digit. No float formatting
//! anywhere, so `-0.05` folded as `-1` prints as `-0.1` exactly.

use std::io::{BufWriter, Write};

use crate::aggregate::SummaryTable;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use crate::summary::{Result, SummaryError};

/// Buffered writer producing the `{key=min/mean/max, ...}` report.
///
/// # Example
///
/// ```
/// use sumstat::aggregate::SummaryTable;
/// use sumstat::streaming::SummaryWriter;
///
/// let mut table = SummaryTable::new();
/// table.record(b"Oslo", 32);
///
/// let mut out = Vec::new();
/// {
///     let mut writer = SummaryWriter::new(&mut out);
///     writer.write_summary(&table).unwrap();
///     writer.flush().unwrap();
/// }
/// assert_eq!(out, b"{Oslo=3.2/3.2/3.2}\n");
/// ```
pub struct SummaryWriter<W: Write> {
    writer: BufWriter<W>,
    int_buf: itoa::Buffer,
}

impl<W: Write> SummaryWriter<W> {
    /// Creates a writer with the default buffer capacity.
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, DEFAULT_OUTPUT_BUFFER)
    }

    /// Creates a writer with a custom buffer capacity.
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        SummaryWriter {
            writer: BufWriter::with_capacity(capacity, writer),
            int_buf: itoa::Buffer::new(),
        }
    }

    /// Writes the whole report for a table, terminated by a newline.
    ///
    /// Entries appear in ascending byte order of key, comma-separated
    /// inside a single brace pair. An empty table produces `{}`.
    pub fn write_summary(&mut self, table: &SummaryTable) -> Result<()> {
        self.writer.write_all(b"{").map_err(SummaryError::Io)?;
        let mut first = true;
        for (key, stats) in table.sorted_entries() {
            if !first {
                self.writer.write_all(b", ").map_err(SummaryError::Io)?;
            }
            first = false;
            self.writer.write_all(key).map_err(SummaryError::Io)?;
            self.writer.write_all(b"=").map_err(SummaryError::Io)?;
            self.write_fixed(stats.min)?;
            self.writer.write_all(b"/").map_err(SummaryError::Io)?;
            self.write_fixed(stats.mean())?;
            self.writer.write_all(b"/").map_err(SummaryError::Io)?;
            self.write_fixed(stats.max)?;
        }
        self.writer.write_all(b"}\n").map_err(SummaryError::Io)?;
        Ok(())
    }

    /// Writes one tenths value with exactly one fraction digit.
    #[inline]
    pub fn write_fixed(&mut self, tenths: i64) -> Result<()> {
        if tenths < 0 {
            self.writer.write_all(b"-").map_err(SummaryError::Io)?;
        }
        let mag = tenths.unsigned_abs();
        let whole = self.int_buf.format(mag / 10);
        self.writer.write_all(whole.as_bytes()).map_err(SummaryError::Io)?;
        self.writer
            .write_all(&[b'.', b'0' + (mag % 10) as u8])
            .map_err(SummaryError::Io)?;
        Ok(())
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(SummaryError::Io)
    }
}
