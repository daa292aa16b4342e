//! Streaming min/mean/max summarization with zero-allocation parsing.
//!
//! Optimizations:
//! - Fixed-capacity chunk reads (no per-line I/O)
//! - Zero-copy byte slice parsing (no String allocation)
//! - Fixed-point tenths arithmetic (no floats anywhere)
//! - memchr for fast newline and separator scanning
//! - One hash probe per record, keys allocated on first sight only
//!
//! Memory: O(chunk + longest line + distinct keys)

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::aggregate::SummaryTable;
use crate::config;
use crate::streaming::buffers::DEFAULT_CHUNK_SIZE;
use crate::streaming::parsing::{parse_line, LineParse};
use crate::streaming::{ChunkReader, LineAssembler, SummaryWriter};
use crate::summary::Result;

/// Lines between progress reports.
const PROGRESS_INTERVAL: u64 = 10_000_000;

/// Streaming summarize command.
#[derive(Debug, Clone)]
pub struct SummarizeCommand {
    /// Read chunk capacity in bytes.
    pub chunk_size: usize,
    /// Report progress to stderr every [`PROGRESS_INTERVAL`] lines.
    pub progress: bool,
}

impl Default for SummarizeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SummarizeCommand {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: false,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Run summarize on a file.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<SummarizeStats> {
        let file = File::open(input_path.as_ref())?;
        self.run_reader(file, output)
    }

    /// Run summarize from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<SummarizeStats> {
        let stdin = io::stdin();
        self.run_reader(stdin.lock(), output)
    }

    /// Core summarize implementation.
    ///
    /// Reads the source in chunks, reassembles lines across chunk
    /// boundaries, folds each record into the table, then writes the
    /// sorted report to `output`.
    pub fn run_reader<R: Read, W: Write>(
        &self,
        reader: R,
        output: &mut W,
    ) -> Result<SummarizeStats> {
        let mut stats = SummarizeStats::default();
        let mut table = SummaryTable::new();

        let mut chunks = ChunkReader::with_capacity(reader, self.chunk_size);
        let mut assembler = LineAssembler::new();

        while let Some(chunk) = chunks.next_chunk()? {
            stats.bytes_read += chunk.len() as u64;
            stats.chunks_read += 1;
            assembler.push(chunk);

            while let Some(line) = assembler.next_line() {
                if line.is_empty() {
                    continue;
                }
                fold_line(line, &mut table, &mut stats);
                if self.progress && stats.lines_seen % PROGRESS_INTERVAL == 0 {
                    eprintln!("Processed {} lines...", stats.lines_seen);
                }
            }
        }

        // Input without a final newline leaves one unterminated line
        if let Some(line) = assembler.take_final() {
            fold_line(line, &mut table, &mut stats);
        }

        stats.unique_stations = table.len();

        let mut writer = SummaryWriter::new(output);
        writer.write_summary(&table)?;
        writer.flush()?;

        Ok(stats)
    }
}

/// Folds one non-empty line into the table, updating counters.
///
/// Malformed values follow the process-wide policy: dropped and
/// counted by default, folded as zero under [`config::is_zero_invalid`].
#[inline(always)]
fn fold_line(line: &[u8], table: &mut SummaryTable, stats: &mut SummarizeStats) {
    stats.lines_seen += 1;
    match parse_line(line) {
        LineParse::Record { key, value } => {
            table.record(key, value);
            stats.records_folded += 1;
        }
        LineParse::NoSeparator => {
            stats.missing_separator += 1;
        }
        LineParse::BadValue { key } => {
            if config::is_zero_invalid() {
                table.record(key, 0);
                stats.zero_defaulted += 1;
                stats.records_folded += 1;
            } else {
                stats.invalid_value += 1;
            }
        }
    }
}

/// Statistics from a summarize run.
#[derive(Debug, Default, Clone)]
pub struct SummarizeStats {
    pub bytes_read: u64,
    pub chunks_read: u64,
    pub lines_seen: u64,
    pub records_folded: u64,
    pub missing_separator: u64,
    pub invalid_value: u64,
    pub zero_defaulted: u64,
    pub unique_stations: usize,
}

impl SummarizeStats {
    /// Lines dropped without touching the table.
    pub fn skipped(&self) -> u64 {
        self.missing_separator + self.invalid_value
    }
}

impl std::fmt::Display for SummarizeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lines: {}, Folded: {}, Stations: {}, No separator: {}, Bad values: {}, Zeroed: {}",
            self.lines_seen,
            self.records_folded,
            self.unique_stations,
            self.missing_separator,
            self.invalid_value,
            self.zero_defaulted
        )
    }
}
