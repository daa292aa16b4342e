//! Parallel summarization using memory-mapped I/O and sharding.
//!
//! Optimizations:
//! - Memory-mapped file I/O for zero-copy access
//! - Per-worker shards cut on line boundaries, folded independently
//! - One table merge per shard instead of any cross-thread locking
//! - Same zero-allocation parser as the streaming path
//!
//! The report is byte-identical to the streaming path: fold order
//! differs across shards, but min/max/sum/count are order-free.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use memchr::memchr;
use memmap2::Mmap;
use rayon::prelude::*;

use crate::aggregate::SummaryTable;
use crate::config;
use crate::streaming::parsing::{parse_line, LineParse};
use crate::streaming::SummaryWriter;
use crate::summary::Result;

/// Minimum file size to use mmap (smaller files are read whole)
const MMAP_THRESHOLD: usize = 64 * 1024;

/// Parallel summarize command.
#[derive(Debug, Clone)]
pub struct FastSummarizeCommand {
    /// Number of shards; 0 means one per rayon worker.
    pub shards: usize,
}

impl Default for FastSummarizeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl FastSummarizeCommand {
    pub fn new() -> Self {
        Self { shards: 0 }
    }

    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Run parallel summarize on a file.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<FastSummarizeStats> {
        let path = input_path.as_ref();
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        let file_size = metadata.len() as usize;

        if file_size >= MMAP_THRESHOLD {
            // Use memory-mapped I/O for large files
            let mmap = unsafe { Mmap::map(&file)? };
            self.summarize_slice(&mmap, true, output)
        } else {
            // Small files are read whole and handled identically
            self.summarize_buffered(file, output)
        }
    }

    /// Run parallel summarize from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<FastSummarizeStats> {
        let stdin = io::stdin();
        self.summarize_buffered(stdin.lock(), output)
    }

    /// Read everything into memory, then shard as for mmap.
    pub fn summarize_buffered<R: Read, W: Write>(
        &self,
        mut reader: R,
        output: &mut W,
    ) -> Result<FastSummarizeStats> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.summarize_slice(&data, false, output)
    }

    fn summarize_slice<W: Write>(
        &self,
        data: &[u8],
        used_mmap: bool,
        output: &mut W,
    ) -> Result<FastSummarizeStats> {
        let mut stats = FastSummarizeStats {
            used_mmap,
            ..Default::default()
        };
        stats.bytes_read = data.len() as u64;

        let shard_count = if self.shards == 0 {
            rayon::current_num_threads()
        } else {
            self.shards
        };
        let bounds = shard_bounds(data, shard_count);
        stats.shards = bounds.len();

        // Snapshot the policy once so every shard folds the same way
        let zero_invalid = config::is_zero_invalid();

        let results: Vec<(SummaryTable, ShardCounts)> = bounds
            .par_iter()
            .map(|&(start, end)| fold_shard(&data[start..end], zero_invalid))
            .collect();

        let mut table = SummaryTable::new();
        for (shard_table, counts) in results {
            table.merge(shard_table);
            stats.lines_seen += counts.lines_seen;
            stats.records_folded += counts.records_folded;
            stats.missing_separator += counts.missing_separator;
            stats.invalid_value += counts.invalid_value;
            stats.zero_defaulted += counts.zero_defaulted;
        }
        stats.unique_stations = table.len();

        let mut writer = SummaryWriter::new(output);
        writer.write_summary(&table)?;
        writer.flush()?;

        Ok(stats)
    }
}

/// Splits data into at most `shards` ranges, each ending just after a
/// newline (except the last, which takes the unterminated tail).
///
/// Seed positions are spaced evenly, then advanced to the next line
/// boundary, so no line is ever split across shards and every byte
/// lands in exactly one range.
fn shard_bounds(data: &[u8], shards: usize) -> Vec<(usize, usize)> {
    let len = data.len();
    if len == 0 {
        return Vec::new();
    }
    let shards = shards.max(1);
    let mut bounds = Vec::with_capacity(shards);
    let mut start = 0;

    for i in 1..=shards {
        let mut end = len * i / shards;
        if i < shards {
            match memchr(b'\n', &data[end..]) {
                Some(offset) => end += offset + 1,
                None => end = len,
            }
        } else {
            end = len;
        }
        if end <= start {
            continue;
        }
        bounds.push((start, end));
        start = end;
        if start >= len {
            break;
        }
    }

    bounds
}

/// Folds one shard's lines into a fresh table.
fn fold_shard(data: &[u8], zero_invalid: bool) -> (SummaryTable, ShardCounts) {
    let mut table = SummaryTable::new();
    let mut counts = ShardCounts::default();
    let mut pos = 0;

    while pos < data.len() {
        let line = match memchr(b'\n', &data[pos..]) {
            Some(offset) => {
                let line = &data[pos..pos + offset];
                pos += offset + 1;
                line
            }
            None => {
                let line = &data[pos..];
                pos = data.len();
                line
            }
        };
        if line.is_empty() {
            continue;
        }
        counts.lines_seen += 1;
        match parse_line(line) {
            LineParse::Record { key, value } => {
                table.record(key, value);
                counts.records_folded += 1;
            }
            LineParse::NoSeparator => {
                counts.missing_separator += 1;
            }
            LineParse::BadValue { key } => {
                if zero_invalid {
                    table.record(key, 0);
                    counts.zero_defaulted += 1;
                    counts.records_folded += 1;
                } else {
                    counts.invalid_value += 1;
                }
            }
        }
    }

    (table, counts)
}

/// Per-shard counters, summed into the run stats after the merge.
#[derive(Debug, Default)]
struct ShardCounts {
    lines_seen: u64,
    records_folded: u64,
    missing_separator: u64,
    invalid_value: u64,
    zero_defaulted: u64,
}

/// Statistics from a parallel summarize run.
#[derive(Debug, Default, Clone)]
pub struct FastSummarizeStats {
    pub bytes_read: u64,
    pub lines_seen: u64,
    pub records_folded: u64,
    pub missing_separator: u64,
    pub invalid_value: u64,
    pub zero_defaulted: u64,
    pub unique_stations: usize,
    pub shards: usize,
    pub used_mmap: bool,
}

impl std::fmt::Display for FastSummarizeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lines: {}, Folded: {}, Stations: {}, Shards: {}, Mmap: {}",
            self.lines_seen,
            self.records_folded,
            self.unique_stations,
            self.shards,
            if self.used_mmap { "yes" } else { "no" }
        )
    }
}
