//! Generate synthetic measurement datasets for benchmarking.
//!
//! Features:
//! - Embedded city table with per-station base values
//! - Uniform value band around each base, in tenths
//! - Arbitrary station counts (numeric suffixes past the table)
//! - Deterministic reproducibility via seed

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::summary::{Result, SummaryError};

/// Buffer size for I/O operations (8MB for better throughput)
const BUF_SIZE: usize = 8 * 1024 * 1024;

/// Half-width of the value band around each station's base, in tenths.
const VALUE_SPREAD: i64 = 200;

/// Embedded station table: name and base value in tenths.
static STATIONS: &[(&str, i64)] = &[
    ("Abidjan", 260),
    ("Accra", 264),
    ("Amsterdam", 102),
    ("Athens", 192),
    ("Auckland", 152),
    ("Baghdad", 228),
    ("Bangkok", 286),
    ("Barcelona", 182),
    ("Beijing", 129),
    ("Berlin", 103),
    ("Bogota", 143),
    ("Brussels", 105),
    ("Bucharest", 108),
    ("Budapest", 113),
    ("Cairo", 214),
    ("Cape Town", 162),
    ("Casablanca", 184),
    ("Chicago", 98),
    ("Copenhagen", 91),
    ("Dakar", 240),
    ("Dallas", 190),
    ("Denver", 104),
    ("Dublin", 98),
    ("Hamburg", 97),
    ("Helsinki", 59),
    ("Istanbul", 149),
    ("Jakarta", 267),
    ("Johannesburg", 155),
    ("Kingston", 274),
    ("Lagos", 268),
    ("Lima", 180),
    ("Lisbon", 175),
    ("London", 113),
    ("Los Angeles", 186),
    ("Madrid", 150),
    ("Melbourne", 151),
    ("Mexico City", 175),
    ("Miami", 249),
    ("Moscow", 58),
    ("Mumbai", 271),
    ("Nairobi", 175),
    ("New York City", 129),
    ("Oslo", 57),
    ("Ottawa", 66),
    ("Palermo", 185),
    ("Paris", 123),
    ("Prague", 84),
    ("Reykjavik", 44),
    ("Rome", 152),
    ("Seoul", 125),
    ("Singapore", 270),
    ("Stockholm", 66),
    ("Sydney", 177),
    ("Tokyo", 154),
    ("Toronto", 94),
    ("Tromso", 29),
    ("Vienna", 104),
    ("Warsaw", 85),
    ("Wellington", 129),
    ("Zurich", 93),
];

/// Size specification (parses 1K, 1M, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub count: u64,
}

impl SizeSpec {
    /// Parse size from string (e.g., "1K", "5M", "100").
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        if s.is_empty() {
            return None;
        }

        let (num_part, multiplier) = if s.ends_with('K') {
            (&s[..s.len() - 1], 1_000u64)
        } else if s.ends_with('M') {
            (&s[..s.len() - 1], 1_000_000u64)
        } else if s.ends_with('G') {
            (&s[..s.len() - 1], 1_000_000_000u64)
        } else {
            (s.as_str(), 1u64)
        };

        num_part.parse::<u64>().ok().map(|n| Self {
            count: n * multiplier,
        })
    }

    /// Format size for display.
    pub fn display(&self) -> String {
        format_count(self.count)
    }
}

/// Configuration for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output: PathBuf,
    pub count: SizeSpec,
    pub stations: Option<usize>,
    pub seed: u64,
    pub force: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./measurements.txt"),
            count: SizeSpec { count: 1_000_000 },
            stations: None,
            seed: 42,
            force: false,
        }
    }
}

/// Statistics from generate operation.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    pub lines_written: u64,
    pub stations: usize,
    pub bytes_written: u64,
    pub elapsed_secs: f64,
}

impl std::fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines, {} stations, {} bytes ({:.1}s)",
            format_count(self.lines_written),
            self.stations,
            self.bytes_written,
            self.elapsed_secs
        )
    }
}

/// Generate command.
pub struct GenerateCommand {
    config: GenerateConfig,
}

impl GenerateCommand {
    /// Create a new generate command with the given config.
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Run the generation.
    pub fn run(&self) -> Result<GenerateStats> {
        let start = Instant::now();
        let mut stats = GenerateStats::default();

        let path = &self.config.output;
        if path.exists() && !self.config.force {
            return Err(SummaryError::InvalidFormat(format!(
                "output file exists: {} (use --force to overwrite)",
                path.display()
            )));
        }

        let stations = self.station_set()?;
        stats.stations = stations.len();

        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        eprint!("Generating {}... ", path.display());
        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
        stats.bytes_written =
            write_measurements(&mut writer, &stations, self.config.count.count, &mut rng)?;
        writer.flush()?;
        eprintln!("done ({:.1}s)", start.elapsed().as_secs_f64());

        stats.lines_written = self.config.count.count;
        stats.elapsed_secs = start.elapsed().as_secs_f64();
        eprintln!("Complete: {}", stats);

        Ok(stats)
    }

    /// Resolve the distinct station list for this run.
    ///
    /// Counts beyond the embedded table cycle through it with numeric
    /// suffixes, so any requested cardinality stays unique.
    fn station_set(&self) -> Result<Vec<(String, i64)>> {
        let requested = self.config.stations.unwrap_or(STATIONS.len());
        if requested == 0 {
            return Err(SummaryError::InvalidFormat(
                "station count must be positive".to_string(),
            ));
        }

        let mut set = Vec::with_capacity(requested);
        for i in 0..requested {
            let (name, base) = STATIONS[i % STATIONS.len()];
            if i < STATIONS.len() {
                set.push((name.to_string(), base));
            } else {
                set.push((format!("{}-{}", name, i / STATIONS.len()), base));
            }
        }
        Ok(set)
    }
}

/// Write `count` records to `writer`, returning bytes written.
fn write_measurements<W: Write>(
    writer: &mut W,
    stations: &[(String, i64)],
    count: u64,
    rng: &mut SmallRng,
) -> Result<u64> {
    let mut itoa_buf = itoa::Buffer::new();
    let mut bytes = 0u64;

    for _ in 0..count {
        let station = &stations[rng.gen_range(0..stations.len())];
        let value = station.1 + rng.gen_range(-VALUE_SPREAD..=VALUE_SPREAD);

        writer.write_all(station.0.as_bytes())?;
        writer.write_all(b";")?;
        bytes += station.0.len() as u64 + 1;

        if value < 0 {
            writer.write_all(b"-")?;
            bytes += 1;
        }
        let mag = value.unsigned_abs();
        let whole = itoa_buf.format(mag / 10);
        writer.write_all(whole.as_bytes())?;
        writer.write_all(&[b'.', b'0' + (mag % 10) as u8, b'\n'])?;
        bytes += whole.len() as u64 + 3;
    }

    Ok(bytes)
}

/// Format a count for display (e.g., 1000000 -> "1M").
fn format_count(count: u64) -> String {
    if count >= 1_000_000_000 && count % 1_000_000_000 == 0 {
        format!("{}G", count / 1_000_000_000)
    } else if count >= 1_000_000 && count % 1_000_000 == 0 {
        format!("{}M", count / 1_000_000)
    } else if count >= 1_000 && count % 1_000 == 0 {
        format!("{}K", count / 1_000)
    } else {
        count.to_string()
    }
}
