// Clippy allows for the whole crate
#![allow(clippy::should_implement_trait)]

//! sumstat: streaming per-station summaries of delimited measurement files
//!
//! This library folds `<key>;<value>` lines into per-key min/mean/max
//! statistics and renders one sorted report line past the end.
//!
//! # Features
//!
//! - **Streaming I/O**: Fixed-size chunks, memory bounded by distinct keys
//! - **Fixed-point arithmetic**: Values carried as integers in tenths
//! - **Parallel processing**: Optional mmap-backed sharding via Rayon
//!
//! # Example
//!
//! ```rust,no_run
//! use sumstat::summarize_path;
//!
//! let report = summarize_path("measurements.txt").unwrap();
//! println!("{}", report);
//! ```

pub mod aggregate;
pub mod commands;
pub mod config;
pub mod streaming;
pub mod summary;

// Re-export commonly used types
pub use aggregate::{StationStats, SummaryTable};
pub use summary::{summarize_path, summarize_reader, summarize_str, Result, SummaryError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{StationStats, SummaryTable};
    pub use crate::commands::{FastSummarizeCommand, GenerateCommand, SummarizeCommand};
    pub use crate::streaming::{ChunkReader, LineAssembler, SummaryWriter};
    pub use crate::summary::{summarize_path, summarize_reader, summarize_str, SummaryError};
}
