//! Command implementations for sumstat.

pub mod fast_summarize;
pub mod generate;
pub mod summarize;

pub use fast_summarize::{FastSummarizeCommand, FastSummarizeStats};
pub use generate::{GenerateCommand, GenerateConfig, GenerateStats, SizeSpec};
pub use summarize::{SummarizeCommand, SummarizeStats};
