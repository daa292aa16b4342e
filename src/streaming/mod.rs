//! Centralized streaming utilities for sumstat.
//!
//! This module provides the shared pipeline components:
//! - Fixed-capacity chunk reading
//! - Line reassembly across chunk boundaries
//! - Zero-allocation record parsing
//! - Fixed-point summary output
//!
//! Memory stays O(chunk + longest line + distinct keys) no matter how
//! large the input is.

pub mod buffers;
pub mod chunks;
pub mod lines;
pub mod output;
pub mod parsing;

pub use chunks::ChunkReader;
pub use lines::LineAssembler;
pub use output::SummaryWriter;
pub use parsing::{parse_fixed, parse_line, split_record, LineParse};
