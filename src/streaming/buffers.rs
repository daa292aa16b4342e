//! Buffer size constants for streaming operations.
//!
//! These constants control memory usage vs I/O throughput tradeoffs.
//! The default sizes balance good performance with reasonable memory usage.

/// Default read chunk size (8 MB).
/// Measurement files run to billions of lines; large sequential reads
/// keep the syscall count low while holding at most one chunk in memory.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Low-memory read chunk size (256 KB).
/// Use this when memory is extremely constrained.
pub const LOW_MEMORY_CHUNK_SIZE: usize = 256 * 1024;

/// Default output buffer size (1 MB).
/// The summary is a single line; this covers even very large key sets
/// without reallocation.
pub const DEFAULT_OUTPUT_BUFFER: usize = 1024 * 1024;

/// Default carry buffer capacity (1 KB).
/// Sufficient for the partial line left behind at a chunk boundary.
pub const DEFAULT_CARRY_BUFFER: usize = 1024;

/// Returns the appropriate chunk size based on low_memory flag.
#[inline]
pub const fn chunk_size(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_CHUNK_SIZE
    } else {
        DEFAULT_CHUNK_SIZE
    }
}
