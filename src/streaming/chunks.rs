//! Fixed-capacity chunk reading for measurement streams.
//!
//! Input files are consumed in large bounded reads rather than
//! line-buffered I/O. A chunk boundary carries no meaning: it may fall
//! anywhere inside a line, and callers feed each chunk to a
//! [`LineAssembler`](crate::streaming::LineAssembler) to recover
//! complete lines.

use std::io::{self, Read};

use crate::streaming::buffers::DEFAULT_CHUNK_SIZE;
use crate::summary::Result;

/// Reads a byte stream in chunks of at most a fixed capacity.
///
/// A short read simply yields a shorter chunk; only a zero-length read
/// signals end of input.
pub struct ChunkReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: Read> ChunkReader<R> {
    /// Creates a reader with the default chunk capacity.
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CHUNK_SIZE)
    }

    /// Creates a reader with an explicit chunk capacity.
    ///
    /// Capacity must be non-zero; a zero capacity would make every read
    /// look like end of input.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        ChunkReader {
            inner,
            buf: vec![0u8; capacity],
        }
    }

    /// Returns the next chunk, or `None` at end of input.
    ///
    /// The returned slice is valid until the next call. Interrupted
    /// reads are retried.
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(&self.buf[..n])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
