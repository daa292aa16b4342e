//! Line reassembly across chunk boundaries.
//!
//! Chunks are cut at arbitrary byte offsets, so the last line of a
//! chunk is usually incomplete. [`LineAssembler`] buffers that partial
//! tail and prepends it to the next chunk, yielding only complete
//! lines in input order.

use memchr::memchr;

use crate::streaming::buffers::DEFAULT_CARRY_BUFFER;

/// Reassembles newline-terminated lines from a stream of chunks.
///
/// Consumed bytes are tracked by offset and reclaimed once per
/// [`push`](LineAssembler::push), so total work stays linear in input
/// size. Memory is bounded by the longest line plus one chunk.
///
/// # Example
///
/// ```
/// use sumstat::streaming::LineAssembler;
///
/// let mut lines = LineAssembler::new();
/// lines.push(b"Hamburg;12.0\nBer");
/// assert_eq!(lines.next_line(), Some(&b"Hamburg;12.0"[..]));
/// assert_eq!(lines.next_line(), None);
/// lines.push(b"lin;5.5\n");
/// assert_eq!(lines.next_line(), Some(&b"Berlin;5.5"[..]));
/// ```
#[derive(Debug)]
pub struct LineAssembler {
    buf: Vec<u8>,
    pos: usize,
}

impl LineAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        LineAssembler {
            buf: Vec::with_capacity(DEFAULT_CARRY_BUFFER),
            pos: 0,
        }
    }

    /// Appends a chunk, first discarding bytes already consumed.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.pos > 0 {
            let len = self.buf.len();
            self.buf.copy_within(self.pos..len, 0);
            self.buf.truncate(len - self.pos);
            self.pos = 0;
        }
        self.buf.extend_from_slice(chunk);
    }

    /// Returns the next complete line without its `\n`, or `None` if
    /// no full line is buffered.
    ///
    /// Empty lines are returned as empty slices; callers decide
    /// whether to skip them.
    #[inline]
    pub fn next_line(&mut self) -> Option<&[u8]> {
        match memchr(b'\n', &self.buf[self.pos..]) {
            Some(i) => {
                let start = self.pos;
                self.pos = start + i + 1;
                Some(&self.buf[start..start + i])
            }
            None => None,
        }
    }

    /// Consumes the unterminated tail left after the last chunk.
    ///
    /// Returns `None` if the input ended on a newline. Call once, after
    /// end of input.
    pub fn take_final(&mut self) -> Option<&[u8]> {
        if self.pos >= self.buf.len() {
            None
        } else {
            let start = self.pos;
            self.pos = self.buf.len();
            Some(&self.buf[start..])
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
