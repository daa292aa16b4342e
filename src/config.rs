//! Global configuration for sumstat runtime behavior.
//!
//! This module provides thread-safe global configuration that affects
//! how malformed values are folded, without adding overhead to hot
//! loops.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for zero-defaulting unparseable values.
///
/// When enabled, a line whose value side fails to parse is folded as
/// `0.0` under its key instead of being dropped. This reproduces the
/// behavior of tools that coerce junk values to zero.
///
/// This is set once at startup and read while folding lines. The
/// atomic load has negligible overhead compared to the actual parsing
/// work.
static ZERO_INVALID: AtomicBool = AtomicBool::new(false);

/// Enable zero-invalid mode.
///
/// When enabled, unparseable values are folded as `0.0` under their
/// key. The default is to drop such lines and count them in the run
/// statistics.
///
/// # Example
///
/// ```
/// use sumstat::config;
///
/// // Enable at startup before any folding
/// config::set_zero_invalid(true);
///
/// // A line like `Oslo;abc` now folds as `Oslo;0.0`
/// ```
#[inline]
pub fn set_zero_invalid(enabled: bool) {
    ZERO_INVALID.store(enabled, Ordering::Release);
}

/// Check if zero-invalid mode is enabled.
///
/// This function is called when a value fails to parse, never on the
/// well-formed fast path.
#[inline]
pub fn is_zero_invalid() -> bool {
    ZERO_INVALID.load(Ordering::Acquire)
}
