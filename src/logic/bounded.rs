//! Unbiased bounded integers from a raw 64-bit random stream
//!
//! Reducing a 64-bit draw modulo `span` favours small results whenever
//! `span` does not divide 2^64. Draws below `2^64 mod span` are rejected, which
//! leaves a multiple of `span` equally likely values, so the reduction is
//! exact. At most half of all draws are rejected for any span.

use crate::error::{CryptoError, Se05xResult};

/// Draws attempted before the source is declared broken
pub const MAX_RANDOM_DRAWS: usize = 64;

/// Uniform value in `[0, span)`. `span` must be non-zero.
pub fn uniform_below<F>(span: u64, mut draw: F) -> Se05xResult<u64>
where
    F: FnMut() -> Se05xResult<u64>,
{
    debug_assert!(span > 0);
    let threshold = span.wrapping_neg() % span;

    for _ in 0..MAX_RANDOM_DRAWS {
        let value = draw()?;
        if value >= threshold {
            return Ok(value % span);
        }
    }

    Err(CryptoError::RandomUnavailable {
        attempts: MAX_RANDOM_DRAWS,
    }
    .into())
}
