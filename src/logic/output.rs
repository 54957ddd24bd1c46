//! Caller buffer contract
//!
//! The caller's slice length is the capacity. Capacity is checked before the
//! first byte is copied; on failure the slice is left untouched.

use crate::error::{CapacityError, Se05xResult};

pub fn ensure_capacity(required: usize, out: &[u8]) -> Se05xResult<()> {
    if out.len() < required {
        return Err(CapacityError::BufferTooSmall {
            required,
            available: out.len(),
        }
        .into());
    }
    Ok(())
}

/// Copy `data` to the front of `out` and return the produced length.
pub fn write_output(out: &mut [u8], data: &[u8]) -> Se05xResult<usize> {
    ensure_capacity(data.len(), out)?;
    out[..data.len()].copy_from_slice(data);
    Ok(data.len())
}
