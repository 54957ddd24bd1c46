use crate::error::Se05xResult;

/// Element hardware RNG
pub trait RandomSource {
    /// Fill all of `out`, or fail without a partial result
    fn fill_random(&mut self, out: &mut [u8]) -> Se05xResult<()>;
}
