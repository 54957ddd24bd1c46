use super::Se05x;
use crate::error::Se05xResult;
use crate::logic::uniform_below;
use crate::ports::{Connector, RandomSource};

impl<C: Connector> Se05x<C> {
    /// Fill `out` from the element's random number generator.
    ///
    /// `out` is only written once the element has delivered every byte.
    pub fn random_bytes(&mut self, out: &mut [u8]) -> Se05xResult<()> {
        let channel = self.channel()?;
        let mut buffer = vec![0u8; out.len()];
        channel.fill_random(&mut buffer)?;
        out.copy_from_slice(&buffer);
        Ok(())
    }

    /// Uniform value in `[0, max)`; `0` when `max <= 0`
    pub fn random_below(&mut self, max: i64) -> Se05xResult<i64> {
        if max <= 0 {
            self.ensure_connected()?;
            return Ok(0);
        }
        self.random_range(0, max)
    }

    /// Uniform value in `[min, max)`; `min` when the range is empty
    pub fn random_range(&mut self, min: i64, max: i64) -> Se05xResult<i64> {
        let channel = self.channel()?;
        if min >= max {
            return Ok(min);
        }

        // max - min fits in u64 for any pair of i64 values
        let span = (i128::from(max) - i128::from(min)) as u64;
        let offset = uniform_below(span, || {
            let mut draw = [0u8; 8];
            channel.fill_random(&mut draw)?;
            Ok(u64::from_le_bytes(draw))
        })?;

        Ok((i128::from(min) + i128::from(offset)) as i64)
    }
}
