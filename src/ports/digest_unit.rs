//! DigestUnit trait - element-side SHA-256

use crate::error::Se05xResult;
use crate::model::SHA256_LENGTH;

/// Capability to hash on the element
///
/// The element keeps a single digest context. Sequencing is the caller's
/// job; implementations only report what the element does.
pub trait DigestUnit {
    fn digest_init(&mut self) -> Se05xResult<()>;

    fn digest_update(&mut self, data: &[u8]) -> Se05xResult<()>;

    /// Finalize and release the context
    fn digest_finish(&mut self) -> Se05xResult<[u8; SHA256_LENGTH]>;

    /// Release the context without producing output
    fn digest_free(&mut self);

    fn digest_one_go(&mut self, data: &[u8]) -> Se05xResult<[u8; SHA256_LENGTH]>;
}
