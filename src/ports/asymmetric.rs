//! AsymmetricUnit trait - ECDSA over a caller-supplied digest

use crate::error::Se05xResult;
use crate::model::ObjectHandle;

pub trait AsymmetricUnit {
    /// Sign `digest` with the private key behind `handle`
    ///
    /// # Returns
    ///
    /// The DER encoded ECDSA signature
    fn sign_digest(&mut self, handle: &ObjectHandle, digest: &[u8]) -> Se05xResult<Vec<u8>>;

    /// Check a DER signature over `digest`
    ///
    /// `Ok(false)` means the element evaluated the signature and it did not
    /// match; `Err` means the check could not be carried out.
    fn verify_digest(
        &mut self,
        handle: &ObjectHandle,
        digest: &[u8],
        signature: &[u8],
    ) -> Se05xResult<bool>;
}
