use tracing::debug;

use super::{BindRequest, Se05x};
use crate::error::Se05xResult;
use crate::logic::write_output;
use crate::model::Verification;
use crate::ports::{AsymmetricUnit, Connector};

impl<C: Connector> Se05x<C> {
    /// ECDSA-sign a precomputed `hash` with the private key at `key_id`,
    /// writing the DER signature to `out`.
    ///
    /// # Errors
    ///
    /// `IncompatibleRole` if `key_id` holds no private key material.
    pub fn sign(&mut self, key_id: u32, hash: &[u8], out: &mut [u8]) -> Se05xResult<usize> {
        let handle = self.bind(key_id, BindRequest::SIGN)?;
        handle.ensure_private()?;

        let signature = self.channel()?.sign_digest(&handle, hash)?;
        debug!("Signed {}-byte hash with {}", hash.len(), handle.id());
        write_output(out, &signature)
    }

    /// Check a DER `signature` over `hash` against the public key at `key_id`
    ///
    /// A signature that does not match is `Ok(Verification::Invalid)`; `Err`
    /// is reserved for failures to perform the check.
    pub fn verify(
        &mut self,
        key_id: u32,
        hash: &[u8],
        signature: &[u8],
    ) -> Se05xResult<Verification> {
        let handle = self.bind(key_id, BindRequest::VERIFY)?;
        handle.ensure_public()?;

        let valid = self.channel()?.verify_digest(&handle, hash, signature)?;
        let verification = Verification::from(valid);
        debug!("Verification with {}: {:?}", handle.id(), verification);
        Ok(verification)
    }
}
