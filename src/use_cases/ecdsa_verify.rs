//! Raw signature verification use case
//!
//! Checks a raw r || s signature over a message against a raw X || Y public
//! key, using the element for hashing and verification. The key is held in the
//! configured scratch object for the duration of the check. An object already
//! stored at the scratch id is never overwritten.

use tracing::{debug, warn};

use crate::domain::Se05x;
use crate::error::{BindingError, Se05xResult};
use crate::logic::{public_key_raw_to_der, signature_raw_to_der};
use crate::model::{RawPublicKey, RawSignature, Verification, SHA256_LENGTH};
use crate::ports::Connector;

/// Verify `signature` over `message` with `public_key`
///
/// This function orchestrates the complete verification workflow:
/// 1. Encode the public key and signature as DER
/// 2. SHA-256 the message on the element
/// 3. Check that the scratch id is free
/// 4. Import the public key into the scratch object
/// 5. Verify on the element
/// 6. Delete the scratch object, whatever the outcome of step 5
///
/// A signature whose r or s is out of range cannot match any message and is
/// reported as `Verification::Invalid`.
///
/// # Errors
///
/// Returns errors if:
/// - The element is not connected
/// - `public_key` is not a point on P-256
/// - The scratch id already holds an object (`AlreadyExists`)
/// - The scratch object cannot be written or removed
pub fn ecdsa_verify<C: Connector>(
    element: &mut Se05x<C>,
    message: &[u8],
    signature: &RawSignature,
    public_key: &RawPublicKey,
) -> Se05xResult<Verification> {
    let scratch = element.config().scratch_object_id;
    let key_der = public_key_raw_to_der(public_key)?;
    let Ok(signature_der) = signature_raw_to_der(signature) else {
        element.ensure_connected()?;
        debug!("Signature scalars out of range");
        return Ok(Verification::Invalid);
    };

    let mut digest = [0u8; SHA256_LENGTH];
    element.sha256(message, &mut digest)?;

    if element.object_exists(scratch)? {
        warn!("Scratch object {} is occupied, refusing to overwrite it", scratch);
        let id = element.config().object_id(scratch)?;
        return Err(BindingError::AlreadyExists { id }.into());
    }

    element.import_public_key(scratch, &key_der)?;
    let outcome = element.verify(scratch, &digest, &signature_der);
    let cleanup = element.delete_object(scratch);
    if let Err(e) = &cleanup {
        warn!("Failed to remove scratch key at {}: {}", scratch, e);
    }

    let verification = outcome?;
    cleanup?;
    Ok(verification)
}
