//! Message signing use case
//!
//! Hashes a message on the element and signs the digest with a stored key,
//! returning the signature in raw form.

use tracing::debug;

use crate::domain::Se05x;
use crate::error::Se05xResult;
use crate::logic::signature_der_to_raw;
use crate::model::{RawSignature, EC_SIGNATURE_DER_MAX_LENGTH, SHA256_LENGTH};
use crate::ports::Connector;

/// Sign `message` with the private key at `key_id`
///
/// This function orchestrates the complete signing workflow:
/// 1. SHA-256 the message on the element
/// 2. Sign the digest with the key at `key_id`
/// 3. Convert the DER signature to r || s
///
/// # Errors
///
/// Returns errors if:
/// - The element is not connected
/// - `key_id` holds no private key
/// - The element returns a malformed signature
pub fn ec_sign<C: Connector>(
    element: &mut Se05x<C>,
    key_id: u32,
    message: &[u8],
) -> Se05xResult<RawSignature> {
    let mut digest = [0u8; SHA256_LENGTH];
    element.sha256(message, &mut digest)?;

    let mut der = [0u8; EC_SIGNATURE_DER_MAX_LENGTH];
    let len = element.sign(key_id, &digest, &mut der)?;
    debug!("Signed {}-byte message with key {}", message.len(), key_id);

    signature_der_to_raw(&der[..len])
}
