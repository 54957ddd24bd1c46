//! Conversions between the element's DER encodings and raw fixed-width forms
//!
//! Host-side encoding only; no key ever signs or verifies here.

use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::{DecodePublicKey, EncodePublicKey};

use crate::error::{CryptoError, Se05xResult};
use crate::model::{RawPublicKey, RawSignature, EC_KEY_RAW_LENGTH};

const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// DER SubjectPublicKeyInfo to X || Y
pub fn public_key_der_to_raw(der: &[u8]) -> Se05xResult<RawPublicKey> {
    let key = VerifyingKey::from_public_key_der(der).map_err(|e| CryptoError::MalformedKey {
        reason: format!("Invalid P-256 SubjectPublicKeyInfo: {}", e),
    })?;
    let point = key.to_encoded_point(false);
    Ok(RawPublicKey::from_slice(&point.as_bytes()[1..])?)
}

/// X || Y to DER SubjectPublicKeyInfo
pub fn public_key_raw_to_der(raw: &RawPublicKey) -> Se05xResult<Vec<u8>> {
    let mut sec1 = [0u8; EC_KEY_RAW_LENGTH + 1];
    sec1[0] = SEC1_UNCOMPRESSED_TAG;
    sec1[1..].copy_from_slice(raw.as_bytes());

    let key = VerifyingKey::from_sec1_bytes(&sec1).map_err(|e| CryptoError::MalformedKey {
        reason: format!("Point not on P-256: {}", e),
    })?;
    let der = key
        .to_public_key_der()
        .map_err(|e| CryptoError::MalformedKey {
            reason: format!("Failed to encode public key: {}", e),
        })?;
    Ok(der.as_bytes().to_vec())
}

/// DER ECDSA-Sig-Value to r || s
pub fn signature_der_to_raw(der: &[u8]) -> Se05xResult<RawSignature> {
    let signature = Signature::from_der(der).map_err(|e| CryptoError::MalformedSignature {
        reason: format!("Invalid DER signature: {}", e),
    })?;
    Ok(RawSignature::from_slice(&signature.to_bytes())?)
}

/// r || s to DER ECDSA-Sig-Value
pub fn signature_raw_to_der(raw: &RawSignature) -> Se05xResult<Vec<u8>> {
    let signature =
        Signature::from_slice(raw.as_bytes()).map_err(|e| CryptoError::MalformedSignature {
            reason: format!("Invalid r || s signature: {}", e),
        })?;
    Ok(signature.to_der().as_bytes().to_vec())
}
