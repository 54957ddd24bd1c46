use std::fmt;
use thiserror::Error;

/// SHA-256 output length
pub const SHA256_LENGTH: usize = 32;

/// P-256 public key as uncompressed X || Y
pub const EC_KEY_RAW_LENGTH: usize = 64;

/// P-256 public key as DER SubjectPublicKeyInfo
pub const EC_KEY_DER_LENGTH: usize = 91;

/// ECDSA P-256 signature as r || s
pub const EC_SIGNATURE_RAW_LENGTH: usize = 64;

/// Upper bound of a DER ECDSA P-256 signature
pub const EC_SIGNATURE_DER_MAX_LENGTH: usize = 72;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawPublicKey([u8; EC_KEY_RAW_LENGTH]);

impl RawPublicKey {
    pub const fn new(bytes: [u8; EC_KEY_RAW_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(key: &[u8]) -> Result<Self, KeyMaterialError> {
        if key.len() != EC_KEY_RAW_LENGTH {
            return Err(KeyMaterialError::InvalidLength {
                expected: EC_KEY_RAW_LENGTH,
                actual: key.len(),
            });
        }
        let mut bytes = [0u8; EC_KEY_RAW_LENGTH];
        bytes.copy_from_slice(key);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_array(&self) -> &[u8; EC_KEY_RAW_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for RawPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawPublicKey({})", hex::encode(&self.0[..8]))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawSignature([u8; EC_SIGNATURE_RAW_LENGTH]);

impl RawSignature {
    pub const fn new(bytes: [u8; EC_SIGNATURE_RAW_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(sig: &[u8]) -> Result<Self, KeyMaterialError> {
        if sig.len() != EC_SIGNATURE_RAW_LENGTH {
            return Err(KeyMaterialError::InvalidLength {
                expected: EC_SIGNATURE_RAW_LENGTH,
                actual: sig.len(),
            });
        }
        let mut bytes = [0u8; EC_SIGNATURE_RAW_LENGTH];
        bytes.copy_from_slice(sig);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_array(&self) -> &[u8; EC_SIGNATURE_RAW_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawSignature({})", hex::encode(&self.0[..8]))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterialError {
    #[error("Key material must be exactly {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
