//! Error types for se05x library
//!
//! This module defines the error hierarchy for all secure element operations.
//! Errors are grouped by the layer that detects them, so a caller can tell a
//! dropped session apart from a wrong object role or a short buffer.

use thiserror::Error;

use crate::model::{KeyMaterialError, ObjectId, ObjectIdError};

/// Result type alias for se05x operations
///
/// This is a convenience alias for `Result<T, Se05xError>`.
pub type Se05xResult<T> = Result<T, Se05xError>;

/// Top-level error type for all se05x operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Se05xError {
    /// Session or transport errors
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Object id / role resolution errors
    #[error("Object binding error: {0}")]
    Binding(#[from] BindingError),

    /// Output buffer or element storage exhausted
    #[error("Capacity error: {0}")]
    Capacity(#[from] CapacityError),

    /// Operation issued out of sequence
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Cryptographic operation errors
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// Domain validation errors
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),
}

impl Se05xError {
    /// True when the failure came from the session itself rather than from the
    /// request. Closing and re-opening the session is the only recovery.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Se05xError::Connection(_))
    }
}

/// Session and transport errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// No session has been established, or it was closed
    #[error("Secure element not connected - call begin() first")]
    NotConnected,

    /// Opening the session failed
    #[error("Failed to open secure element session: {reason}")]
    SessionOpenFailed { reason: String },

    /// Command channel failed mid-operation
    #[error("Secure element transport failure: {reason}")]
    Transport { reason: String },
}

/// Object binding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// No object stored under the id
    #[error("No object found with id {id}")]
    NotFound { id: ObjectId },

    /// Object exists but cannot serve the requested role
    #[error("Object {id} cannot be used as {expected} (stored as {found})")]
    IncompatibleRole {
        id: ObjectId,
        expected: String,
        found: String,
    },

    /// Object exists and the overwrite policy forbids replacing it
    #[error("Object {id} already exists and overwrite is disabled")]
    AlreadyExists { id: ObjectId },
}

/// Capacity errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// Caller output buffer too small; nothing was written
    #[error("Output buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall { required: usize, available: usize },

    /// Element persistent storage exhausted
    #[error("Secure element storage full: {requested} bytes requested, {available} available")]
    ElementFull { requested: usize, available: usize },
}

/// Digest state machine errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// update/end issued without an active digest
    #[error("No SHA-256 digest in progress - call begin_sha256() first")]
    DigestNotActive,

    /// begin or one-shot digest issued while another digest is running
    #[error("A SHA-256 digest is already in progress")]
    DigestAlreadyActive,
}

/// Cryptographic operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key generation failed
    #[error("Failed to generate key: {reason}")]
    KeyGenerationFailed { reason: String },

    /// Signature generation failed
    #[error("Failed to generate signature: {reason}")]
    SignatureFailed { reason: String },

    /// Key material could not be decoded
    #[error("Malformed key: {reason}")]
    MalformedKey { reason: String },

    /// Signature could not be decoded
    #[error("Malformed signature: {reason}")]
    MalformedSignature { reason: String },

    /// RNG kept producing unusable output
    #[error("Random source unavailable after {attempts} draws")]
    RandomUnavailable { attempts: usize },
}

/// Domain validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Object id validation error
    #[error("Object id error: {0}")]
    ObjectId(#[from] ObjectIdError),

    /// Raw key or signature has the wrong shape
    #[error("Key material error: {0}")]
    KeyMaterial(#[from] KeyMaterialError),
}

impl From<ObjectIdError> for Se05xError {
    fn from(err: ObjectIdError) -> Self {
        Se05xError::Domain(DomainError::ObjectId(err))
    }
}

impl From<KeyMaterialError> for Se05xError {
    fn from(err: KeyMaterialError) -> Self {
        Se05xError::Domain(DomainError::KeyMaterial(err))
    }
}
