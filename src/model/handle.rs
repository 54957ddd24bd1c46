//! Host-side object descriptors

use crate::error::{BindingError, Se05xResult};

use super::{CipherType, KeyPart, ObjectId, ObjectMode};

/// What the element reports about a stored object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectInfo {
    pub key_part: KeyPart,
    pub cipher: CipherType,
    /// Stored size in bytes (public encoding for keys)
    pub size: usize,
}

/// Descriptor bound to one object id for the duration of one operation
///
/// Handles are only produced by the object binder, so every handle an
/// adapter receives has been validated against the requested role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHandle {
    id: ObjectId,
    key_part: KeyPart,
    mode: ObjectMode,
    cipher: CipherType,
    replace: bool,
}

impl ObjectHandle {
    pub(crate) fn new(id: ObjectId, key_part: KeyPart, mode: ObjectMode, cipher: CipherType) -> Self {
        Self {
            id,
            key_part,
            mode,
            cipher,
            replace: false,
        }
    }

    /// Allow a create command to overwrite an object of a different type.
    ///
    /// The element swaps the object only once the new contents are accepted,
    /// so a rejected command leaves the old object in place.
    pub(crate) fn replacing(mut self) -> Self {
        self.replace = true;
        self
    }

    pub fn replaces_existing(&self) -> bool {
        self.replace
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn key_part(&self) -> KeyPart {
        self.key_part
    }

    pub fn mode(&self) -> ObjectMode {
        self.mode
    }

    pub fn cipher(&self) -> CipherType {
        self.cipher
    }

    /// Fails unless the handle was bound with private key material.
    pub fn ensure_private(&self) -> Se05xResult<()> {
        if self.cipher == CipherType::EcNistP256 && self.key_part.has_private() {
            Ok(())
        } else {
            Err(self.mismatch("private key"))
        }
    }

    /// Fails unless the handle can act as a public key.
    pub fn ensure_public(&self) -> Se05xResult<()> {
        if self.cipher == CipherType::EcNistP256 && self.key_part != KeyPart::None {
            Ok(())
        } else {
            Err(self.mismatch("public key"))
        }
    }

    /// Fails unless the handle was bound for writing.
    pub fn ensure_writable(&self) -> Se05xResult<()> {
        if self.mode.is_writable() {
            Ok(())
        } else {
            Err(self.mismatch("writable object"))
        }
    }

    fn mismatch(&self, expected: &str) -> crate::error::Se05xError {
        BindingError::IncompatibleRole {
            id: self.id,
            expected: expected.to_string(),
            found: format!("{} {} ({:?})", self.cipher, self.key_part, self.mode),
        }
        .into()
    }
}
