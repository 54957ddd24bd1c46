//! Object binder
//!
//! Resolves a caller-supplied id to a handle with the role an operation needs,
//! consulting the element for what is already stored there.

use tracing::debug;

use super::session::connected;
use super::Se05x;
use crate::error::{BindingError, Se05xError, Se05xResult};
use crate::model::{CipherType, KeyPart, ObjectHandle, ObjectId, ObjectInfo, ObjectMode};
use crate::ports::{Connector, KeyStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindIntent {
    /// The object must already exist with a compatible type
    Existing,
    /// The operation creates the object, replacing per the overwrite policy
    Create,
}

/// Role an operation asks the binder for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindRequest {
    pub key_part: KeyPart,
    pub mode: ObjectMode,
    pub cipher: CipherType,
    pub intent: BindIntent,
}

impl BindRequest {
    pub const GENERATE_PAIR: Self = Self::new(
        KeyPart::Pair,
        ObjectMode::ReadWrite,
        CipherType::EcNistP256,
        BindIntent::Create,
    );
    pub const EXPORT_PUBLIC: Self = Self::new(
        KeyPart::Public,
        ObjectMode::Read,
        CipherType::EcNistP256,
        BindIntent::Existing,
    );
    pub const IMPORT_PUBLIC: Self = Self::new(
        KeyPart::Public,
        ObjectMode::ReadWrite,
        CipherType::EcNistP256,
        BindIntent::Create,
    );
    pub const SIGN: Self = Self::new(
        KeyPart::Private,
        ObjectMode::Read,
        CipherType::EcNistP256,
        BindIntent::Existing,
    );
    pub const VERIFY: Self = Self::new(
        KeyPart::Public,
        ObjectMode::Read,
        CipherType::EcNistP256,
        BindIntent::Existing,
    );
    pub const READ_DATA: Self = Self::new(
        KeyPart::None,
        ObjectMode::Read,
        CipherType::Binary,
        BindIntent::Existing,
    );
    pub const WRITE_DATA: Self = Self::new(
        KeyPart::None,
        ObjectMode::ReadWrite,
        CipherType::Binary,
        BindIntent::Create,
    );

    pub const fn new(
        key_part: KeyPart,
        mode: ObjectMode,
        cipher: CipherType,
        intent: BindIntent,
    ) -> Self {
        Self {
            key_part,
            mode,
            cipher,
            intent,
        }
    }

    /// Whether a stored object can be used as-is for this request.
    ///
    /// Reads accept any object that can act in the role (a pair serves as a
    /// public key); creation must find exactly the type it would write.
    fn is_served_by(&self, info: &ObjectInfo) -> bool {
        if info.cipher != self.cipher {
            return false;
        }
        match self.intent {
            BindIntent::Existing => self.key_part.accepts(info.key_part),
            BindIntent::Create => info.key_part == self.key_part,
        }
    }

    fn mismatch(&self, id: ObjectId, info: &ObjectInfo) -> Se05xError {
        BindingError::IncompatibleRole {
            id,
            expected: format!("{} {}", self.cipher, self.key_part),
            found: format!("{} {}", info.cipher, info.key_part),
        }
        .into()
    }
}

impl<C: Connector> Se05x<C> {
    /// Bind `raw_id` for one operation
    ///
    /// # Errors
    ///
    /// - `NotConnected` without a session
    /// - `Domain` if the id is outside the usable range
    /// - `NotFound` / `IncompatibleRole` for an `Existing` request
    /// - `AlreadyExists` for a `Create` request under `OverwritePolicy::Reject`
    ///
    /// Nothing is erased here. A `Create` request over an object of another
    /// type yields a replacing handle, and the element swaps the object when
    /// the command succeeds.
    pub(crate) fn bind(&mut self, raw_id: u32, request: BindRequest) -> Se05xResult<ObjectHandle> {
        let id = self.config.object_id(raw_id);
        let overwrite = self.config.overwrite;
        let channel = connected(&mut self.channel)?;
        let id = id?;

        let handle = ObjectHandle::new(id, request.key_part, request.mode, request.cipher);
        let existing = channel.object_info(id)?;

        match (request.intent, existing) {
            (BindIntent::Existing, None) => Err(BindingError::NotFound { id }.into()),
            (BindIntent::Existing, Some(info)) if request.is_served_by(&info) => Ok(handle),
            (BindIntent::Existing, Some(info)) => Err(request.mismatch(id, &info)),
            (BindIntent::Create, None) => Ok(handle),
            (BindIntent::Create, Some(_)) if !overwrite.allows_replace() => {
                Err(BindingError::AlreadyExists { id }.into())
            }
            (BindIntent::Create, Some(info)) if request.is_served_by(&info) => Ok(handle),
            (BindIntent::Create, Some(info)) => {
                debug!(
                    "Replacing {} {} at {} with {} {}",
                    info.cipher, info.key_part, id, request.cipher, request.key_part
                );
                Ok(handle.replacing())
            }
        }
    }

    /// Validate `raw_id` and return it with the open channel.
    pub(crate) fn resolve(&mut self, raw_id: u32) -> Se05xResult<(ObjectId, &mut C::Channel)> {
        let id = self.config.object_id(raw_id);
        let channel = connected(&mut self.channel)?;
        Ok((id?, channel))
    }
}
