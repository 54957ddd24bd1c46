//! KeyStore trait - persistent object commands

use crate::error::Se05xResult;
use crate::model::{ObjectHandle, ObjectId, ObjectInfo};

/// Capability to create, read and erase persistent objects
///
/// Every command except `object_info` and `erase_object` takes a handle
/// produced by the binder. Implementations must still reject a handle whose
/// role does not match the stored object, the way the element firmware does.
pub trait KeyStore {
    /// Look up an object without binding it
    ///
    /// Returns `None` when nothing is stored under `id`.
    fn object_info(&mut self, id: ObjectId) -> Se05xResult<Option<ObjectInfo>>;

    /// Remove an object
    ///
    /// # Errors
    ///
    /// Returns `BindingError::NotFound` if nothing is stored under `id`.
    fn erase_object(&mut self, id: ObjectId) -> Se05xResult<()>;

    /// Generate a fresh key pair into the handle's object, replacing any key
    /// already there
    ///
    /// An object of another type is only replaced through a handle that
    /// [`replaces_existing`](ObjectHandle::replaces_existing), and only once
    /// the new key fits in storage.
    fn generate_key(&mut self, handle: &ObjectHandle) -> Se05xResult<()>;

    /// Read the public encoding of a key, or the contents of a binary object
    ///
    /// Private key material is never returned.
    fn get_key(&mut self, handle: &ObjectHandle) -> Se05xResult<Vec<u8>>;

    /// Store a DER public key or binary contents
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// - The DER encoding is rejected
    /// - Element storage is exhausted
    /// - An object of another type is stored and the handle does not
    ///   replace existing objects
    ///
    /// On any error the previously stored object is left untouched.
    fn set_key(&mut self, handle: &ObjectHandle, data: &[u8]) -> Se05xResult<()>;
}
