//! Control-object configuration
//!
//! Which ids a caller may touch depends on how the element was provisioned, so
//! the usable range and any reserved ids are configuration rather than
//! constants. Ids are checked here before any command reaches the element.

use std::ops::RangeInclusive;

use crate::model::{ObjectId, ObjectIdError, OverwritePolicy};

/// Object id used by the raw-signature verify helper to hold the caller's
/// public key for the duration of one check
pub const DEFAULT_SCRATCH_OBJECT_ID: u32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementConfig {
    /// Ids the caller may bind
    pub id_range: RangeInclusive<u32>,
    /// Ids inside `id_range` that belong to provisioning
    pub reserved_ids: Vec<RangeInclusive<u32>>,
    /// Behaviour of creating operations on an id already in use
    pub overwrite: OverwritePolicy,
    /// Temporary object for `ecdsa_verify`
    pub scratch_object_id: u32,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            id_range: ObjectId::MIN..=ObjectId::MAX,
            reserved_ids: Vec::new(),
            overwrite: OverwritePolicy::default(),
            scratch_object_id: DEFAULT_SCRATCH_OBJECT_ID,
        }
    }
}

impl ElementConfig {
    /// Validate a caller-supplied id against the element's address space and
    /// this provisioning's reserved ids.
    pub fn object_id(&self, raw: u32) -> Result<ObjectId, ObjectIdError> {
        let id = ObjectId::new(raw)?;
        if !self.id_range.contains(&raw) {
            return Err(ObjectIdError::OutOfRange {
                id: raw,
                min: *self.id_range.start(),
                max: *self.id_range.end(),
            });
        }
        if self.reserved_ids.iter().any(|range| range.contains(&raw)) {
            return Err(ObjectIdError::Reserved { id: raw });
        }
        Ok(id)
    }
}
