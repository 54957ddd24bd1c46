use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

/// Identifier of a persistent object slot on the secure element
///
/// Ids are chosen by the caller and are stable across power cycles. The
/// element addresses 31-bit ids; the top 64Ki ids below `0x8000_0000` are
/// reserved by the vendor for applet-internal objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Lowest addressable id
    pub const MIN: u32 = 0x0000_0001;

    /// Highest addressable id
    pub const MAX: u32 = 0x7FFF_FFFF;

    /// Ids the vendor keeps for itself
    pub const VENDOR_RESERVED: RangeInclusive<u32> = 0x7FFF_0000..=0x7FFF_FFFF;

    pub fn new(raw: u32) -> Result<Self, ObjectIdError> {
        if raw == 0 {
            return Err(ObjectIdError::Zero);
        }
        if raw > Self::MAX {
            return Err(ObjectIdError::OutOfRange {
                id: raw,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        if Self::VENDOR_RESERVED.contains(&raw) {
            return Err(ObjectIdError::Reserved { id: raw });
        }
        Ok(Self(raw))
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl TryFrom<u32> for ObjectId {
    type Error = ObjectIdError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdError {
    #[error("Object id 0 is not addressable")]
    Zero,

    #[error("Object id 0x{id:08X} outside addressable range 0x{min:08X}..=0x{max:08X}")]
    OutOfRange { id: u32, min: u32, max: u32 },

    #[error("Object id 0x{id:08X} is reserved")]
    Reserved { id: u32 },
}
