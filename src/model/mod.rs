mod handle;
mod key_material;
mod key_part;
mod object_id;
mod policy;

pub use handle::{ObjectHandle, ObjectInfo};
pub use key_material::{
    KeyMaterialError, RawPublicKey, RawSignature, EC_KEY_DER_LENGTH, EC_KEY_RAW_LENGTH,
    EC_SIGNATURE_DER_MAX_LENGTH, EC_SIGNATURE_RAW_LENGTH, SHA256_LENGTH,
};
pub use key_part::{CipherType, KeyPart, ObjectMode};
pub use object_id::{ObjectId, ObjectIdError};
pub use policy::{OverwritePolicy, Verification};
