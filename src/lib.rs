//! Control object for an SE05X-style secure element
//!
//! [`Se05x`] owns a session with the element and exposes key generation and
//! import, SHA-256 (streaming and one-shot), ECDSA P-256 sign/verify on
//! element-held keys, binary object storage and the element's random number
//! generator. Private keys never leave the element.
//!
//! The element is reached through a [`ports::Connector`]; the crate ships a
//! software [`SimulatedConnector`] with the same object rules as hardware.
//!
//! ```
//! use se05x::{ec_sign, ecdsa_verify, Verification};
//!
//! let mut element = se05x::api::connect_simulated()?;
//! let public_key = element.generate_private_key_raw(0x100)?;
//! let signature = ec_sign(&mut element, 0x100, b"hello")?;
//!
//! let verification = ecdsa_verify(&mut element, b"hello", &signature, &public_key)?;
//! assert_eq!(verification, Verification::Valid);
//! # Ok::<(), se05x::Se05xError>(())
//! ```

mod adapters;
pub mod api;
pub mod config;
mod domain;
pub mod error;
pub mod logic;
pub mod model;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use adapters::{SimulatedConnector, SimulatedElement, SimulatorConfig};
pub use config::ElementConfig;
pub use domain::{DigestState, Se05x};
pub use error::{Se05xError, Se05xResult};
pub use model::{
    ObjectId, OverwritePolicy, RawPublicKey, RawSignature, Verification, EC_KEY_DER_LENGTH,
    EC_SIGNATURE_DER_MAX_LENGTH, SHA256_LENGTH,
};
pub use use_cases::{ec_sign, ecdsa_verify};
