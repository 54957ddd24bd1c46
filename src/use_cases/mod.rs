//! Use cases (orchestration)
//!
//! This module contains use cases that chain several element operations into
//! message-level ECDSA with raw r || s signatures and X || Y public keys.

mod ec_sign;
mod ecdsa_verify;

pub use ec_sign::ec_sign;
pub use ecdsa_verify::ecdsa_verify;
