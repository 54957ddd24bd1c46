//! Attributes an object handle is bound with

use std::fmt;

/// Which part of a key an object slot holds, or is asked to act as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPart {
    /// Not a key (opaque binary data)
    None,
    /// Private key
    Private,
    /// Public key only
    Public,
    /// Private and public key
    Pair,
}

impl KeyPart {
    /// Whether an object stored as `stored` can serve this role.
    ///
    /// A pair can act as either half; a public-only object never acts as a
    /// private key.
    pub fn accepts(self, stored: KeyPart) -> bool {
        match self {
            KeyPart::Private => matches!(stored, KeyPart::Private | KeyPart::Pair),
            KeyPart::Public => matches!(stored, KeyPart::Public | KeyPart::Pair),
            KeyPart::Pair => stored == KeyPart::Pair,
            KeyPart::None => stored == KeyPart::None,
        }
    }

    pub fn has_private(self) -> bool {
        matches!(self, KeyPart::Private | KeyPart::Pair)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyPart::None => "data",
            KeyPart::Private => "private key",
            KeyPart::Public => "public key",
            KeyPart::Pair => "key pair",
        };
        f.write_str(name)
    }
}

/// Access mode a handle is bound with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectMode {
    /// Object is only read or used
    Read,
    /// Object is created, generated or overwritten
    ReadWrite,
}

impl ObjectMode {
    pub fn is_writable(self) -> bool {
        self == ObjectMode::ReadWrite
    }
}

/// Type tag of the object contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherType {
    /// ECC key on NIST P-256
    EcNistP256,
    /// Opaque binary file
    Binary,
}

impl CipherType {
    /// Key size in bits, `None` for non-key objects
    pub fn key_bits(self) -> Option<usize> {
        match self {
            CipherType::EcNistP256 => Some(256),
            CipherType::Binary => None,
        }
    }
}

impl fmt::Display for CipherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CipherType::EcNistP256 => "NIST P-256",
            CipherType::Binary => "binary",
        };
        f.write_str(name)
    }
}
