//! Ports (traits) for the secure element command channel
//!
//! These traits define the commands the control object needs from an open
//! session. They represent ports in hexagonal architecture - the core depends
//! on these abstractions, not on a particular transport or on hardware.

mod asymmetric;
mod connector;
mod digest_unit;
mod element_info;
mod key_store;
mod random_source;

pub use asymmetric::AsymmetricUnit;
pub use connector::Connector;
pub use digest_unit::DigestUnit;
pub use element_info::ElementInfo;
pub use key_store::KeyStore;
pub use random_source::RandomSource;

/// Combined trait for an open session
///
/// This trait combines all command groups into a single interface.
/// A channel handle typically implements this.
pub trait ElementChannel: KeyStore + DigestUnit + AsymmetricUnit + RandomSource + ElementInfo {}

// Blanket implementation for types that implement all command traits
impl<T> ElementChannel for T where T: KeyStore + DigestUnit + AsymmetricUnit + RandomSource + ElementInfo {}
