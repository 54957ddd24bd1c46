//! The control object and the operations it dispatches
//!
//! `Se05x` owns the session channel and the digest slot. Each operation group
//! lives in its own module as an `impl` block on the same type; every one of
//! them binds the objects it needs through the binder on each call.

mod binder;
mod digest;
mod entropy;
mod keys;
mod object_store;
mod session;
mod signature;

pub use binder::BindRequest;
pub use digest::DigestState;
pub use session::Se05x;
