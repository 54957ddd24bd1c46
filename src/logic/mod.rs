mod bounded;
mod der;
mod output;

pub use bounded::{uniform_below, MAX_RANDOM_DRAWS};
pub use der::{
    public_key_der_to_raw, public_key_raw_to_der, signature_der_to_raw, signature_raw_to_der,
};
pub use output::{ensure_capacity, write_output};
