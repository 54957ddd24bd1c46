use tracing::{debug, info};

use super::{BindRequest, Se05x};
use crate::error::Se05xResult;
use crate::logic::{ensure_capacity, public_key_der_to_raw, write_output};
use crate::model::{RawPublicKey, EC_KEY_DER_LENGTH};
use crate::ports::{Connector, KeyStore};

impl<C: Connector> Se05x<C> {
    /// Generate a P-256 key pair at `key_id` and write its DER public key to
    /// `out`, returning the length written.
    ///
    /// # Errors
    ///
    /// A buffer shorter than the P-256 DER encoding fails before the element
    /// is touched, so an existing key at `key_id` survives.
    pub fn generate_private_key(&mut self, key_id: u32, out: &mut [u8]) -> Se05xResult<usize> {
        self.ensure_connected()?;
        ensure_capacity(EC_KEY_DER_LENGTH, out)?;

        let handle = self.bind(key_id, BindRequest::GENERATE_PAIR)?;
        let channel = self.channel()?;
        channel.generate_key(&handle)?;
        let der = channel.get_key(&handle)?;

        info!("Generated P-256 key pair at {}", handle.id());
        write_output(out, &der)
    }

    /// Export the DER public key at `key_id`, either a pair's public half or
    /// an imported public key.
    pub fn generate_public_key(&mut self, key_id: u32, out: &mut [u8]) -> Se05xResult<usize> {
        let handle = self.bind(key_id, BindRequest::EXPORT_PUBLIC)?;
        let der = self.channel()?.get_key(&handle)?;
        debug!("Exported public key of {}", handle.id());
        write_output(out, &der)
    }

    /// Store a DER SubjectPublicKeyInfo at `key_id` as a public-only key.
    pub fn import_public_key(&mut self, key_id: u32, der: &[u8]) -> Se05xResult<()> {
        let handle = self.bind(key_id, BindRequest::IMPORT_PUBLIC)?;
        self.channel()?.set_key(&handle, der)?;
        debug!("Imported public key at {}", handle.id());
        Ok(())
    }

    /// [`generate_private_key`](Self::generate_private_key) returning X || Y
    pub fn generate_private_key_raw(&mut self, key_id: u32) -> Se05xResult<RawPublicKey> {
        let mut der = [0u8; EC_KEY_DER_LENGTH];
        let len = self.generate_private_key(key_id, &mut der)?;
        public_key_der_to_raw(&der[..len])
    }

    /// [`generate_public_key`](Self::generate_public_key) returning X || Y
    pub fn generate_public_key_raw(&mut self, key_id: u32) -> Se05xResult<RawPublicKey> {
        let mut der = [0u8; EC_KEY_DER_LENGTH];
        let len = self.generate_public_key(key_id, &mut der)?;
        public_key_der_to_raw(&der[..len])
    }
}
