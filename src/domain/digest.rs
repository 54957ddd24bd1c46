//! Digest engine
//!
//! The element has a single SHA-256 context. The control object tracks its
//! state so that misuse is caught locally and the element context is freed
//! whenever a streaming digest is abandoned.

use tracing::{debug, warn};

use super::session::connected;
use super::Se05x;
use crate::error::{Se05xResult, StateError};
use crate::logic::{ensure_capacity, write_output};
use crate::model::SHA256_LENGTH;
use crate::ports::{Connector, DigestUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestState {
    /// No digest in progress
    #[default]
    Idle,
    /// A streaming digest is accumulating input
    Active,
    /// A streaming digest was misused or failed; a new one must be begun
    Error,
}

impl<C: Connector> Se05x<C> {
    pub fn digest_state(&self) -> DigestState {
        self.digest
    }

    /// Start a streaming SHA-256
    ///
    /// # Errors
    ///
    /// `DigestAlreadyActive` while another streaming digest is in progress;
    /// that digest is left untouched.
    pub fn begin_sha256(&mut self) -> Se05xResult<()> {
        let channel = connected(&mut self.channel)?;
        if self.digest == DigestState::Active {
            warn!("SHA-256 begin rejected: a digest is already active");
            return Err(StateError::DigestAlreadyActive.into());
        }

        if let Err(e) = channel.digest_init() {
            self.digest = DigestState::Idle;
            return Err(e);
        }
        self.digest = DigestState::Active;
        debug!("SHA-256 digest started");
        Ok(())
    }

    /// Feed `data` into the active digest
    pub fn update_sha256(&mut self, data: &[u8]) -> Se05xResult<()> {
        let channel = connected(&mut self.channel)?;
        match self.digest {
            DigestState::Active => {}
            DigestState::Idle => {
                warn!("SHA-256 update without begin");
                self.digest = DigestState::Error;
                return Err(StateError::DigestNotActive.into());
            }
            DigestState::Error => return Err(StateError::DigestNotActive.into()),
        }

        if let Err(e) = channel.digest_update(data) {
            warn!("SHA-256 update failed, abandoning digest: {}", e);
            channel.digest_free();
            self.digest = DigestState::Error;
            return Err(e);
        }
        Ok(())
    }

    /// Finish the active digest into `out`
    ///
    /// The engine is idle afterwards whatever the outcome.
    pub fn end_sha256(&mut self, out: &mut [u8]) -> Se05xResult<usize> {
        let channel = connected(&mut self.channel)?;
        let state = std::mem::replace(&mut self.digest, DigestState::Idle);
        if state != DigestState::Active {
            warn!("SHA-256 end without an active digest ({:?})", state);
            return Err(StateError::DigestNotActive.into());
        }

        if let Err(e) = ensure_capacity(SHA256_LENGTH, out) {
            channel.digest_free();
            return Err(e);
        }
        let digest = match channel.digest_finish() {
            Ok(digest) => digest,
            Err(e) => {
                channel.digest_free();
                return Err(e);
            }
        };
        debug!("SHA-256 digest finished");
        write_output(out, &digest)
    }

    /// One-shot SHA-256 of `input` into `out`
    ///
    /// # Errors
    ///
    /// `DigestAlreadyActive` while a streaming digest is in progress, since
    /// both use the element's single context.
    pub fn sha256(&mut self, input: &[u8], out: &mut [u8]) -> Se05xResult<usize> {
        let channel = connected(&mut self.channel)?;
        if self.digest == DigestState::Active {
            warn!("One-shot SHA-256 rejected: a digest is already active");
            return Err(StateError::DigestAlreadyActive.into());
        }
        ensure_capacity(SHA256_LENGTH, out)?;

        let digest = channel.digest_one_go(input)?;
        write_output(out, &digest)
    }
}
