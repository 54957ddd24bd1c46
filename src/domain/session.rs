use tracing::{debug, info};

use super::DigestState;
use crate::config::ElementConfig;
use crate::error::{ConnectionError, Se05xResult};
use crate::ports::{Connector, ElementInfo};

/// Single-owner control object for one secure element
///
/// Every element operation takes `&mut self`, so calls are serialized by the
/// borrow checker; sharing across threads requires the caller's own lock.
pub struct Se05x<C: Connector> {
    connector: C,
    pub(crate) config: ElementConfig,
    pub(crate) channel: Option<C::Channel>,
    pub(crate) digest: DigestState,
}

/// Borrow the open channel, or fail with `NotConnected`.
///
/// Takes the field rather than `&mut Se05x` so callers can update the digest
/// state while holding the channel.
pub(crate) fn connected<T>(channel: &mut Option<T>) -> Se05xResult<&mut T> {
    channel
        .as_mut()
        .ok_or_else(|| ConnectionError::NotConnected.into())
}

impl<C: Connector> Se05x<C> {
    pub fn new(connector: C) -> Self {
        Self::with_config(connector, ElementConfig::default())
    }

    pub fn with_config(connector: C, config: ElementConfig) -> Self {
        Self {
            connector,
            config,
            channel: None,
            digest: DigestState::Idle,
        }
    }

    pub fn config(&self) -> &ElementConfig {
        &self.config
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }

    /// Establish the session
    ///
    /// Calling `begin` on an open session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the connector's error if the session cannot be opened; the
    /// control object stays disconnected.
    pub fn begin(&mut self) -> Se05xResult<()> {
        if self.channel.is_some() {
            debug!("Secure element session already open");
            return Ok(());
        }

        let channel = self.connector.open_session()?;
        self.channel = Some(channel);
        self.digest = DigestState::Idle;
        info!("Secure element session established");
        Ok(())
    }

    /// Release the session
    ///
    /// Any digest in progress is abandoned. Safe to call when not connected.
    pub fn end(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.close();
            info!("Secure element session closed");
        }
        self.digest = DigestState::Idle;
    }

    /// Element unique id as upper-case hex
    pub fn serial_number(&mut self) -> Se05xResult<String> {
        let uid = self.channel()?.unique_id()?;
        Ok(hex::encode_upper(uid))
    }

    pub(crate) fn channel(&mut self) -> Se05xResult<&mut C::Channel> {
        connected(&mut self.channel)
    }

    pub(crate) fn ensure_connected(&self) -> Se05xResult<()> {
        if self.channel.is_some() {
            Ok(())
        } else {
            Err(ConnectionError::NotConnected.into())
        }
    }
}

impl<C: Connector> Drop for Se05x<C> {
    fn drop(&mut self) {
        self.end();
    }
}
