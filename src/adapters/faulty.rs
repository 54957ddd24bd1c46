//! Fault-injecting adapter for testing how the control object surfaces
//! transport failures
//!
//! Wraps the simulated element and fails commands on demand. Only available
//! in test scope.

use std::cell::Cell;
use std::rc::Rc;

use crate::adapters::simulated::{SimulatedConnector, SimulatedElement};
use crate::error::{ConnectionError, Se05xError, Se05xResult};
use crate::model::{ObjectHandle, ObjectId, ObjectInfo, SHA256_LENGTH};
use crate::ports::{
    AsymmetricUnit, Connector, DigestUnit, ElementInfo, KeyStore, RandomSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// `open_session` fails
    RefuseOpen,
    /// Every command fails
    LinkDown,
    /// Only `digest_update` fails
    DigestUpdate,
}

/// Shared switch flipped by a test while the control object owns the channel
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch(Rc<Cell<Fault>>);

impl FaultSwitch {
    pub fn set(&self, fault: Fault) {
        self.0.set(fault);
    }

    fn get(&self) -> Fault {
        self.0.get()
    }
}

fn link_down() -> Se05xError {
    ConnectionError::Transport {
        reason: "injected link failure".to_string(),
    }
    .into()
}

#[derive(Debug, Clone, Default)]
pub struct FaultyConnector {
    pub inner: SimulatedConnector,
    pub switch: FaultSwitch,
}

impl Connector for FaultyConnector {
    type Channel = FaultyChannel;

    fn open_session(&self) -> Se05xResult<Self::Channel> {
        if self.switch.get() == Fault::RefuseOpen {
            return Err(ConnectionError::SessionOpenFailed {
                reason: "injected open failure".to_string(),
            }
            .into());
        }
        Ok(FaultyChannel {
            inner: self.inner.open_session()?,
            switch: self.switch.clone(),
        })
    }
}

pub struct FaultyChannel {
    inner: SimulatedElement,
    switch: FaultSwitch,
}

impl FaultyChannel {
    fn check(&self) -> Se05xResult<()> {
        if self.switch.get() == Fault::LinkDown {
            Err(link_down())
        } else {
            Ok(())
        }
    }
}

impl KeyStore for FaultyChannel {
    fn object_info(&mut self, id: ObjectId) -> Se05xResult<Option<ObjectInfo>> {
        self.check()?;
        self.inner.object_info(id)
    }

    fn erase_object(&mut self, id: ObjectId) -> Se05xResult<()> {
        self.check()?;
        self.inner.erase_object(id)
    }

    fn generate_key(&mut self, handle: &ObjectHandle) -> Se05xResult<()> {
        self.check()?;
        self.inner.generate_key(handle)
    }

    fn get_key(&mut self, handle: &ObjectHandle) -> Se05xResult<Vec<u8>> {
        self.check()?;
        self.inner.get_key(handle)
    }

    fn set_key(&mut self, handle: &ObjectHandle, data: &[u8]) -> Se05xResult<()> {
        self.check()?;
        self.inner.set_key(handle, data)
    }
}

impl DigestUnit for FaultyChannel {
    fn digest_init(&mut self) -> Se05xResult<()> {
        self.check()?;
        self.inner.digest_init()
    }

    fn digest_update(&mut self, data: &[u8]) -> Se05xResult<()> {
        self.check()?;
        if self.switch.get() == Fault::DigestUpdate {
            return Err(link_down());
        }
        self.inner.digest_update(data)
    }

    fn digest_finish(&mut self) -> Se05xResult<[u8; SHA256_LENGTH]> {
        self.check()?;
        self.inner.digest_finish()
    }

    fn digest_free(&mut self) {
        self.inner.digest_free();
    }

    fn digest_one_go(&mut self, data: &[u8]) -> Se05xResult<[u8; SHA256_LENGTH]> {
        self.check()?;
        self.inner.digest_one_go(data)
    }
}

impl AsymmetricUnit for FaultyChannel {
    fn sign_digest(&mut self, handle: &ObjectHandle, digest: &[u8]) -> Se05xResult<Vec<u8>> {
        self.check()?;
        self.inner.sign_digest(handle, digest)
    }

    fn verify_digest(
        &mut self,
        handle: &ObjectHandle,
        digest: &[u8],
        signature: &[u8],
    ) -> Se05xResult<bool> {
        self.check()?;
        self.inner.verify_digest(handle, digest, signature)
    }
}

impl RandomSource for FaultyChannel {
    fn fill_random(&mut self, out: &mut [u8]) -> Se05xResult<()> {
        self.check()?;
        self.inner.fill_random(out)
    }
}

impl ElementInfo for FaultyChannel {
    fn unique_id(&mut self) -> Se05xResult<Vec<u8>> {
        self.check()?;
        self.inner.unique_id()
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract_tests_for;
    use crate::ports::contract_tests::element_contract;

    // With no fault set the wrapper must be indistinguishable from the
    // simulator it wraps.
    contract_tests_for!(
        faulty_channel_contract,
        make = || FaultyConnector::default().open_session().unwrap(),
        tests = {
            test_missing_object_has_no_info => element_contract::test_missing_object_has_no_info,
            test_sign_digest_verifies => element_contract::test_sign_digest_verifies,
            test_streaming_digest_matches_one_go => element_contract::test_streaming_digest_matches_one_go,
            test_closed_channel_reports_transport_error => element_contract::test_closed_channel_reports_transport_error,
        }
    );

    #[test]
    fn test_refuse_open() {
        let connector = FaultyConnector::default();
        connector.switch.set(Fault::RefuseOpen);

        assert!(matches!(
            connector.open_session().err(),
            Some(Se05xError::Connection(ConnectionError::SessionOpenFailed { .. }))
        ));
    }

    #[test]
    fn test_link_down_fails_commands() {
        let connector = FaultyConnector::default();
        let mut channel = connector.open_session().unwrap();
        connector.switch.set(Fault::LinkDown);

        let mut buf = [0u8; 4];
        assert!(channel.fill_random(&mut buf).unwrap_err().is_connectivity());
    }
}
