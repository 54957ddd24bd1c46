//! Software simulation of the secure element
//!
//! Keys live in process memory, so this adapter offers none of the isolation
//! of real hardware. It follows the element's rules instead: key-part and
//! mode checks on every handle, a single digest context, a bounded object
//! store, and private keys that never leave the store. Objects survive
//! `close()`/`open_session()` cycles on the same connector, the way they
//! survive power cycles on hardware.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::pkcs8::{DecodePublicKey, EncodePublicKey};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{
    BindingError, CapacityError, ConnectionError, CryptoError, Se05xError, Se05xResult,
    StateError,
};
use crate::model::{
    CipherType, KeyPart, ObjectHandle, ObjectId, ObjectInfo, EC_KEY_DER_LENGTH, SHA256_LENGTH,
};
use crate::ports::{
    AsymmetricUnit, Connector, DigestUnit, ElementInfo, KeyStore, RandomSource,
};

/// User storage of an SE050-class element
pub const DEFAULT_STORAGE_CAPACITY: usize = 50 * 1024;

pub const UNIQUE_ID_LENGTH: usize = 18;

const PRIVATE_SCALAR_LENGTH: usize = 32;
const KEYGEN_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Bytes available for persistent objects
    pub storage_capacity: usize,
    /// Fixed unique id; random when `None`
    pub unique_id: Option<[u8; UNIQUE_ID_LENGTH]>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            storage_capacity: DEFAULT_STORAGE_CAPACITY,
            unique_id: None,
        }
    }
}

#[derive(Debug)]
enum Content {
    KeyPair(SigningKey),
    PublicKey(VerifyingKey),
    Binary(Vec<u8>),
}

impl Content {
    fn key_part(&self) -> KeyPart {
        match self {
            Content::KeyPair(_) => KeyPart::Pair,
            Content::PublicKey(_) => KeyPart::Public,
            Content::Binary(_) => KeyPart::None,
        }
    }

    fn cipher(&self) -> CipherType {
        match self {
            Content::KeyPair(_) | Content::PublicKey(_) => CipherType::EcNistP256,
            Content::Binary(_) => CipherType::Binary,
        }
    }

    /// Size reported to the host
    fn size(&self) -> usize {
        match self {
            Content::KeyPair(_) | Content::PublicKey(_) => EC_KEY_DER_LENGTH,
            Content::Binary(data) => data.len(),
        }
    }

    /// Storage consumed on the element
    fn footprint(&self) -> usize {
        match self {
            Content::KeyPair(_) => EC_KEY_DER_LENGTH + PRIVATE_SCALAR_LENGTH,
            Content::PublicKey(_) => EC_KEY_DER_LENGTH,
            Content::Binary(data) => data.len(),
        }
    }

    fn verifying_key(&self) -> Option<&VerifyingKey> {
        match self {
            Content::KeyPair(key) => Some(key.verifying_key()),
            Content::PublicKey(key) => Some(key),
            Content::Binary(_) => None,
        }
    }

    fn readable_bytes(&self) -> Se05xResult<Vec<u8>> {
        match self {
            Content::Binary(data) => Ok(data.clone()),
            _ => {
                let key = self.verifying_key().ok_or_else(|| CryptoError::MalformedKey {
                    reason: "object holds no key".to_string(),
                })?;
                let der = key.to_public_key_der().map_err(|e| CryptoError::MalformedKey {
                    reason: format!("Failed to encode public key: {}", e),
                })?;
                Ok(der.as_bytes().to_vec())
            }
        }
    }
}

#[derive(Debug)]
struct ElementState {
    objects: BTreeMap<ObjectId, Content>,
    unique_id: [u8; UNIQUE_ID_LENGTH],
    capacity: usize,
}

impl ElementState {
    fn used(&self) -> usize {
        self.objects.values().map(Content::footprint).sum()
    }

    fn store(&mut self, id: ObjectId, content: Content) -> Se05xResult<()> {
        let replaced = self.objects.get(&id).map(Content::footprint).unwrap_or(0);
        let available = self.capacity - (self.used() - replaced);
        if content.footprint() > available {
            return Err(CapacityError::ElementFull {
                requested: content.footprint(),
                available,
            }
            .into());
        }
        self.objects.insert(id, content);
        Ok(())
    }

    fn lookup(&self, id: ObjectId) -> Se05xResult<&Content> {
        self.objects
            .get(&id)
            .ok_or_else(|| BindingError::NotFound { id }.into())
    }
}

fn role_mismatch(handle: &ObjectHandle, content: &Content) -> Se05xError {
    BindingError::IncompatibleRole {
        id: handle.id(),
        expected: format!("{} {}", handle.cipher(), handle.key_part()),
        found: format!("{} {}", content.cipher(), content.key_part()),
    }
    .into()
}

/// Connector to a simulated element
///
/// Clones share the same element, so a test can keep one clone to inspect
/// storage while the control object owns another.
#[derive(Debug, Clone)]
pub struct SimulatedConnector {
    state: Rc<RefCell<ElementState>>,
}

impl SimulatedConnector {
    pub fn new(config: SimulatorConfig) -> Self {
        let unique_id = config.unique_id.unwrap_or_else(|| {
            let mut uid = [0u8; UNIQUE_ID_LENGTH];
            rand::rng().fill_bytes(&mut uid);
            uid
        });
        Self {
            state: Rc::new(RefCell::new(ElementState {
                objects: BTreeMap::new(),
                unique_id,
                capacity: config.storage_capacity,
            })),
        }
    }

    pub fn object_count(&self) -> usize {
        self.state.borrow().objects.len()
    }

    pub fn free_storage(&self) -> usize {
        let state = self.state.borrow();
        state.capacity - state.used()
    }
}

impl Default for SimulatedConnector {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl Connector for SimulatedConnector {
    type Channel = SimulatedElement;

    fn open_session(&self) -> Se05xResult<Self::Channel> {
        debug!("Opening simulated secure element session");
        Ok(SimulatedElement {
            state: Rc::clone(&self.state),
            digest: None,
            open: true,
        })
    }
}

/// Open session on a simulated element
pub struct SimulatedElement {
    state: Rc<RefCell<ElementState>>,
    digest: Option<Sha256>,
    open: bool,
}

impl SimulatedElement {
    fn ensure_open(&self) -> Se05xResult<()> {
        if self.open {
            Ok(())
        } else {
            Err(ConnectionError::Transport {
                reason: "session closed".to_string(),
            }
            .into())
        }
    }
}

impl KeyStore for SimulatedElement {
    fn object_info(&mut self, id: ObjectId) -> Se05xResult<Option<ObjectInfo>> {
        self.ensure_open()?;
        Ok(self.state.borrow().objects.get(&id).map(|content| ObjectInfo {
            key_part: content.key_part(),
            cipher: content.cipher(),
            size: content.size(),
        }))
    }

    fn erase_object(&mut self, id: ObjectId) -> Se05xResult<()> {
        self.ensure_open()?;
        self.state
            .borrow_mut()
            .objects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| BindingError::NotFound { id }.into())
    }

    fn generate_key(&mut self, handle: &ObjectHandle) -> Se05xResult<()> {
        self.ensure_open()?;
        handle.ensure_writable()?;
        if handle.cipher() != CipherType::EcNistP256 || handle.key_part() != KeyPart::Pair {
            return Err(BindingError::IncompatibleRole {
                id: handle.id(),
                expected: "writable key pair".to_string(),
                found: format!("{} {}", handle.cipher(), handle.key_part()),
            }
            .into());
        }

        let mut state = self.state.borrow_mut();
        if let Some(existing) = state.objects.get(&handle.id()) {
            if existing.key_part() != KeyPart::Pair && !handle.replaces_existing() {
                return Err(role_mismatch(handle, existing));
            }
        }

        let mut rng = rand::rng();
        let mut scalar = [0u8; PRIVATE_SCALAR_LENGTH];
        let mut generated = None;
        for _ in 0..KEYGEN_ATTEMPTS {
            rng.fill_bytes(&mut scalar);
            if let Ok(key) = SigningKey::from_slice(&scalar) {
                generated = Some(key);
                break;
            }
        }
        let key = generated.ok_or_else(|| CryptoError::KeyGenerationFailed {
            reason: "no valid scalar drawn".to_string(),
        })?;

        state.store(handle.id(), Content::KeyPair(key))?;
        debug!("Simulated element generated P-256 key pair at {}", handle.id());
        Ok(())
    }

    fn get_key(&mut self, handle: &ObjectHandle) -> Se05xResult<Vec<u8>> {
        self.ensure_open()?;
        let state = self.state.borrow();
        let content = state.lookup(handle.id())?;
        if content.cipher() != handle.cipher() || !handle.key_part().accepts(content.key_part()) {
            return Err(role_mismatch(handle, content));
        }
        content.readable_bytes()
    }

    fn set_key(&mut self, handle: &ObjectHandle, data: &[u8]) -> Se05xResult<()> {
        self.ensure_open()?;
        handle.ensure_writable()?;

        let content = match (handle.cipher(), handle.key_part()) {
            (CipherType::Binary, KeyPart::None) => Content::Binary(data.to_vec()),
            (CipherType::EcNistP256, KeyPart::Public) => {
                let key = VerifyingKey::from_public_key_der(data).map_err(|e| {
                    CryptoError::MalformedKey {
                        reason: format!("Rejected DER public key: {}", e),
                    }
                })?;
                Content::PublicKey(key)
            }
            (cipher, part) => {
                return Err(BindingError::IncompatibleRole {
                    id: handle.id(),
                    expected: "public key or binary object".to_string(),
                    found: format!("{} {}", cipher, part),
                }
                .into())
            }
        };

        let mut state = self.state.borrow_mut();
        if let Some(existing) = state.objects.get(&handle.id()) {
            let same_type =
                existing.cipher() == content.cipher() && existing.key_part() == content.key_part();
            if !same_type && !handle.replaces_existing() {
                return Err(role_mismatch(handle, existing));
            }
        }
        state.store(handle.id(), content)
    }
}

impl DigestUnit for SimulatedElement {
    fn digest_init(&mut self) -> Se05xResult<()> {
        self.ensure_open()?;
        self.digest = Some(Sha256::new());
        Ok(())
    }

    fn digest_update(&mut self, data: &[u8]) -> Se05xResult<()> {
        self.ensure_open()?;
        let digest = self.digest.as_mut().ok_or(StateError::DigestNotActive)?;
        digest.update(data);
        Ok(())
    }

    fn digest_finish(&mut self) -> Se05xResult<[u8; SHA256_LENGTH]> {
        self.ensure_open()?;
        let digest = self.digest.take().ok_or(StateError::DigestNotActive)?;
        let mut out = [0u8; SHA256_LENGTH];
        out.copy_from_slice(&digest.finalize());
        Ok(out)
    }

    fn digest_free(&mut self) {
        self.digest = None;
    }

    fn digest_one_go(&mut self, data: &[u8]) -> Se05xResult<[u8; SHA256_LENGTH]> {
        self.ensure_open()?;
        let mut out = [0u8; SHA256_LENGTH];
        out.copy_from_slice(&Sha256::digest(data));
        Ok(out)
    }
}

impl AsymmetricUnit for SimulatedElement {
    fn sign_digest(&mut self, handle: &ObjectHandle, digest: &[u8]) -> Se05xResult<Vec<u8>> {
        self.ensure_open()?;
        handle.ensure_private()?;

        let state = self.state.borrow();
        let content = state.lookup(handle.id())?;
        let Content::KeyPair(key) = content else {
            return Err(role_mismatch(handle, content));
        };

        let signature: Signature =
            key.sign_prehash(digest)
                .map_err(|e| CryptoError::SignatureFailed {
                    reason: format!("Element refused to sign: {}", e),
                })?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn verify_digest(
        &mut self,
        handle: &ObjectHandle,
        digest: &[u8],
        signature: &[u8],
    ) -> Se05xResult<bool> {
        self.ensure_open()?;
        handle.ensure_public()?;

        let state = self.state.borrow();
        let content = state.lookup(handle.id())?;
        let key = content
            .verifying_key()
            .ok_or_else(|| role_mismatch(handle, content))?;

        let Ok(signature) = Signature::from_der(signature) else {
            return Ok(false);
        };
        Ok(key.verify_prehash(digest, &signature).is_ok())
    }
}

impl RandomSource for SimulatedElement {
    fn fill_random(&mut self, out: &mut [u8]) -> Se05xResult<()> {
        self.ensure_open()?;
        rand::rng().fill_bytes(out);
        Ok(())
    }
}

impl ElementInfo for SimulatedElement {
    fn unique_id(&mut self) -> Se05xResult<Vec<u8>> {
        self.ensure_open()?;
        Ok(self.state.borrow().unique_id.to_vec())
    }

    fn close(&mut self) {
        self.digest = None;
        self.open = false;
    }
}
