use p256::ecdsa::signature::hazmat::PrehashVerifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;
use rand::RngCore;
use sha2::{Digest, Sha256};

use se05x::error::{CapacityError, ConnectionError, StateError};
use se05x::logic::{public_key_der_to_raw, signature_raw_to_der};
use se05x::{
    api, ec_sign, ecdsa_verify, DigestState, ElementConfig, Se05x, Se05xError,
    SimulatedConnector, SimulatorConfig, Verification, EC_KEY_DER_LENGTH,
    EC_SIGNATURE_DER_MAX_LENGTH, SHA256_LENGTH,
};

fn element() -> Se05x<SimulatedConnector> {
    api::connect_simulated().unwrap()
}

#[test]
fn test_generate_sign_and_independently_verify() {
    let mut element = element();
    let mut der = [0u8; EC_KEY_DER_LENGTH];
    let len = element.generate_private_key(0x10, &mut der).unwrap();
    let message = [0u8, 1, 2, 3, 4, 5, 6, 7, 8];

    let signature = ec_sign(&mut element, 0x10, &message).unwrap();

    let verifying_key = VerifyingKey::from_public_key_der(&der[..len]).unwrap();
    let signature = Signature::from_slice(signature.as_bytes()).unwrap();
    assert!(matches!(
        verifying_key.verify_prehash(&Sha256::digest(message), &signature),
        Ok(())
    ));
}

#[test]
fn test_streaming_digest_equals_one_shot_for_every_split() {
    let mut element = element();
    let mut data = vec![0u8; 257];
    rand::rng().fill_bytes(&mut data);

    let mut expected = [0u8; SHA256_LENGTH];
    element.sha256(&data, &mut expected).unwrap();
    assert_eq!(expected.as_slice(), Sha256::digest(&data).as_slice());

    for k in (0..=data.len()).step_by(7) {
        element.begin_sha256().unwrap();
        element.update_sha256(&data[..k]).unwrap();
        element.update_sha256(&data[k..]).unwrap();
        let mut out = [0u8; SHA256_LENGTH];
        element.end_sha256(&mut out).unwrap();
        assert_eq!(out, expected);
    }
}

#[test]
fn test_import_then_export_yields_same_key() {
    let mut element = element();
    let mut source = [0u8; EC_KEY_DER_LENGTH];
    element.generate_private_key(0x20, &mut source).unwrap();

    element.import_public_key(0x21, &source).unwrap();

    // Verify with the imported copy a signature made by the pair
    let digest: [u8; 32] = Sha256::digest(b"round trip").into();
    let mut signature = [0u8; EC_SIGNATURE_DER_MAX_LENGTH];
    let len = element.sign(0x20, &digest, &mut signature).unwrap();
    assert_eq!(
        element.verify(0x21, &digest, &signature[..len]).unwrap(),
        Verification::Valid
    );

    let mut exported = [0u8; EC_KEY_DER_LENGTH];
    let len = element.generate_public_key(0x21, &mut exported).unwrap();
    assert_eq!(len, EC_KEY_DER_LENGTH);
    assert_eq!(exported, source);
}

#[test]
fn test_flipped_bit_gives_invalid_not_error() {
    let mut element = element();
    element.generate_private_key_raw(0x30).unwrap();
    let digest: [u8; 32] = Sha256::digest(b"flip").into();
    let mut signature = [0u8; EC_SIGNATURE_DER_MAX_LENGTH];
    let len = element.sign(0x30, &digest, &mut signature).unwrap();

    let mut tampered = digest;
    tampered[31] ^= 0x01;

    assert_eq!(
        element.verify(0x30, &tampered, &signature[..len]),
        Ok(Verification::Invalid)
    );
}

#[test]
fn test_raw_helpers_interoperate() {
    let mut element = element();
    let public_key = element.generate_private_key_raw(0x40).unwrap();
    let signature = ec_sign(&mut element, 0x40, b"raw").unwrap();

    assert_eq!(
        ecdsa_verify(&mut element, b"raw", &signature, &public_key),
        Ok(Verification::Valid)
    );

    let mut der = [0u8; EC_KEY_DER_LENGTH];
    element.generate_public_key(0x40, &mut der).unwrap();
    assert_eq!(public_key_der_to_raw(&der).unwrap(), public_key);

    let signature_der = signature_raw_to_der(&signature).unwrap();
    let digest: [u8; 32] = Sha256::digest(b"raw").into();
    assert!(element
        .verify(0x40, &digest, &signature_der)
        .unwrap()
        .is_valid());
}

#[test]
fn test_end_without_begin_then_fresh_digest() {
    let mut element = element();
    let mut out = [0u8; SHA256_LENGTH];

    assert_eq!(
        element.end_sha256(&mut out),
        Err(Se05xError::State(StateError::DigestNotActive))
    );
    assert_eq!(element.digest_state(), DigestState::Idle);

    element.begin_sha256().unwrap();
    element.update_sha256(b"abc").unwrap();
    element.end_sha256(&mut out).unwrap();
    assert_eq!(
        hex::encode(out),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_binary_objects_up_to_capacity() {
    let capacity = 4096;
    let mut element = api::connect_simulated_with(
        ElementConfig::default(),
        SimulatorConfig {
            storage_capacity: capacity,
            ..SimulatorConfig::default()
        },
    )
    .unwrap();

    for len in [0usize, 1, 100, capacity] {
        let mut data = vec![0u8; len];
        rand::rng().fill_bytes(&mut data);
        element.write_binary_object(0x50, &data).unwrap();

        let mut out = vec![0u8; len];
        assert_eq!(element.read_binary_object(0x50, &mut out).unwrap(), len);
        assert_eq!(out, data);
    }

    assert!(matches!(
        element.write_binary_object(0x51, &[0u8; 1]),
        Err(Se05xError::Capacity(CapacityError::ElementFull { .. }))
    ));
}

#[test]
fn test_one_byte_short_buffers_write_nothing() {
    let mut element = element();
    element.write_binary_object(0x60, &[0xAB; 40]).unwrap();
    element.generate_private_key_raw(0x61).unwrap();

    let mut short = [0u8; 39];
    assert!(matches!(
        element.read_binary_object(0x60, &mut short),
        Err(Se05xError::Capacity(CapacityError::BufferTooSmall { required: 40, available: 39 }))
    ));
    assert_eq!(short, [0u8; 39]);

    let mut short = [0u8; SHA256_LENGTH - 1];
    assert!(element.sha256(b"abc", &mut short).is_err());
    assert_eq!(short, [0u8; SHA256_LENGTH - 1]);

    let mut short = [0u8; EC_KEY_DER_LENGTH - 1];
    assert!(element.generate_public_key(0x61, &mut short).is_err());
    assert_eq!(short, [0u8; EC_KEY_DER_LENGTH - 1]);
}

#[test]
fn test_bounded_random_in_range() {
    let mut element = element();
    for _ in 0..1000 {
        let value = element.random_range(-1_000, 1_001).unwrap();
        assert!((-1_000..1_001).contains(&value));
    }
    assert_eq!(element.random_below(0).unwrap(), 0);
    assert_eq!(element.random_range(5, 5).unwrap(), 5);
}

#[test]
fn test_session_lifecycle() {
    let connector = SimulatedConnector::default();
    let mut element = Se05x::new(connector.clone());

    assert_eq!(
        element.serial_number(),
        Err(Se05xError::Connection(ConnectionError::NotConnected))
    );

    element.begin().unwrap();
    let serial = element.serial_number().unwrap();
    element.write_binary_object(0x70, b"persisted").unwrap();
    element.end();

    assert!(element.random_below(10).is_err());

    let mut other = Se05x::new(connector);
    other.begin().unwrap();
    assert_eq!(other.serial_number().unwrap(), serial);
    let mut out = [0u8; 9];
    other.read_binary_object(0x70, &mut out).unwrap();
    assert_eq!(&out, b"persisted");
}

fn assert_not_connected<T: std::fmt::Debug>(result: Result<T, Se05xError>) {
    assert!(
        matches!(result, Err(Se05xError::Connection(ConnectionError::NotConnected))),
        "expected NotConnected, got {:?}",
        result
    );
}

#[test]
fn test_operations_after_end_report_not_connected() {
    let mut element = element();
    let public_key = element.generate_private_key_raw(0x80).unwrap();
    let signature = ec_sign(&mut element, 0x80, b"closed").unwrap();
    let mut der = [0u8; EC_KEY_DER_LENGTH];
    element.generate_public_key(0x80, &mut der).unwrap();
    element.write_binary_object(0x81, b"kept").unwrap();
    element.end();

    let digest = [0x11u8; SHA256_LENGTH];
    let mut out = [0u8; EC_SIGNATURE_DER_MAX_LENGTH];
    let mut key_out = [0u8; EC_KEY_DER_LENGTH];
    let mut digest_out = [0u8; SHA256_LENGTH];

    assert_not_connected(element.sign(0x80, &digest, &mut out));
    assert_not_connected(element.verify(0x80, &digest, &[0x30, 0x00]));
    assert_not_connected(element.generate_private_key(0x82, &mut key_out));
    assert_not_connected(element.generate_private_key_raw(0x82));
    assert_not_connected(element.generate_public_key(0x80, &mut key_out));
    assert_not_connected(element.generate_public_key_raw(0x80));
    assert_not_connected(element.import_public_key(0x83, &der));
    assert_not_connected(element.begin_sha256());
    assert_not_connected(element.update_sha256(b"abc"));
    assert_not_connected(element.end_sha256(&mut digest_out));
    assert_not_connected(element.sha256(b"abc", &mut digest_out));
    assert_not_connected(element.read_binary_object(0x81, &mut out));
    assert_not_connected(element.write_binary_object(0x81, b"lost"));
    assert_not_connected(element.object_exists(0x81));
    assert_not_connected(element.delete_object(0x81));
    assert_not_connected(element.random_bytes(&mut out));
    assert_not_connected(element.random_below(10));
    assert_not_connected(element.random_range(-5, 5));
    assert_not_connected(element.serial_number());
    assert_not_connected(ec_sign(&mut element, 0x80, b"closed"));
    assert_not_connected(ecdsa_verify(&mut element, b"closed", &signature, &public_key));

    // Nothing was touched while the session was closed
    element.begin().unwrap();
    assert!(element.object_exists(0x82).is_ok_and(|exists| !exists));
    let mut kept = [0u8; 4];
    element.read_binary_object(0x81, &mut kept).unwrap();
    assert_eq!(&kept, b"kept");
}

#[test]
fn test_failed_replacement_leaves_object_in_place() {
    let mut element = api::connect_simulated_with(
        ElementConfig::default(),
        SimulatorConfig {
            storage_capacity: 200,
            ..SimulatorConfig::default()
        },
    )
    .unwrap();
    let public_key = element.generate_private_key_raw(0x90).unwrap();

    assert!(element.import_public_key(0x90, &[0x30, 0x01, 0x00]).is_err());
    assert!(matches!(
        element.write_binary_object(0x90, &[0u8; 201]),
        Err(Se05xError::Capacity(CapacityError::ElementFull { .. }))
    ));

    assert!(element.object_exists(0x90).unwrap());
    assert_eq!(element.generate_public_key_raw(0x90).unwrap(), public_key);
    let digest: [u8; 32] = Sha256::digest(b"still here").into();
    let mut signature = [0u8; EC_SIGNATURE_DER_MAX_LENGTH];
    let len = element.sign(0x90, &digest, &mut signature).unwrap();
    assert!(element
        .verify(0x90, &digest, &signature[..len])
        .unwrap()
        .is_valid());
}
