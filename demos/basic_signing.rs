// Example demonstrating basic secure element usage as a library
//
// Run with: cargo run --example basic_signing
//
// Note: This example runs against the simulated element

use se05x::{ec_sign, ecdsa_verify, Verification};

fn main() -> anyhow::Result<()> {
    println!("SE05X Basic Signing Example");
    println!("===========================\n");

    let mut element = se05x::api::connect_simulated()?;
    println!("✓ Session established");
    println!("  Serial number: {}\n", element.serial_number()?);

    // Generate a key pair that never leaves the element
    println!("Generating P-256 key pair at object 0x100...");
    let public_key = element.generate_private_key_raw(0x100)?;
    println!("✓ Key pair generated");
    println!("  Public key: {}\n", hex::encode(public_key.as_bytes()));

    // Sign some data
    let message = b"Hello, secure element!";
    println!("Signing message: {:?}", String::from_utf8_lossy(message));
    let signature = ec_sign(&mut element, 0x100, message)?;
    println!("✓ Message signed");
    println!("  Signature: {}\n", hex::encode(signature.as_bytes()));

    // Verify the signature
    println!("Verifying signature...");
    match ecdsa_verify(&mut element, message, &signature, &public_key)? {
        Verification::Valid => println!("✓ Signature verified successfully!"),
        Verification::Invalid => println!("✗ Signature verification failed"),
    }

    element.end();
    Ok(())
}
