//! Digest and signature utilities for gateway requests

use base64::{engine::general_purpose, Engine as _};
use sha1::{Digest, Sha1};

/// Compute the base64-encoded SHA-1 digest of a string.
///
/// This is the hash the gateway expects both for the `authentication`
/// header and for transaction signatures.
pub fn digest(input: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(input.as_bytes());
    general_purpose::STANDARD.encode(hasher.finalize())
}

/// Derive the transaction signature the server verifies on submit.
///
/// The order fields plus both credentials are concatenated in this exact
/// order with no delimiter; any deviation in field order or coercion
/// breaks server-side verification.
pub fn transaction_signature(
    uid: &str,
    total_amount: &str,
    total_quantity: u32,
    ip: &str,
    client_id: &str,
    client_secret: &str,
) -> String {
    digest(&format!(
        "{}{}{}{}{}{}",
        uid, total_amount, total_quantity, ip, client_id, client_secret
    ))
}
