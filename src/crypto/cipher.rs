//! XChaCha20-Poly1305 sealing
//!
//! A cipher blob is `base64(nonce || ciphertext)`. The nonce is 24 random
//! bytes, fresh for every seal, so the same plaintext never encrypts to the
//! same blob twice.

use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    XChaCha20Poly1305, XNonce,
};

use crate::error::{EnvError, EnvResult};

use super::key::SecretKey;

/// Size of the XChaCha20-Poly1305 nonce in bytes (192 bits)
pub const NONCE_LEN: usize = 24;

/// Size of the Poly1305 authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` and return the base64 cipher blob
pub fn seal(plaintext: &[u8], key: &SecretKey) -> EnvResult<String> {
    let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| {
        EnvError::Encryption(format!(
            "Invalid key length: expected 32 bytes, got {}",
            key.len()
        ))
    })?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| EnvError::Encryption(format!("AEAD seal failed: {}", e)))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(blob))
}

/// Decrypt a base64 cipher blob
///
/// Any wrong key, truncation, or tampering fails with
/// `EnvError::Decryption`; corrupted plaintext is never returned.
pub fn open(blob: &str, key: &SecretKey) -> EnvResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| {
        EnvError::Decryption(format!(
            "Invalid key length: expected 32 bytes, got {}",
            key.len()
        ))
    })?;

    let decoded = STANDARD
        .decode(blob.trim())
        .map_err(|e| EnvError::Decryption(format!("Invalid ciphertext encoding: {}", e)))?;

    if decoded.len() < NONCE_LEN + TAG_LEN {
        return Err(EnvError::Decryption(format!(
            "Ciphertext too short: {} bytes",
            decoded.len()
        )));
    }

    let (nonce_bytes, ciphertext) = decoded.split_at(NONCE_LEN);
    let nonce = XNonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| EnvError::Decryption("Invalid key or corrupted data".to_string()))
}
