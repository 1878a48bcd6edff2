//! Symmetric key lifecycle
//!
//! Keys are 32 random bytes stored as a single line of base64 text. A key is
//! created the first time something is encrypted and reused until rotated.

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::aead::{rand_core::RngCore, OsRng};
use tracing::info;
use zeroize::Zeroizing;

use crate::error::{EnvError, EnvResult};
use crate::storage::file_io::{read_trimmed, restrict_permissions, write_atomic};

/// Key length required by XChaCha20-Poly1305
pub const KEY_LEN: usize = 32;

/// Raw key bytes, zeroed on drop
///
/// The length is not checked on load; a wrong-sized key fails when it is
/// used.
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0u8; KEY_LEN]);
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Wrap existing key bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    /// Decode a key from its base64 text form
    pub fn from_base64(encoded: &str) -> EnvResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| EnvError::Decryption(format!("Invalid key encoding: {}", e)))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Encode the key as base64 text
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(STANDARD.encode(self.bytes.as_slice()))
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Don't print key material in Debug output
impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Read an existing key file
pub fn read_key(key_path: &Path) -> EnvResult<SecretKey> {
    let encoded = Zeroizing::new(read_trimmed(key_path)?);
    SecretKey::from_base64(&encoded)
}

/// Write a key file with owner-only permissions
pub fn write_key(key_path: &Path, key: &SecretKey) -> EnvResult<()> {
    write_atomic(key_path, key.to_base64().as_bytes())?;
    restrict_permissions(key_path)
}

/// Load the key at `key_path`, generating and persisting one if absent
///
/// Returns the key and whether it was newly created.
pub fn load_or_create_key(key_path: &Path) -> EnvResult<(SecretKey, bool)> {
    if key_path.exists() {
        return Ok((read_key(key_path)?, false));
    }

    let key = SecretKey::generate();
    write_key(key_path, &key)?;
    info!(path = %key_path.display(), "generated new encryption key");
    Ok((key, true))
}
