//! Cryptographic functions for envguard
//!
//! Provides XChaCha20-Poly1305 authenticated encryption of env files with a
//! random 32-byte key kept in a base64 key file.

pub mod cipher;
pub mod key;
pub mod vault;

pub use cipher::{open, seal, NONCE_LEN};
pub use key::{load_or_create_key, read_key, write_key, SecretKey, KEY_LEN};
pub use vault::{
    decrypt_file, decrypt_to_bytes, encrypt_file, encrypted_path, rotate, RotationReport,
};
