//! File-level encryption operations
//!
//! Encryption works on the raw bytes of the document file, not on the
//! parsed structure; decrypting restores the file byte for byte.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::document::Document;
use crate::error::{EnvError, EnvResult};
use crate::storage::file_io::{
    read_required, read_trimmed, remove_if_exists, rename_staged, restrict_permissions,
    stage_file, with_suffix, write_atomic, write_file,
};

use super::cipher::{open, seal};
use super::key::{load_or_create_key, read_key, SecretKey};

/// Suffix for the default ciphertext path (`.env` -> `.env.enc`)
pub const ENCRYPTED_SUFFIX: &str = ".enc";

/// Suffix under which the previous key is kept while a rotation is in flight
pub const RETAINED_KEY_SUFFIX: &str = ".old";

/// Default ciphertext path for a document
pub fn encrypted_path(path: &Path) -> PathBuf {
    with_suffix(path, ENCRYPTED_SUFFIX)
}

/// Outcome of a key rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationReport {
    /// Ciphertext file, now sealed under the new key
    pub encrypted_path: PathBuf,
    /// Key file, now holding the new key
    pub key_path: PathBuf,
    /// Size of the re-encrypted plaintext
    pub plaintext_len: usize,
}

/// Encrypt the file at `source` into `output`
///
/// The key at `key_path` is created if it does not exist yet. Returns a
/// human-readable status line.
pub fn encrypt_file(source: &Path, key_path: &Path, output: &Path) -> EnvResult<String> {
    let plaintext = Zeroizing::new(read_required(source)?);
    let (key, created) = load_or_create_key(key_path)?;

    let blob = seal(&plaintext, &key)?;
    write_atomic(output, blob.as_bytes())?;
    info!(
        source = %source.display(),
        output = %output.display(),
        new_key = created,
        "file encrypted"
    );

    Ok(format!(
        "Encrypted to {} using key in {}",
        output.display(),
        key_path.display()
    ))
}

/// Decrypt `input` with the key at `key_path` and return the plaintext
pub fn decrypt_to_bytes(input: &Path, key_path: &Path) -> EnvResult<Zeroizing<Vec<u8>>> {
    if !input.exists() {
        return Err(EnvError::not_found(input));
    }
    if !key_path.exists() {
        return Err(EnvError::not_found(key_path));
    }

    let key = read_key(key_path)?;
    let blob = read_trimmed(input)?;
    Ok(Zeroizing::new(open(&blob, &key)?))
}

/// Decrypt `input` with the key at `key_path` and write the plaintext to `target`
///
/// Returns the number of plaintext bytes written.
pub fn decrypt_file(input: &Path, key_path: &Path, target: &Path) -> EnvResult<usize> {
    let plaintext = decrypt_to_bytes(input, key_path)?;
    write_file(target, &plaintext)?;
    info!(input = %input.display(), target = %target.display(), "file decrypted");
    Ok(plaintext.len())
}

/// Re-encrypt `encrypted` under a brand-new key
///
/// The plaintext never touches the disk. The new key and ciphertext are
/// staged next to their targets and the old key is copied to `<key>.old`
/// until both are in place. The ciphertext is swapped first; if the key
/// swap then fails, the previous ciphertext is written back. Every failure
/// leaves a key on disk that opens the ciphertext on disk.
pub fn rotate(encrypted: &Path, key_path: &Path) -> EnvResult<RotationReport> {
    rotate_with(encrypted, key_path, rename_staged)
}

/// Rotation with a pluggable rename step
///
/// `commit` must leave the staged file in place when it fails.
fn rotate_with<F>(encrypted: &Path, key_path: &Path, mut commit: F) -> EnvResult<RotationReport>
where
    F: FnMut(&Path, &Path) -> EnvResult<()>,
{
    let plaintext = decrypt_to_bytes(encrypted, key_path)?;
    let previous_blob = read_required(encrypted)?;

    let new_key = SecretKey::generate();
    let blob = seal(&plaintext, &new_key)?;

    let retained = with_suffix(key_path, RETAINED_KEY_SUFFIX);
    fs::copy(key_path, &retained)
        .map_err(|e| EnvError::Io(format!("Failed to retain previous key: {}", e)))?;
    if let Err(e) = restrict_permissions(&retained) {
        discard(&[&retained]);
        return Err(e);
    }

    let staged_key = match stage_file(key_path, new_key.to_base64().as_bytes()) {
        Ok(staged) => staged,
        Err(e) => {
            discard(&[&retained]);
            return Err(e);
        }
    };
    if let Err(e) = restrict_permissions(&staged_key) {
        discard(&[&staged_key, &retained]);
        return Err(e);
    }

    let staged_blob = match stage_file(encrypted, blob.as_bytes()) {
        Ok(staged) => staged,
        Err(e) => {
            discard(&[&staged_key, &retained]);
            return Err(e);
        }
    };

    if let Err(e) = commit(staged_blob.as_path(), encrypted) {
        discard(&[&staged_blob, &staged_key, &retained]);
        return Err(e);
    }

    if let Err(e) = commit(staged_key.as_path(), key_path) {
        // The ciphertext on disk is sealed under the staged key now
        let restored = stage_file(encrypted, &previous_blob).and_then(|staged| {
            commit(staged.as_path(), encrypted).map_err(|err| {
                discard(&[&staged]);
                err
            })
        });

        return match restored {
            Ok(()) => {
                warn!(
                    encrypted = %encrypted.display(),
                    "key swap failed; previous ciphertext restored"
                );
                discard(&[&staged_key, &retained]);
                Err(e)
            }
            Err(restore_err) => {
                warn!(
                    staged_key = %staged_key.display(),
                    retained = %retained.display(),
                    error = %restore_err,
                    "key swap failed and previous ciphertext could not be restored"
                );
                Err(EnvError::Io(format!(
                    "Key rotation incomplete ({}); the ciphertext now opens with the key in {}",
                    e,
                    staged_key.display()
                )))
            }
        };
    }

    remove_if_exists(&retained)?;
    info!(encrypted = %encrypted.display(), key = %key_path.display(), "key rotated");

    Ok(RotationReport {
        encrypted_path: encrypted.to_path_buf(),
        key_path: key_path.to_path_buf(),
        plaintext_len: plaintext.len(),
    })
}

fn discard<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

impl Document {
    /// Encrypt this document's file to `output` (default `<path>.enc`)
    pub fn encrypt(&self, key_path: &Path, output: Option<&Path>) -> EnvResult<String> {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| encrypted_path(self.path()));
        encrypt_file(self.path(), key_path, &output)
    }

    /// Decrypt `input` into this document's file and reload it
    pub fn decrypt(&mut self, input: &Path, key_path: &Path) -> EnvResult<&mut Self> {
        let target = self.path().to_path_buf();
        decrypt_file(input, key_path, &target)?;
        self.load()
    }
}
