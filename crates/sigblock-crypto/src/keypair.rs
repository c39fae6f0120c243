//! Ed25519 signing keys with secure memory handling.
//!
//! The signer side of the scheme: a key pair signs the SHA-256 digest of a
//! normalized payload. Keys are stored as PKCS#8 PEM so they interoperate
//! with `openssl pkey`.

use std::io::Write;
use std::path::Path;

use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::digest::PayloadDigest;
use crate::error::{CryptoError, CryptoResult};
use crate::public_key::PublicKey;
use crate::signature::SignatureBytes;

/// An Ed25519 key pair with secure memory handling.
///
/// The secret key is zeroized on drop to prevent leaking sensitive material.
#[derive(ZeroizeOnDrop)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new random key pair.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Parse a PKCS#8 `PRIVATE KEY` PEM block.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPrivateKey`] if the PEM is malformed or
    /// not an Ed25519 key.
    pub fn from_pkcs8_pem(pem: &str) -> CryptoResult<Self> {
        let signing_key = SigningKey::from_pkcs8_pem(pem.trim())
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Read a PKCS#8 PEM private key file.
    ///
    /// # Security
    ///
    /// Refuses to read key files that are symlinks, and reads through a
    /// `Zeroizing` buffer so the PEM text is cleared from memory afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::IoError`] on I/O failures or symlink detection,
    /// or [`CryptoError::InvalidPrivateKey`] if the file is not a valid key.
    pub fn from_pem_file(path: impl AsRef<Path>) -> CryptoResult<Self> {
        let path = path.as_ref();
        let meta =
            std::fs::symlink_metadata(path).map_err(|e| CryptoError::IoError(e.to_string()))?;
        if meta.file_type().is_symlink() {
            return Err(CryptoError::IoError(
                "refusing to read key file: path is a symlink".into(),
            ));
        }

        let pem = Zeroizing::new(
            std::fs::read_to_string(path).map_err(|e| CryptoError::IoError(e.to_string()))?,
        );
        Self::from_pkcs8_pem(&pem)
    }

    /// Encode the private key as PKCS#8 PEM (careful - sensitive!).
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyEncoding`] if encoding fails.
    pub fn to_pkcs8_pem(&self) -> CryptoResult<Zeroizing<String>> {
        self.signing_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CryptoError::KeyEncoding(e.to_string()))
    }

    /// The matching public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_ed25519(self.signing_key.verifying_key())
    }

    /// Get a short key ID (first 8 bytes of the public key) as hex.
    ///
    /// Useful for identifying keys in logs without exposing the full key.
    #[must_use]
    pub fn key_id_hex(&self) -> String {
        hex::encode(&self.signing_key.verifying_key().as_bytes()[..8])
    }

    /// Sign the SHA-256 digest of `payload`.
    #[must_use]
    pub fn sign_payload(&self, payload: &[u8]) -> SignatureBytes {
        let digest = PayloadDigest::of(payload);
        SignatureBytes::from(self.signing_key.sign(digest.as_bytes()))
    }

    /// Write the key pair as `<private_path>` (PKCS#8 PEM) and `<public_path>`
    /// (SubjectPublicKeyInfo PEM).
    ///
    /// # Security
    ///
    /// On Unix the private key file is created with `O_CREAT | O_EXCL` and
    /// mode 0o600, so an existing file is never overwritten and there is no
    /// world-readable window.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::IoError`] if either file cannot be written
    /// (including when the private key file already exists).
    pub fn write_pem_files(
        &self,
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> CryptoResult<()> {
        let private_path = private_path.as_ref();
        let public_path = public_path.as_ref();

        if let Some(parent) = private_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CryptoError::IoError(e.to_string()))?;
        }

        let private_pem = self.to_pkcs8_pem()?;
        let public_pem = self.public_key().to_pem()?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(private_path)
            .map_err(|e| CryptoError::IoError(format!("{}: {e}", private_path.display())))?;
        file.write_all(private_pem.as_bytes())
            .map_err(|e| CryptoError::IoError(e.to_string()))?;

        std::fs::write(public_path, public_pem)
            .map_err(|e| CryptoError::IoError(format!("{}: {e}", public_path.display())))?;
        Ok(())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_id", &self.key_id_hex())
            .finish_non_exhaustive()
    }
}
