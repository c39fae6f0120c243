//! PEM public keys and algorithm dispatch.
//!
//! A key file holds a `PUBLIC KEY` (SubjectPublicKeyInfo) PEM block. The
//! algorithm identifier inside it selects the verification scheme:
//!
//! | Key                      | Scheme                               |
//! |--------------------------|--------------------------------------|
//! | `rsaEncryption`          | RSASSA-PKCS1-v1_5 / SHA-256          |
//! | `id-ecPublicKey` P-256   | ECDSA / SHA-256, ASN.1 DER signature |
//! | `id-ecPublicKey` P-384   | ECDSA / SHA-256, ASN.1 DER signature |
//! | `id-Ed25519`             | Ed25519 over the SHA-256 digest      |

use std::fmt;
use std::path::Path;

use ed25519_dalek::pkcs8::spki::SubjectPublicKeyInfoRef;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{Document, EncodePublicKey, ObjectIdentifier};
use ed25519_dalek::{Verifier, VerifyingKey};
use ring::signature::{
    ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA256_ASN1, RSA_PKCS1_2048_8192_SHA256,
    UnparsedPublicKey, VerificationAlgorithm,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digest::PayloadDigest;
use crate::error::{CryptoError, CryptoResult};
use crate::signature::SignatureBytes;

const OID_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const OID_SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

/// PEM label of a SubjectPublicKeyInfo block.
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Maximum accepted key file size (64 KiB).
const MAX_KEY_FILE_SIZE: u64 = 65_536;

/// The signature scheme a public key implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    RsaPkcs1Sha256,
    /// ECDSA on NIST P-256 with SHA-256.
    EcdsaP256Sha256,
    /// ECDSA on NIST P-384 with SHA-256.
    EcdsaP384Sha256,
    /// Ed25519 over the SHA-256 digest.
    Ed25519Sha256,
}

impl KeyAlgorithm {
    /// Short human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RsaPkcs1Sha256 => "RSA PKCS#1 v1.5 / SHA-256",
            Self::EcdsaP256Sha256 => "ECDSA P-256 / SHA-256",
            Self::EcdsaP384Sha256 => "ECDSA P-384 / SHA-256",
            Self::Ed25519Sha256 => "Ed25519 / SHA-256",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone)]
enum KeyMaterial {
    /// PKCS#1 `RSAPublicKey` DER or an uncompressed EC point, as ring expects.
    Ring(Vec<u8>),
    Ed25519(VerifyingKey),
}

/// A public key parsed from a PEM SubjectPublicKeyInfo block.
#[derive(Clone)]
pub struct PublicKey {
    algorithm: KeyAlgorithm,
    material: KeyMaterial,
}

impl PublicKey {
    /// Parse a PEM `PUBLIC KEY` block.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the text is not PEM, the
    /// label is not `PUBLIC KEY`, the DER is malformed, or the algorithm is
    /// not supported.
    pub fn from_pem(pem: &str) -> CryptoResult<Self> {
        let (label, document) = Document::from_pem(pem.trim())
            .map_err(|e| CryptoError::InvalidPublicKey(format!("malformed PEM: {e}")))?;
        if label != PUBLIC_KEY_LABEL {
            return Err(CryptoError::InvalidPublicKey(format!(
                "expected a '{PUBLIC_KEY_LABEL}' PEM block, found '{label}'"
            )));
        }
        Self::from_spki_der(document.as_bytes())
    }

    /// Parse a DER SubjectPublicKeyInfo.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the DER is malformed or
    /// the algorithm is not supported.
    pub fn from_spki_der(der: &[u8]) -> CryptoResult<Self> {
        let spki = SubjectPublicKeyInfoRef::try_from(der).map_err(|e| {
            CryptoError::InvalidPublicKey(format!("malformed SubjectPublicKeyInfo: {e}"))
        })?;
        let (oid, params) = spki.algorithm.oids().map_err(|e| {
            CryptoError::InvalidPublicKey(format!("malformed algorithm identifier: {e}"))
        })?;
        let key_bits = spki.subject_public_key.raw_bytes();

        let algorithm = if oid == OID_RSA_ENCRYPTION {
            KeyAlgorithm::RsaPkcs1Sha256
        } else if oid == OID_ED25519 {
            KeyAlgorithm::Ed25519Sha256
        } else if oid == OID_EC_PUBLIC_KEY {
            match params {
                Some(curve) if curve == OID_SECP256R1 => KeyAlgorithm::EcdsaP256Sha256,
                Some(curve) if curve == OID_SECP384R1 => KeyAlgorithm::EcdsaP384Sha256,
                Some(curve) => {
                    return Err(CryptoError::InvalidPublicKey(format!(
                        "unsupported elliptic curve: {curve}"
                    )));
                },
                None => {
                    return Err(CryptoError::InvalidPublicKey(
                        "EC key without named curve parameters".to_owned(),
                    ));
                },
            }
        } else {
            return Err(CryptoError::InvalidPublicKey(format!(
                "unsupported key algorithm: {oid}"
            )));
        };

        let material = if algorithm == KeyAlgorithm::Ed25519Sha256 {
            let key = VerifyingKey::try_from(key_bits)
                .map_err(|e| CryptoError::InvalidPublicKey(format!("bad Ed25519 key: {e}")))?;
            KeyMaterial::Ed25519(key)
        } else {
            if key_bits.is_empty() {
                return Err(CryptoError::InvalidPublicKey("empty key bits".to_owned()));
            }
            KeyMaterial::Ring(key_bits.to_vec())
        };

        debug!(algorithm = %algorithm, "parsed public key");
        Ok(Self {
            algorithm,
            material,
        })
    }

    /// Read and parse a PEM key file.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::IoError`] if the file cannot be read or is
    /// larger than 64 KiB, and [`CryptoError::InvalidPublicKey`] if it does
    /// not hold a supported public key.
    pub fn from_pem_file(path: impl AsRef<Path>) -> CryptoResult<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path).map_err(|e| CryptoError::IoError(e.to_string()))?;
        if meta.len() > MAX_KEY_FILE_SIZE {
            return Err(CryptoError::IoError(format!(
                "key file is {} bytes, exceeding the {MAX_KEY_FILE_SIZE} byte limit",
                meta.len()
            )));
        }
        let pem = std::fs::read_to_string(path).map_err(|e| CryptoError::IoError(e.to_string()))?;
        Self::from_pem(&pem)
    }

    /// Wrap an Ed25519 verifying key.
    #[must_use]
    pub fn from_ed25519(key: VerifyingKey) -> Self {
        Self {
            algorithm: KeyAlgorithm::Ed25519Sha256,
            material: KeyMaterial::Ed25519(key),
        }
    }

    /// The signature scheme this key implies.
    #[must_use]
    pub const fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// Encode an Ed25519 key as PEM. Other algorithms are verify-only.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyEncoding`] for non-Ed25519 keys or if the
    /// encoder fails.
    pub fn to_pem(&self) -> CryptoResult<String> {
        match &self.material {
            KeyMaterial::Ed25519(key) => key
                .to_public_key_pem(LineEnding::LF)
                .map_err(|e| CryptoError::KeyEncoding(e.to_string())),
            KeyMaterial::Ring(_) => Err(CryptoError::KeyEncoding(format!(
                "PEM export is only supported for Ed25519 keys, not {}",
                self.algorithm
            ))),
        }
    }

    /// Verify `signature` over the SHA-256 digest of `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::SignatureVerificationFailed`] with the library
    /// diagnostic if the signature is malformed or does not match.
    pub fn verify(&self, payload: &[u8], signature: &SignatureBytes) -> CryptoResult<()> {
        match &self.material {
            KeyMaterial::Ed25519(key) => {
                let sig = ed25519_dalek::Signature::from_slice(signature.as_bytes())
                    .map_err(|e| CryptoError::SignatureVerificationFailed(e.to_string()))?;
                let digest = PayloadDigest::of(payload);
                key.verify(digest.as_bytes(), &sig)
                    .map_err(|e| CryptoError::SignatureVerificationFailed(e.to_string()))
            },
            KeyMaterial::Ring(bytes) => {
                let algorithm: &'static dyn VerificationAlgorithm = match self.algorithm {
                    KeyAlgorithm::RsaPkcs1Sha256 => &RSA_PKCS1_2048_8192_SHA256,
                    KeyAlgorithm::EcdsaP256Sha256 => &ECDSA_P256_SHA256_ASN1,
                    KeyAlgorithm::EcdsaP384Sha256 => &ECDSA_P384_SHA256_ASN1,
                    KeyAlgorithm::Ed25519Sha256 => {
                        return Err(CryptoError::InvalidPublicKey(
                            "Ed25519 key stored as raw material".to_owned(),
                        ));
                    },
                };
                UnparsedPublicKey::new(algorithm, bytes)
                    .verify(payload, signature.as_bytes())
                    .map_err(|_| {
                        CryptoError::SignatureVerificationFailed(format!(
                            "{} signature does not match the payload digest ({} signature bytes)",
                            self.algorithm,
                            signature.len()
                        ))
                    })
            },
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigblock_test::fixtures;

    #[test]
    fn test_parse_fixture_keys() {
        let rsa = PublicKey::from_pem(fixtures::RSA_PUBLIC_KEY).unwrap();
        assert_eq!(rsa.algorithm(), KeyAlgorithm::RsaPkcs1Sha256);

        let ec = PublicKey::from_pem(fixtures::EC_P256_PUBLIC_KEY).unwrap();
        assert_eq!(ec.algorithm(), KeyAlgorithm::EcdsaP256Sha256);

        let ed = PublicKey::from_pem(fixtures::ED25519_PUBLIC_KEY).unwrap();
        assert_eq!(ed.algorithm(), KeyAlgorithm::Ed25519Sha256);
    }

    #[test]
    fn test_verify_openssl_signatures() {
        let payload = fixtures::HELLO_PAYLOAD.as_bytes();
        let cases = [
            (fixtures::RSA_PUBLIC_KEY, fixtures::HELLO_RSA_SIGNATURE_B64),
            (fixtures::EC_P256_PUBLIC_KEY, fixtures::HELLO_EC_SIGNATURE_B64),
            (fixtures::ED25519_PUBLIC_KEY, fixtures::HELLO_ED25519_SIGNATURE_B64),
        ];

        for (pem, sig_b64) in cases {
            let key = PublicKey::from_pem(pem).unwrap();
            let sig = SignatureBytes::from_base64(sig_b64).unwrap();
            assert!(
                key.verify(payload, &sig).is_ok(),
                "{} signature should verify",
                key.algorithm()
            );
            assert!(key.verify(b"hello\nworld", &sig).is_err());
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let other = PublicKey::from_pem(fixtures::RSA_OTHER_PUBLIC_KEY).unwrap();
        let sig = SignatureBytes::from_base64(fixtures::HELLO_RSA_SIGNATURE_B64).unwrap();

        let err = other
            .verify(fixtures::HELLO_PAYLOAD.as_bytes(), &sig)
            .unwrap_err();
        assert!(matches!(err, CryptoError::SignatureVerificationFailed(_)));
    }

    #[test]
    fn test_malformed_signature_is_verification_failure() {
        let payload = fixtures::HELLO_PAYLOAD.as_bytes();
        let garbage = SignatureBytes::from_vec(vec![1, 2, 3]);

        for pem in [
            fixtures::RSA_PUBLIC_KEY,
            fixtures::EC_P256_PUBLIC_KEY,
            fixtures::ED25519_PUBLIC_KEY,
        ] {
            let key = PublicKey::from_pem(pem).unwrap();
            let err = key.verify(payload, &garbage).unwrap_err();
            assert!(matches!(err, CryptoError::SignatureVerificationFailed(_)));
        }
    }

    #[test]
    fn test_rejects_private_key_pem() {
        let err = PublicKey::from_pem(fixtures::ED25519_PRIVATE_KEY).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidPublicKey(_)));
        assert!(err.to_string().contains("PRIVATE KEY"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            PublicKey::from_pem("not a key"),
            Err(CryptoError::InvalidPublicKey(_))
        ));
        assert!(matches!(
            PublicKey::from_pem("-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n"),
            Err(CryptoError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_from_pem_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.pub");
        std::fs::write(&path, fixtures::EC_P256_PUBLIC_KEY).unwrap();

        let key = PublicKey::from_pem_file(&path).unwrap();
        assert_eq!(key.algorithm(), KeyAlgorithm::EcdsaP256Sha256);

        let missing = PublicKey::from_pem_file(dir.path().join("nope.pub"));
        assert!(matches!(missing, Err(CryptoError::IoError(_))));
    }

    #[test]
    fn test_oversized_key_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.pub");
        std::fs::write(&path, "A".repeat(70_000)).unwrap();

        let result = PublicKey::from_pem_file(&path);
        assert!(matches!(result, Err(CryptoError::IoError(_))));
    }

    #[test]
    fn test_ed25519_pem_roundtrip() {
        let key = PublicKey::from_pem(fixtures::ED25519_PUBLIC_KEY).unwrap();
        let pem = key.to_pem().unwrap();
        assert_eq!(pem.trim(), fixtures::ED25519_PUBLIC_KEY.trim());

        let rsa = PublicKey::from_pem(fixtures::RSA_PUBLIC_KEY).unwrap();
        assert!(matches!(rsa.to_pem(), Err(CryptoError::KeyEncoding(_))));
    }

    #[test]
    fn test_algorithm_serde_names() {
        let json = serde_json::to_string(&KeyAlgorithm::EcdsaP256Sha256).unwrap();
        assert_eq!(json, "\"ecdsa-p256-sha256\"");
    }
}
