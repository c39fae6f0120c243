//! Key material and signed documents generated with OpenSSL 3.
//!
//! The payload `"hello\nworld\n"` was signed with
//! `openssl dgst -sha256 -sign` (RSA-2048, EC P-256) and with
//! `openssl pkeyutl -sign -rawin` over its SHA-256 digest (Ed25519).

/// The normalized payload every fixture signature covers.
pub const HELLO_PAYLOAD: &str = "hello\nworld\n";

/// RSA-2048 public key (SubjectPublicKeyInfo PEM).
pub const RSA_PUBLIC_KEY: &str = include_str!("../fixtures/rsa.pub");

/// A second, unrelated RSA-2048 public key.
pub const RSA_OTHER_PUBLIC_KEY: &str = include_str!("../fixtures/rsa_other.pub");

/// EC P-256 public key (SubjectPublicKeyInfo PEM).
pub const EC_P256_PUBLIC_KEY: &str = include_str!("../fixtures/ec.pub");

/// Ed25519 public key (SubjectPublicKeyInfo PEM).
pub const ED25519_PUBLIC_KEY: &str = include_str!("../fixtures/ed.pub");

/// Ed25519 private key (PKCS#8 PEM) matching [`ED25519_PUBLIC_KEY`].
pub const ED25519_PRIVATE_KEY: &str = include_str!("../fixtures/ed.key");

/// RSA PKCS#1 v1.5 / SHA-256 signature over [`HELLO_PAYLOAD`].
pub const HELLO_RSA_SIGNATURE_B64: &str = "IebmPj81rorNtZLjcPVeFDnG6HnKCSK7aW7i9+Z7lz0xHtA3MHesNky8yrzPQ8cAPFsV3txjI9sHwwvl9KSuMQ71a4EcB4Hhhl69xr0zrsPjBtv5FbjHh+xZzSkS6Eh+6EhfLOeVvtM3NQekl5M+7OfS03/0sBDt6UB9nBH3qqQumUjHIAlf7BtikNoUTPcb0y++5XnYm9XqC3H55nVMZ/YRUPgvLf+HERk3LboSnaQ1BkmHP5wMQUSTilsvyvm4s23UCh4so/f+Svv8QPFvN5sMV5F2OfhG8rgJTo7JBzIyJyKscGJmQkEFU1L5soEr6fGllesY5TLJ4yXNYxIWhw==";

/// ECDSA P-256 / SHA-256 (DER) signature over [`HELLO_PAYLOAD`].
pub const HELLO_EC_SIGNATURE_B64: &str = "MEUCIAyy9QAvyImJ9XYpLo1TKZ/yy36c/XikpFhJHKNFTPyIAiEArEAY4AWdATjiN2v9qFKqd8VNelxYpZYQugxVSnqPpoc=";

/// Ed25519 signature over the SHA-256 digest of [`HELLO_PAYLOAD`].
pub const HELLO_ED25519_SIGNATURE_B64: &str = "2qsOE9UqPL1TPZK0ztZwz5qsnPLsRKdg4wg+r55my/5cksPWxITQrydbS2HNWuEd2/+STnDufmMrvz1F/ihKDA==";

/// `HELLO_PAYLOAD` with the RSA signature embedded (64-column base64).
pub const HELLO_RSA_SIGNED: &str = include_str!("../fixtures/hello_rsa.signed.txt");

/// `HELLO_PAYLOAD` with the ECDSA signature embedded.
pub const HELLO_EC_SIGNED: &str = include_str!("../fixtures/hello_ec.signed.txt");

/// `HELLO_PAYLOAD` with the Ed25519 signature embedded.
pub const HELLO_ED25519_SIGNED: &str = include_str!("../fixtures/hello_ed.signed.txt");
