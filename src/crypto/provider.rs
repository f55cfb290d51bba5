//! Pluggable primitive backend
//!
//! The handshake engine never calls a primitive directly; it goes through a
//! [`CryptoProvider`], so alternative backends (hardware, test doubles) can be
//! swapped in without touching the state machine.

use super::{aead, sha256, x25519};
use crate::error::CryptoError;

/// The five primitives a Noise `_25519_ChaChaPoly_SHA256` handshake needs
pub trait CryptoProvider {
    /// AEAD encrypt, returning ciphertext || tag
    fn aead_encrypt(
        &self,
        plaintext: &[u8],
        nonce: &[u8; aead::NONCE_LEN],
        ad: &[u8],
        key: &[u8; aead::KEY_LEN],
    ) -> Result<Vec<u8>, CryptoError>;

    /// AEAD decrypt; any error means the ciphertext did not authenticate
    fn aead_decrypt(
        &self,
        ciphertext: &[u8],
        nonce: &[u8; aead::NONCE_LEN],
        ad: &[u8],
        key: &[u8; aead::KEY_LEN],
    ) -> Result<Vec<u8>, CryptoError>;

    /// 32-byte digest
    fn hash(&self, data: &[u8]) -> [u8; sha256::HASH_LEN];

    /// Two-output HKDF keyed by the chaining key
    fn hkdf(
        &self,
        chaining_key: &[u8; sha256::HASH_LEN],
        input_key_material: &[u8],
    ) -> Result<([u8; sha256::HASH_LEN], [u8; sha256::HASH_LEN]), CryptoError>;

    /// Raw X25519 shared secret
    fn x25519_shared_secret(
        &self,
        private_key: &[u8; x25519::KEY_LEN],
        public_key: &[u8; x25519::KEY_LEN],
    ) -> Result<[u8; x25519::KEY_LEN], CryptoError>;
}

/// Default backend: chacha20poly1305, sha2/hkdf and x25519-dalek
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCrypto;

impl CryptoProvider for RustCrypto {
    fn aead_encrypt(
        &self,
        plaintext: &[u8],
        nonce: &[u8; aead::NONCE_LEN],
        ad: &[u8],
        key: &[u8; aead::KEY_LEN],
    ) -> Result<Vec<u8>, CryptoError> {
        aead::encrypt(key, nonce, plaintext, ad)
    }

    fn aead_decrypt(
        &self,
        ciphertext: &[u8],
        nonce: &[u8; aead::NONCE_LEN],
        ad: &[u8],
        key: &[u8; aead::KEY_LEN],
    ) -> Result<Vec<u8>, CryptoError> {
        aead::decrypt(key, nonce, ciphertext, ad)
    }

    fn hash(&self, data: &[u8]) -> [u8; sha256::HASH_LEN] {
        sha256::hash(data)
    }

    fn hkdf(
        &self,
        chaining_key: &[u8; sha256::HASH_LEN],
        input_key_material: &[u8],
    ) -> Result<([u8; sha256::HASH_LEN], [u8; sha256::HASH_LEN]), CryptoError> {
        sha256::hkdf2(chaining_key, input_key_material)
    }

    fn x25519_shared_secret(
        &self,
        private_key: &[u8; x25519::KEY_LEN],
        public_key: &[u8; x25519::KEY_LEN],
    ) -> Result<[u8; x25519::KEY_LEN], CryptoError> {
        x25519::shared_secret(private_key, public_key)
    }
}

impl<T: CryptoProvider + ?Sized> CryptoProvider for &T {
    fn aead_encrypt(
        &self,
        plaintext: &[u8],
        nonce: &[u8; aead::NONCE_LEN],
        ad: &[u8],
        key: &[u8; aead::KEY_LEN],
    ) -> Result<Vec<u8>, CryptoError> {
        (**self).aead_encrypt(plaintext, nonce, ad, key)
    }

    fn aead_decrypt(
        &self,
        ciphertext: &[u8],
        nonce: &[u8; aead::NONCE_LEN],
        ad: &[u8],
        key: &[u8; aead::KEY_LEN],
    ) -> Result<Vec<u8>, CryptoError> {
        (**self).aead_decrypt(ciphertext, nonce, ad, key)
    }

    fn hash(&self, data: &[u8]) -> [u8; sha256::HASH_LEN] {
        (**self).hash(data)
    }

    fn hkdf(
        &self,
        chaining_key: &[u8; sha256::HASH_LEN],
        input_key_material: &[u8],
    ) -> Result<([u8; sha256::HASH_LEN], [u8; sha256::HASH_LEN]), CryptoError> {
        (**self).hkdf(chaining_key, input_key_material)
    }

    fn x25519_shared_secret(
        &self,
        private_key: &[u8; x25519::KEY_LEN],
        public_key: &[u8; x25519::KEY_LEN],
    ) -> Result<[u8; x25519::KEY_LEN], CryptoError> {
        (**self).x25519_shared_secret(private_key, public_key)
    }
}
