//! CipherState: a key plus its nonce
//!
//! Implements the AEAD wrapper and the EncryptWithAd / DecryptWithAd
//! session-layer contract. The nonce advances once per successful send and
//! once per authenticated receive, never on a failed decryption.

use std::fmt;

use crate::crypto::{aead, CryptoProvider};
use crate::error::CryptoError;
use crate::protocol::nonce::Nonce;

/// Length of a cipher key
pub const KEY_LEN: usize = aead::KEY_LEN;

/// The all-zero key meaning "no key established yet"
pub const EMPTY_KEY: [u8; KEY_LEN] = [0u8; KEY_LEN];

/// Create the empty-key sentinel
pub fn create_empty_key() -> [u8; KEY_LEN] {
    EMPTY_KEY
}

/// Check whether a key is the empty-key sentinel
pub fn is_empty_key(k: &[u8; KEY_LEN]) -> bool {
    k == &EMPTY_KEY
}

/// Outcome of an authenticated decryption
///
/// `plaintext` is empty whenever `valid` is false; unauthenticated bytes
/// are never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    pub plaintext: Vec<u8>,
    pub valid: bool,
}

impl Decrypted {
    fn ok(plaintext: Vec<u8>) -> Self {
        Self {
            plaintext,
            valid: true,
        }
    }

    fn invalid() -> Self {
        Self {
            plaintext: Vec::new(),
            valid: false,
        }
    }

    /// Convert to a `Result`, mapping an authentication failure to an error
    pub fn into_result(self) -> Result<Vec<u8>, CryptoError> {
        if self.valid {
            Ok(self.plaintext)
        } else {
            Err(CryptoError::Decryption)
        }
    }
}

/// Encrypt under `k` with the current value of `n`
///
/// Does not advance the nonce.
pub fn encrypt<C: CryptoProvider>(
    crypto: &C,
    k: &[u8; KEY_LEN],
    n: &Nonce,
    ad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    n.assert_value()?;
    crypto.aead_encrypt(plaintext, &n.get_bytes(), ad, k)
}

/// Decrypt under `k` with the current value of `n`
///
/// Authentication failure is reported as `valid == false`; only nonce
/// exhaustion is an error. Does not advance the nonce.
pub fn decrypt<C: CryptoProvider>(
    crypto: &C,
    k: &[u8; KEY_LEN],
    n: &Nonce,
    ad: &[u8],
    ciphertext: &[u8],
) -> Result<Decrypted, CryptoError> {
    n.assert_value()?;

    match crypto.aead_decrypt(ciphertext, &n.get_bytes(), ad, k) {
        Ok(plaintext) => Ok(Decrypted::ok(plaintext)),
        Err(_) => {
            tracing::warn!("AEAD authentication failed at nonce {}", n.value());
            Ok(Decrypted::invalid())
        }
    }
}

/// A cipher key and the nonce bound to it
#[derive(Clone, PartialEq, Eq)]
pub struct CipherState {
    k: [u8; KEY_LEN],
    n: Nonce,
}

impl CipherState {
    /// InitializeKey: wrap `k` with a fresh nonce
    pub fn new(k: [u8; KEY_LEN]) -> Self {
        Self { k, n: Nonce::new() }
    }

    /// CipherState with no key
    pub fn empty() -> Self {
        Self::new(create_empty_key())
    }

    /// Build from an untrusted slice, rejecting anything but 32 bytes
    pub fn from_slice(k: &[u8]) -> Result<Self, CryptoError> {
        let k: [u8; KEY_LEN] = k.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            got: k.len(),
        })?;
        Ok(Self::new(k))
    }

    /// True iff the key is not the empty sentinel
    pub fn has_key(&self) -> bool {
        !is_empty_key(&self.k)
    }

    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.k
    }

    pub fn nonce(&self) -> &Nonce {
        &self.n
    }

    /// Encrypt and consume exactly one nonce value
    pub fn encrypt_with_ad<C: CryptoProvider>(
        &mut self,
        crypto: &C,
        ad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let ciphertext = encrypt(crypto, &self.k, &self.n, ad, plaintext)?;
        self.n.increment()?;
        Ok(ciphertext)
    }

    /// Decrypt, advancing the nonce only if the ciphertext authenticated
    pub fn decrypt_with_ad<C: CryptoProvider>(
        &mut self,
        crypto: &C,
        ad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Decrypted, CryptoError> {
        let result = decrypt(crypto, &self.k, &self.n, ad, ciphertext)?;
        if result.valid {
            self.n.increment()?;
        }
        Ok(result)
    }

    #[cfg(test)]
    pub(crate) fn with_nonce(k: [u8; KEY_LEN], n: Nonce) -> Self {
        Self { k, n }
    }
}

impl fmt::Debug for CipherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherState")
            .field("has_key", &self.has_key())
            .field("n", &self.n.value())
            .finish()
    }
}
