//! Per-key message counter

use crate::crypto::aead;
use crate::error::CryptoError;

/// Counter value reserved by Noise; a key that reaches it is spent
pub const MAX_NONCE: u64 = u64::MAX;

/// Strictly monotonic 64-bit counter bound to one cipher key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nonce(u64);

impl Nonce {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self(0)
    }

    /// Current counter value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Counter serialized as the AEAD nonce
    pub fn get_bytes(&self) -> [u8; aead::NONCE_LEN] {
        aead::nonce_bytes(self.0)
    }

    /// Advance by one, failing closed instead of wrapping
    pub fn increment(&mut self) -> Result<(), CryptoError> {
        self.0 = self.0.checked_add(1).ok_or(CryptoError::NonceExhausted)?;
        Ok(())
    }

    /// Fail if the counter may no longer be used with this key
    pub fn assert_value(&self) -> Result<(), CryptoError> {
        if self.0 >= MAX_NONCE {
            tracing::warn!("Nonce exhausted, refusing to reuse key");
            return Err(CryptoError::NonceExhausted);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_value(value: u64) -> Self {
        Self(value)
    }
}
