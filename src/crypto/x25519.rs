//! X25519 Diffie-Hellman for Noise
//!
//! Provides key generation and the DH function `DH(private, public)`.

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::CryptoError;

/// Key length for X25519 (both private and public keys are 32 bytes)
pub const KEY_LEN: usize = 32;

/// Generate a new X25519 keypair
///
/// Returns (private_key, public_key)
pub fn generate_keypair() -> ([u8; KEY_LEN], [u8; KEY_LEN]) {
    let secret = StaticSecret::random_from_rng(OsRng);
    let public = PublicKey::from(&secret);
    (secret.to_bytes(), public.to_bytes())
}

/// Derive public key from private key
pub fn public_key(private_key: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
    let secret = StaticSecret::from(*private_key);
    PublicKey::from(&secret).to_bytes()
}

/// Perform X25519 Diffie-Hellman key exchange
///
/// Rejects low-order public keys: a non-contributory exchange yields the
/// all-zero secret, which must never reach MixKey.
pub fn shared_secret(
    private_key: &[u8; KEY_LEN],
    public_key: &[u8; KEY_LEN],
) -> Result<[u8; KEY_LEN], CryptoError> {
    let secret = StaticSecret::from(*private_key);
    let public = PublicKey::from(*public_key);
    let shared = secret.diffie_hellman(&public);

    if !shared.was_contributory() {
        return Err(CryptoError::DiffieHellman);
    }

    Ok(shared.to_bytes())
}
