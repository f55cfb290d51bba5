//! SHA-256 primitives for Noise
//!
//! Implements HASH and the two-output HKDF used by MixKey and Split.

use hkdf::Hkdf;
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// Length of SHA-256 hash output
pub const HASH_LEN: usize = 32;

/// SHA-256 hash of a single input
pub fn hash(data: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 hash of two concatenated inputs: HASH(a || b)
pub fn hash_two(a: &[u8], b: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

/// Noise HKDF with two outputs
///
/// temp_key = HMAC(chaining_key, input_key_material)
/// output1  = HMAC(temp_key, 0x01)
/// output2  = HMAC(temp_key, output1 || 0x02)
///
/// This is RFC 5869 extract (salt = chaining key) followed by expand with
/// empty info.
pub fn hkdf2(
    chaining_key: &[u8; HASH_LEN],
    input_key_material: &[u8],
) -> Result<([u8; HASH_LEN], [u8; HASH_LEN]), CryptoError> {
    let hk = Hkdf::<Sha256>::new(Some(chaining_key), input_key_material);
    let mut okm = [0u8; HASH_LEN * 2];
    hk.expand(&[], &mut okm)
        .map_err(|_| CryptoError::KeyDerivation)?;

    let mut out1 = [0u8; HASH_LEN];
    let mut out2 = [0u8; HASH_LEN];
    out1.copy_from_slice(&okm[..HASH_LEN]);
    out2.copy_from_slice(&okm[HASH_LEN..]);

    Ok((out1, out2))
}
