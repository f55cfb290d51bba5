//! SymmetricState: chaining key, transcript hash and the current CipherState

use std::fmt;

use crate::crypto::sha256::HASH_LEN;
use crate::protocol::cipher_state::CipherState;

/// Handshake key material owned by one side of one handshake
///
/// `h` only ever grows by folding in more data; it is never reset.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricState {
    /// Current cipher, replaced wholesale on every MixKey
    pub cs: CipherState,
    /// Chaining key
    pub ck: [u8; HASH_LEN],
    /// Transcript hash
    pub h: [u8; HASH_LEN],
}

impl SymmetricState {
    /// Transcript hash so far (handshake channel binding)
    pub fn handshake_hash(&self) -> &[u8; HASH_LEN] {
        &self.h
    }
}

impl fmt::Debug for SymmetricState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricState")
            .field("cs", &self.cs)
            .field("h", &hex::encode(&self.h[..8]))
            .finish_non_exhaustive()
    }
}
