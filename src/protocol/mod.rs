//! Noise protocol state
//!
//! This module contains the handshake core:
//! - Nonce discipline (nonce)
//! - CipherState and the AEAD wrapper (cipher_state)
//! - SymmetricState (symmetric_state)
//! - The handshake engine: MixHash, MixKey, EncryptAndHash, Split (handshake)
//! - Message buffers (messages)
//! - Transport phase after Split (transport)

pub mod cipher_state;
pub mod handshake;
pub mod messages;
pub mod nonce;
pub mod symmetric_state;
pub mod transport;

pub use cipher_state::{CipherState, Decrypted};
pub use handshake::HandshakeEngine;
pub use messages::MessageBuffer;
pub use nonce::Nonce;
pub use symmetric_state::SymmetricState;
pub use transport::{Role, TransportState};
