//! Transport phase
//!
//! After Split, each side holds one CipherState per direction. Messages must
//! arrive in order and without gaps: a missing or duplicated message
//! desynchronizes the receive nonce and every later read fails.

use crate::crypto::{CryptoProvider, RustCrypto};
use crate::error::{ProtocolError, Result};
use crate::protocol::cipher_state::CipherState;
use crate::protocol::handshake::HandshakeEngine;
use crate::protocol::messages::MessageBuffer;
use crate::protocol::nonce::MAX_NONCE;

/// Send-side nonce value after which a new handshake should be started
pub const REKEY_AFTER_MESSAGES: u64 = MAX_NONCE - (1 << 16);

/// Which side of the handshake we played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Responder,
}

/// Per-direction cipher states for an established session
#[derive(Debug)]
pub struct TransportState<C: CryptoProvider = RustCrypto> {
    engine: HandshakeEngine<C>,
    send: CipherState,
    recv: CipherState,
}

impl<C: CryptoProvider> TransportState<C> {
    pub fn new(engine: HandshakeEngine<C>, send: CipherState, recv: CipherState) -> Self {
        Self { engine, send, recv }
    }

    /// Encrypt an outgoing payload
    pub fn write_message(&mut self, payload: &[u8]) -> Result<MessageBuffer> {
        Ok(self.engine.write_message_regular(&mut self.send, payload)?)
    }

    /// Decrypt an incoming message
    ///
    /// An authentication failure means the session is compromised or out of
    /// sync; the caller must tear it down.
    pub fn read_message(&mut self, message: &MessageBuffer) -> Result<Vec<u8>> {
        let result = self.engine.read_message_regular(&mut self.recv, message)?;
        if !result.valid {
            return Err(ProtocolError::AuthenticationFailed.into());
        }
        Ok(result.plaintext)
    }

    /// Check if the send key is close enough to exhaustion to re-handshake
    pub fn needs_rekey(&self) -> bool {
        self.send.nonce().value() >= REKEY_AFTER_MESSAGES
    }

    pub fn sending(&self) -> &CipherState {
        &self.send
    }

    pub fn receiving(&self) -> &CipherState {
        &self.recv
    }

    /// Hand the two directions to independent sender and receiver tasks
    pub fn into_parts(self) -> (CipherState, CipherState) {
        (self.send, self.recv)
    }
}
