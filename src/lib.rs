//! noisecore - Noise Protocol Framework handshake core
//!
//! The symmetric/cipher state engine every Noise handshake pattern and every
//! post-handshake transport message depends on: key derivation, transcript
//! hashing, AEAD with associated data, and nonce discipline.
//!
//! # Features
//!
//! - CipherState / SymmetricState per the Noise specification
//! - Pluggable primitive backend (`CryptoProvider`), defaulting to
//!   X25519, ChaCha20-Poly1305 and SHA-256
//! - Fail-closed nonces and Diffie-Hellman
//! - Role-aware Split into per-direction transport states
//!
//! Pattern orchestration (which tokens are sent in which message), network I/O
//! and framing are left to the caller.
//!
//! # Usage
//!
//! ```no_run
//! use noisecore::{HandshakeEngine, Role};
//!
//! # fn main() -> Result<(), noisecore::NoiseCoreError> {
//! let engine = HandshakeEngine::new();
//! let mut ss = engine.initialize_symmetric("Noise_XX_25519_ChaChaPoly_SHA256");
//! # let (peer_ephemeral, shared_secret) = ([0u8; 32], [0u8; 32]);
//! engine.mix_hash(&mut ss, &peer_ephemeral);
//! engine.mix_key(&mut ss, &shared_secret)?;
//! let _ciphertext = engine.encrypt_and_hash(&mut ss, b"payload")?;
//! let mut transport = engine.split_for(ss, Role::Initiator)?;
//! let _message = transport.write_message(b"hello")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;

pub use config::{HandshakeConfig, ProtocolName};
pub use crypto::{CryptoProvider, RustCrypto};
pub use error::NoiseCoreError;
pub use protocol::{
    CipherState, Decrypted, HandshakeEngine, MessageBuffer, Nonce, Role, SymmetricState,
    TransportState,
};
