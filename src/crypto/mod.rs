//! Cryptographic primitives for Noise
//!
//! This module provides the primitive backend consumed by the handshake engine:
//! - ChaCha20-Poly1305 AEAD encryption (aead)
//! - SHA-256 hashing and HKDF (sha256)
//! - X25519 Diffie-Hellman key exchange (x25519)
//! - The `CryptoProvider` trait tying them together (provider)

pub mod aead;
pub mod provider;
pub mod sha256;
pub mod x25519;

pub use provider::{CryptoProvider, RustCrypto};
