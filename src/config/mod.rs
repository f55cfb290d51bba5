//! Configuration parsing for the handshake engine
//!
//! This module handles the protocol name and prologue that seed a handshake.

mod parser;

pub use parser::{HandshakeConfig, ProtocolName, DEFAULT_PROTOCOL};
