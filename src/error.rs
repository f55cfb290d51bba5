//! Error types for the Noise handshake core

use thiserror::Error;

/// Main error type for noisecore
#[derive(Error, Debug)]
pub enum NoiseCoreError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Cryptographic errors
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Protocol errors
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Configuration parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid config format at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid value for {field}")]
    InvalidValue { field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Unsupported {what}: {value}")]
    Unsupported { what: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cryptographic operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed")]
    KeyDerivation,

    #[error("Encryption failed")]
    Encryption,

    #[error("Decryption failed: invalid ciphertext or authentication tag")]
    Decryption,

    #[error("Invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("Nonce exhausted: key must not be used again")]
    NonceExhausted,

    #[error("DH computation failed")]
    DiffieHellman,
}

/// Handshake message and session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid message length: expected at least {expected}, got {got}")]
    InvalidMessageLength { expected: usize, got: usize },

    #[error("Message authentication failed")]
    AuthenticationFailed,
}

impl NoiseCoreError {
    /// Check if this error is recoverable
    ///
    /// Every cryptographic or protocol failure terminates the session; a new
    /// handshake is the only way forward.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Crypto(_) => false,
            Self::Protocol(_) => false,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Protocol(_) => 4,
            Self::Crypto(_) => 5,
        }
    }
}

/// Result type alias for noisecore operations
pub type Result<T> = std::result::Result<T, NoiseCoreError>;
