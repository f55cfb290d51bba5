//! Handshake configuration parser
//!
//! Parses `.conf` files with a single [Handshake] section:
//!
//! ```text
//! [Handshake]
//! Protocol = Noise_XX_25519_ChaChaPoly_SHA256
//! Prologue = L25vaXNl
//! ```

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::ConfigError;

/// Protocol used when none is configured
pub const DEFAULT_PROTOCOL: &str = "Noise_XX_25519_ChaChaPoly_SHA256";

/// A validated Noise protocol name: `Noise_<pattern>_<dh>_<cipher>_<hash>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolName {
    name: String,
    pattern: String,
}

impl ProtocolName {
    /// Parse and validate a protocol name against the primitives this crate
    /// implements
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = name.split('_').collect();
        let [prefix, pattern, dh, cipher, hash] = parts.as_slice() else {
            return Err(ConfigError::InvalidValue {
                field: format!("Protocol ({})", name),
            });
        };

        if *prefix != "Noise" {
            return Err(ConfigError::InvalidValue {
                field: format!("Protocol ({})", name),
            });
        }
        if pattern.is_empty() || !pattern.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidValue {
                field: format!("Protocol pattern ({})", pattern),
            });
        }
        if *dh != "25519" {
            return Err(ConfigError::Unsupported {
                what: "DH function",
                value: dh.to_string(),
            });
        }
        if *cipher != "ChaChaPoly" {
            return Err(ConfigError::Unsupported {
                what: "cipher",
                value: cipher.to_string(),
            });
        }
        if *hash != "SHA256" {
            return Err(ConfigError::Unsupported {
                what: "hash",
                value: hash.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Handshake pattern, e.g. "XX"
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for ProtocolName {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROTOCOL.to_string(),
            pattern: "XX".to_string(),
        }
    }
}

impl fmt::Display for ProtocolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parameters that seed a handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// Protocol name, hashed into the initial transcript
    pub protocol: ProtocolName,
    /// Prologue mixed into the transcript right after initialization
    pub prologue: Vec<u8>,
}

impl HandshakeConfig {
    /// Parse a handshake configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a handshake configuration from a string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut protocol: Option<ProtocolName> = None;
        let mut prologue: Vec<u8> = Vec::new();
        let mut current_section: Option<Section> = None;

        for (line_num, line) in content.lines().enumerate() {
            let line_num = line_num + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = if line.eq_ignore_ascii_case("[handshake]") {
                    Some(Section::Handshake)
                } else {
                    tracing::warn!("Skipping unknown section {}", line);
                    Some(Section::Unknown)
                };
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::ParseError {
                    line: line_num,
                    message: format!("Expected 'key = value', got: {}", line),
                });
            };

            let key = key.trim().to_lowercase();
            let value = value.trim();

            match current_section {
                Some(Section::Handshake) => match key.as_str() {
                    "protocol" => {
                        protocol = Some(ProtocolName::parse(value)?);
                    }
                    "prologue" => {
                        prologue = BASE64.decode(value).map_err(|_| ConfigError::InvalidValue {
                            field: "Prologue".to_string(),
                        })?;
                    }
                    _ => {
                        tracing::warn!("Unknown handshake key: {}", key);
                    }
                },
                Some(Section::Unknown) => {}
                None => {
                    return Err(ConfigError::ParseError {
                        line: line_num,
                        message: "Configuration value outside of any section".to_string(),
                    });
                }
            }
        }

        let protocol = protocol.ok_or(ConfigError::MissingField {
            field: "Protocol".to_string(),
        })?;

        Ok(HandshakeConfig { protocol, prologue })
    }
}

/// Section type during parsing
#[derive(Clone, Copy)]
enum Section {
    Handshake,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEST_CONFIG: &str = r#"
# libp2p-style handshake
[Handshake]
Protocol = Noise_XX_25519_ChaChaPoly_SHA256
Prologue = L25vaXNl

[Transport]
MaxFrame = 65535
"#;

    #[test]
    fn test_parse_config() {
        let config = HandshakeConfig::parse(TEST_CONFIG).unwrap();
        assert_eq!(config.protocol.as_str(), DEFAULT_PROTOCOL);
        assert_eq!(config.protocol.pattern(), "XX");
        assert_eq!(config.prologue, b"/noise");
    }

    #[test]
    fn test_default_config() {
        let config = HandshakeConfig::default();
        assert_eq!(config.protocol, ProtocolName::parse(DEFAULT_PROTOCOL).unwrap());
        assert!(config.prologue.is_empty());
    }

    #[test]
    fn test_protocol_names() {
        assert_eq!(
            ProtocolName::parse("Noise_IK_25519_ChaChaPoly_SHA256")
                .unwrap()
                .pattern(),
            "IK"
        );
        assert!(matches!(
            ProtocolName::parse("Noise_XX_448_ChaChaPoly_SHA256"),
            Err(ConfigError::Unsupported { what: "DH function", .. })
        ));
        assert!(matches!(
            ProtocolName::parse("Noise_XX_25519_AESGCM_SHA256"),
            Err(ConfigError::Unsupported { what: "cipher", .. })
        ));
        assert!(matches!(
            ProtocolName::parse("Noise_XX_25519_ChaChaPoly_BLAKE2s"),
            Err(ConfigError::Unsupported { what: "hash", .. })
        ));
        assert!(ProtocolName::parse("Noise_XX").is_err());
        assert!(ProtocolName::parse("Noisy_XX_25519_ChaChaPoly_SHA256").is_err());
        assert!(ProtocolName::parse("Noise__25519_ChaChaPoly_SHA256").is_err());
    }

    #[test]
    fn test_missing_protocol() {
        let result = HandshakeConfig::parse("[Handshake]\nPrologue = L25vaXNl\n");
        assert!(matches!(result, Err(ConfigError::MissingField { .. })));
    }

    #[test]
    fn test_invalid_prologue() {
        let config = "[Handshake]\nProtocol = Noise_XX_25519_ChaChaPoly_SHA256\nPrologue = !!!\n";
        assert!(matches!(
            HandshakeConfig::parse(config),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_value_outside_section() {
        let result = HandshakeConfig::parse("Protocol = Noise_XX_25519_ChaChaPoly_SHA256\n");
        assert!(matches!(result, Err(ConfigError::ParseError { line: 1, .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_CONFIG.as_bytes()).unwrap();

        let config = HandshakeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.prologue, b"/noise");
    }

    #[test]
    fn test_missing_file() {
        let result = HandshakeConfig::from_file("/nonexistent/noise.conf");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
