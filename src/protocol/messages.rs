//! Handshake wire record
//!
//! A `MessageBuffer` carries an ephemeral public key (`ne`), an encrypted
//! static key (`ns`) and the ciphertext payload. Post-handshake messages use
//! the same shape with `ne` zeroed and `ns` empty.

use crate::error::ProtocolError;

/// Length of the ephemeral public key field
pub const NE_LEN: usize = 32;

/// One handshake or transport message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBuffer {
    /// Ephemeral public key, all zeros when unused
    pub ne: [u8; NE_LEN],
    /// Encrypted static public key, empty when unused
    pub ns: Vec<u8>,
    /// Encrypted (or pass-through) payload
    pub ciphertext: Vec<u8>,
}

impl MessageBuffer {
    /// Post-handshake message carrying only a ciphertext
    pub fn regular(ciphertext: Vec<u8>) -> Self {
        Self {
            ne: [0u8; NE_LEN],
            ns: Vec::new(),
            ciphertext,
        }
    }

    /// Serialize as ne || ns || ciphertext
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(NE_LEN + self.ns.len() + self.ciphertext.len());
        buf.extend_from_slice(&self.ne);
        buf.extend_from_slice(&self.ns);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Parse ne || ns || ciphertext, with the `ns` length fixed by the caller
    pub fn from_bytes(data: &[u8], ns_len: usize) -> Result<Self, ProtocolError> {
        let header = NE_LEN + ns_len;
        if data.len() < header {
            return Err(ProtocolError::InvalidMessageLength {
                expected: header,
                got: data.len(),
            });
        }

        let mut ne = [0u8; NE_LEN];
        ne.copy_from_slice(&data[..NE_LEN]);

        Ok(Self {
            ne,
            ns: data[NE_LEN..header].to_vec(),
            ciphertext: data[header..].to_vec(),
        })
    }
}
