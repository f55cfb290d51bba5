//! Noise handshake engine
//!
//! `HandshakeEngine` is the contract consumed by pattern orchestrators (XX,
//! IK, ...). It owns no session state: every operation takes the
//! `SymmetricState` or `CipherState` it acts on by exclusive borrow, and
//! `split` consumes the `SymmetricState` so handshake keys cannot outlive the
//! handshake.
//!
//! Orchestrators call, per handshake stage: zero or more `mix_hash` /
//! `mix_key`, one `encrypt_and_hash` or `decrypt_and_hash` per payload, and
//! finally one `split`.

use crate::config::HandshakeConfig;
use crate::crypto::{sha256::HASH_LEN, x25519, CryptoProvider, RustCrypto};
use crate::error::CryptoError;
use crate::protocol::cipher_state::{self, CipherState, Decrypted, KEY_LEN};
use crate::protocol::messages::MessageBuffer;
use crate::protocol::nonce::Nonce;
use crate::protocol::symmetric_state::SymmetricState;
use crate::protocol::transport::{Role, TransportState};

/// Symmetric/cipher state engine, generic over the primitive backend
#[derive(Debug, Clone, Default)]
pub struct HandshakeEngine<C: CryptoProvider = RustCrypto> {
    crypto: C,
}

impl HandshakeEngine<RustCrypto> {
    /// Engine backed by the default RustCrypto primitives
    pub fn new() -> Self {
        Self { crypto: RustCrypto }
    }
}

impl<C: CryptoProvider> HandshakeEngine<C> {
    /// Engine backed by a custom provider
    pub fn with_provider(crypto: C) -> Self {
        Self { crypto }
    }

    pub fn crypto(&self) -> &C {
        &self.crypto
    }

    // Cipher state related

    /// EncryptWithAd: encrypt, then consume one nonce
    pub fn encrypt_with_ad(
        &self,
        cs: &mut CipherState,
        ad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        cs.encrypt_with_ad(&self.crypto, ad, plaintext)
    }

    /// DecryptWithAd: decrypt, consuming a nonce only on success
    pub fn decrypt_with_ad(
        &self,
        cs: &mut CipherState,
        ad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Decrypted, CryptoError> {
        cs.decrypt_with_ad(&self.crypto, ad, ciphertext)
    }

    pub fn has_key(&self, cs: &CipherState) -> bool {
        cs.has_key()
    }

    pub fn create_empty_key(&self) -> [u8; KEY_LEN] {
        cipher_state::create_empty_key()
    }

    pub fn is_empty_key(&self, k: &[u8; KEY_LEN]) -> bool {
        cipher_state::is_empty_key(k)
    }

    /// Raw AEAD encrypt with an explicit key and nonce
    pub fn encrypt(
        &self,
        k: &[u8; KEY_LEN],
        n: &Nonce,
        ad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        cipher_state::encrypt(&self.crypto, k, n, ad, plaintext)
    }

    /// Raw AEAD decrypt with an explicit key and nonce
    pub fn decrypt(
        &self,
        k: &[u8; KEY_LEN],
        n: &Nonce,
        ad: &[u8],
        ciphertext: &[u8],
    ) -> Result<Decrypted, CryptoError> {
        cipher_state::decrypt(&self.crypto, k, n, ad, ciphertext)
    }

    /// InitializeKey
    pub fn initialize_key(&self, k: [u8; KEY_LEN]) -> CipherState {
        CipherState::new(k)
    }

    // Symmetric state related

    /// EncryptAndHash
    ///
    /// Pass-through while no key is established. The bytes actually sent are
    /// what gets folded into the transcript.
    pub fn encrypt_and_hash(
        &self,
        ss: &mut SymmetricState,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let ciphertext = if ss.cs.has_key() {
            let h = ss.h;
            ss.cs.encrypt_with_ad(&self.crypto, &h, plaintext)?
        } else {
            plaintext.to_vec()
        };

        self.mix_hash(ss, &ciphertext);
        Ok(ciphertext)
    }

    /// DecryptAndHash
    ///
    /// The ciphertext as received is folded into the transcript whether or
    /// not it authenticated.
    pub fn decrypt_and_hash(
        &self,
        ss: &mut SymmetricState,
        ciphertext: &[u8],
    ) -> Result<Decrypted, CryptoError> {
        let result = if ss.cs.has_key() {
            let h = ss.h;
            ss.cs.decrypt_with_ad(&self.crypto, &h, ciphertext)?
        } else {
            Decrypted {
                plaintext: ciphertext.to_vec(),
                valid: true,
            }
        };

        self.mix_hash(ss, ciphertext);
        Ok(result)
    }

    /// DH(private, public)
    ///
    /// Any primitive failure aborts the handshake; there is no fallback
    /// secret.
    pub fn dh(
        &self,
        private_key: &[u8; x25519::KEY_LEN],
        public_key: &[u8; x25519::KEY_LEN],
    ) -> Result<[u8; x25519::KEY_LEN], CryptoError> {
        self.crypto
            .x25519_shared_secret(private_key, public_key)
            .map_err(|e| {
                tracing::warn!("X25519 failed for peer key {:02x?}: {}", &public_key[..8], e);
                CryptoError::DiffieHellman
            })
    }

    /// MixHash: h = HASH(h || data)
    pub fn mix_hash(&self, ss: &mut SymmetricState, data: &[u8]) {
        ss.h = self.get_hash(&ss.h, data);
    }

    /// HASH(a || b)
    pub fn get_hash(&self, a: &[u8], b: &[u8]) -> [u8; HASH_LEN] {
        let mut buf = Vec::with_capacity(a.len() + b.len());
        buf.extend_from_slice(a);
        buf.extend_from_slice(b);
        self.crypto.hash(&buf)
    }

    /// MixKey: (ck, k) = HKDF(ck, ikm), cs = InitializeKey(k)
    pub fn mix_key(&self, ss: &mut SymmetricState, ikm: &[u8]) -> Result<(), CryptoError> {
        let (ck, temp_k) = self.crypto.hkdf(&ss.ck, ikm)?;
        ss.cs = self.initialize_key(temp_k);
        ss.ck = ck;
        tracing::debug!("mix_key: h={:02x?}", &ss.h[..8]);
        Ok(())
    }

    /// InitializeSymmetric(protocol_name)
    pub fn initialize_symmetric(&self, protocol_name: &str) -> SymmetricState {
        let h = self.hash_protocol_name(protocol_name.as_bytes());
        tracing::debug!("initialize_symmetric({}): h={:02x?}", protocol_name, &h[..8]);

        SymmetricState {
            cs: self.initialize_key(self.create_empty_key()),
            ck: h,
            h,
        }
    }

    /// InitializeSymmetric followed by MixHash(prologue)
    pub fn initialize_with_config(&self, config: &HandshakeConfig) -> SymmetricState {
        let mut ss = self.initialize_symmetric(config.protocol.as_str());
        self.mix_hash(&mut ss, &config.prologue);
        ss
    }

    /// Names of up to 32 bytes are zero-padded; longer names are hashed
    pub fn hash_protocol_name(&self, protocol_name: &[u8]) -> [u8; HASH_LEN] {
        if protocol_name.len() <= HASH_LEN {
            let mut h = [0u8; HASH_LEN];
            h[..protocol_name.len()].copy_from_slice(protocol_name);
            h
        } else {
            self.get_hash(protocol_name, &[])
        }
    }

    /// Split: (k1, k2) = HKDF(ck, "")
    ///
    /// Consumes the handshake state. cs1 carries initiator-to-responder
    /// traffic, cs2 the reverse.
    pub fn split(&self, ss: SymmetricState) -> Result<(CipherState, CipherState), CryptoError> {
        let (temp_k1, temp_k2) = self.crypto.hkdf(&ss.ck, &[])?;
        tracing::debug!("split: handshake hash={:02x?}", &ss.h[..8]);
        Ok((self.initialize_key(temp_k1), self.initialize_key(temp_k2)))
    }

    /// Split and assign directions for one side of the handshake
    pub fn split_for(&self, ss: SymmetricState, role: Role) -> Result<TransportState<C>, CryptoError>
    where
        C: Clone,
    {
        let (cs1, cs2) = self.split(ss)?;
        let (send, recv) = match role {
            Role::Initiator => (cs1, cs2),
            Role::Responder => (cs2, cs1),
        };
        Ok(TransportState::new(self.clone(), send, recv))
    }

    // Transport messages

    /// Encrypt a post-handshake payload with empty associated data
    pub fn write_message_regular(
        &self,
        cs: &mut CipherState,
        payload: &[u8],
    ) -> Result<MessageBuffer, CryptoError> {
        let ciphertext = self.encrypt_with_ad(cs, &[], payload)?;
        Ok(MessageBuffer::regular(ciphertext))
    }

    /// Decrypt a post-handshake message with empty associated data
    pub fn read_message_regular(
        &self,
        cs: &mut CipherState,
        message: &MessageBuffer,
    ) -> Result<Decrypted, CryptoError> {
        self.decrypt_with_ad(cs, &[], &message.ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{aead, sha256};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    const XX: &str = "Noise_XX_25519_ChaChaPoly_SHA256";

    /// Provider whose X25519 always fails
    struct BrokenDh;

    impl CryptoProvider for BrokenDh {
        fn aead_encrypt(
            &self,
            plaintext: &[u8],
            nonce: &[u8; aead::NONCE_LEN],
            ad: &[u8],
            key: &[u8; aead::KEY_LEN],
        ) -> Result<Vec<u8>, CryptoError> {
            RustCrypto.aead_encrypt(plaintext, nonce, ad, key)
        }

        fn aead_decrypt(
            &self,
            ciphertext: &[u8],
            nonce: &[u8; aead::NONCE_LEN],
            ad: &[u8],
            key: &[u8; aead::KEY_LEN],
        ) -> Result<Vec<u8>, CryptoError> {
            RustCrypto.aead_decrypt(ciphertext, nonce, ad, key)
        }

        fn hash(&self, data: &[u8]) -> [u8; 32] {
            RustCrypto.hash(data)
        }

        fn hkdf(
            &self,
            chaining_key: &[u8; 32],
            input_key_material: &[u8],
        ) -> Result<([u8; 32], [u8; 32]), CryptoError> {
            RustCrypto.hkdf(chaining_key, input_key_material)
        }

        fn x25519_shared_secret(
            &self,
            _private_key: &[u8; 32],
            _public_key: &[u8; 32],
        ) -> Result<[u8; 32], CryptoError> {
            Err(CryptoError::Encryption)
        }
    }

    struct Keypair {
        private: [u8; 32],
        public: [u8; 32],
    }

    fn keypair() -> Keypair {
        let (private, public) = x25519::generate_keypair();
        Keypair { private, public }
    }

    /// Drive both sides through the XX token sequence, returning the final
    /// symmetric states.
    fn run_xx(engine: &HandshakeEngine) -> (SymmetricState, SymmetricState) {
        let (init_s, init_e) = (keypair(), keypair());
        let (resp_s, resp_e) = (keypair(), keypair());

        let mut init = engine.initialize_symmetric(XX);
        let mut resp = engine.initialize_symmetric(XX);

        // -> e
        engine.mix_hash(&mut init, &init_e.public);
        let ct = engine.encrypt_and_hash(&mut init, b"hello").unwrap();
        assert_eq!(ct, b"hello");

        engine.mix_hash(&mut resp, &init_e.public);
        let out = engine.decrypt_and_hash(&mut resp, &ct).unwrap();
        assert!(out.valid);
        assert_eq!(out.plaintext, b"hello");

        // <- e, ee, s, es
        engine.mix_hash(&mut resp, &resp_e.public);
        let ee = engine.dh(&resp_e.private, &init_e.public).unwrap();
        engine.mix_key(&mut resp, &ee).unwrap();
        let ns = engine.encrypt_and_hash(&mut resp, &resp_s.public).unwrap();
        let es = engine.dh(&resp_s.private, &init_e.public).unwrap();
        engine.mix_key(&mut resp, &es).unwrap();
        let ct = engine.encrypt_and_hash(&mut resp, b"responder payload").unwrap();

        engine.mix_hash(&mut init, &resp_e.public);
        let ee = engine.dh(&init_e.private, &resp_e.public).unwrap();
        engine.mix_key(&mut init, &ee).unwrap();
        let rs = engine.decrypt_and_hash(&mut init, &ns).unwrap();
        assert!(rs.valid);
        assert_eq!(rs.plaintext, resp_s.public);
        let rs: [u8; 32] = rs.plaintext.try_into().unwrap();
        let es = engine.dh(&init_e.private, &rs).unwrap();
        engine.mix_key(&mut init, &es).unwrap();
        let out = engine.decrypt_and_hash(&mut init, &ct).unwrap();
        assert!(out.valid);
        assert_eq!(out.plaintext, b"responder payload");

        // -> s, se
        let ns = engine.encrypt_and_hash(&mut init, &init_s.public).unwrap();
        let se = engine.dh(&init_s.private, &resp_e.public).unwrap();
        engine.mix_key(&mut init, &se).unwrap();
        let ct = engine.encrypt_and_hash(&mut init, b"initiator payload").unwrap();

        let is = engine.decrypt_and_hash(&mut resp, &ns).unwrap();
        assert!(is.valid);
        let is: [u8; 32] = is.plaintext.try_into().unwrap();
        assert_eq!(is, init_s.public);
        let se = engine.dh(&resp_e.private, &is).unwrap();
        engine.mix_key(&mut resp, &se).unwrap();
        let out = engine.decrypt_and_hash(&mut resp, &ct).unwrap();
        assert!(out.valid);
        assert_eq!(out.plaintext, b"initiator payload");

        (init, resp)
    }

    #[test]
    fn test_short_protocol_name_is_padded() {
        let engine = HandshakeEngine::new();
        let ss = engine.initialize_symmetric("N");

        let mut expected = [0u8; 32];
        expected[0] = b'N';
        assert_eq!(ss.h, expected);
        assert_eq!(ss.ck, expected);
        assert!(!ss.cs.has_key());
        assert_eq!(ss.cs.nonce().value(), 0);
    }

    #[test]
    fn test_exactly_32_byte_name_is_not_hashed() {
        let engine = HandshakeEngine::new();
        let name = "Noise_XX_25519_ChaChaPoly_SHA256";
        assert_eq!(name.len(), 32);
        assert_eq!(&engine.hash_protocol_name(name.as_bytes()), name.as_bytes());
    }

    #[test]
    fn test_long_protocol_name_is_hashed() {
        let engine = HandshakeEngine::new();
        let name = "Noise_XXpsk3_25519_ChaChaPoly_SHA256_ext";
        assert_eq!(name.len(), 40);

        let ss = engine.initialize_symmetric(name);
        assert_eq!(ss.h, sha256::hash(name.as_bytes()));
        assert_eq!(ss.ck, ss.h);
    }

    #[test]
    fn test_mix_hash_is_order_sensitive() {
        let engine = HandshakeEngine::new();
        let mut a = engine.initialize_symmetric(XX);
        let mut b = engine.initialize_symmetric(XX);

        engine.mix_hash(&mut a, b"one");
        engine.mix_hash(&mut a, b"two");
        engine.mix_hash(&mut b, b"two");
        engine.mix_hash(&mut b, b"one");

        assert_ne!(a.h, b.h);
        assert_eq!(a.h, sha256::hash_two(&sha256::hash_two(XX.as_bytes(), b"one"), b"two"));
    }

    #[test]
    fn test_transcript_determinism() {
        let engine = HandshakeEngine::new();
        let mut a = engine.initialize_symmetric(XX);
        let mut b = engine.initialize_symmetric(XX);

        for ss in [&mut a, &mut b] {
            engine.mix_hash(ss, b"prologue");
            engine.mix_key(ss, &[1u8; 32]).unwrap();
            engine.mix_hash(ss, &[2u8; 32]);
            engine.mix_key(ss, &[3u8; 32]).unwrap();
        }

        assert_eq!(a.h, b.h);
        assert_eq!(a.ck, b.ck);
        assert_eq!(a.cs, b.cs);
    }

    #[test]
    fn test_mix_key_resets_cipher() {
        let engine = HandshakeEngine::new();
        let mut ss = engine.initialize_symmetric(XX);
        let original_ck = ss.ck;

        engine.mix_key(&mut ss, &[9u8; 32]).unwrap();
        assert!(ss.cs.has_key());
        assert_ne!(ss.ck, original_ck);

        engine.encrypt_and_hash(&mut ss, b"x").unwrap();
        assert_eq!(ss.cs.nonce().value(), 1);

        engine.mix_key(&mut ss, &[10u8; 32]).unwrap();
        assert_eq!(ss.cs.nonce().value(), 0);
    }

    #[test]
    fn test_encrypt_and_hash_without_key_passes_through() {
        let engine = HandshakeEngine::new();
        let mut ss = engine.initialize_symmetric(XX);
        let h0 = ss.h;

        let out = engine.encrypt_and_hash(&mut ss, b"clear").unwrap();
        assert_eq!(out, b"clear");
        assert_eq!(ss.h, sha256::hash_two(&h0, b"clear"));
        assert_eq!(ss.cs.nonce().value(), 0);
    }

    #[test]
    fn test_transcript_binds_ciphertext() {
        let engine = HandshakeEngine::new();
        let mut sender = engine.initialize_symmetric(XX);
        engine.mix_key(&mut sender, &[5u8; 32]).unwrap();
        let mut receiver = sender.clone();
        let h0 = sender.h;

        let ct = engine.encrypt_and_hash(&mut sender, b"secret").unwrap();
        assert_ne!(ct, b"secret");
        assert_eq!(sender.h, sha256::hash_two(&h0, &ct));

        let out = engine.decrypt_and_hash(&mut receiver, &ct).unwrap();
        assert!(out.valid);
        assert_eq!(out.plaintext, b"secret");
        assert_eq!(receiver.h, sender.h);
    }

    #[test]
    fn test_decrypt_and_hash_rejects_diverged_transcript() {
        let engine = HandshakeEngine::new();
        let mut sender = engine.initialize_symmetric(XX);
        engine.mix_key(&mut sender, &[5u8; 32]).unwrap();
        let mut receiver = sender.clone();
        engine.mix_hash(&mut receiver, b"something the sender never saw");

        let ct = engine.encrypt_and_hash(&mut sender, b"secret").unwrap();
        let out = engine.decrypt_and_hash(&mut receiver, &ct).unwrap();
        assert!(!out.valid);
        assert!(out.plaintext.is_empty());
        assert_eq!(receiver.cs.nonce().value(), 0);
    }

    #[test]
    fn test_dh_failure_propagates() {
        let engine = HandshakeEngine::with_provider(BrokenDh);
        let result = engine.dh(&[1u8; 32], &[2u8; 32]);
        assert_eq!(result, Err(CryptoError::DiffieHellman));
    }

    #[test]
    fn test_dh_low_order_point_rejected() {
        let engine = HandshakeEngine::new();
        let k = keypair();
        assert_eq!(engine.dh(&k.private, &[0u8; 32]), Err(CryptoError::DiffieHellman));
    }

    /// Log sink shared between a test and its tracing subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_mix_key_output_order() {
        let engine = HandshakeEngine::new();
        let mut ss = engine.initialize_symmetric(XX);
        let ck0 = ss.ck;
        let ikm = [7u8; 32];

        engine.mix_key(&mut ss, &ikm).unwrap();

        let (out1, out2) = sha256::hkdf2(&ck0, &ikm).unwrap();
        assert_eq!(ss.ck, out1);
        assert_eq!(ss.cs.key(), &out2);
        assert_eq!(ss.cs.nonce().value(), 0);
    }

    #[test]
    fn test_split_output_order() {
        let engine = HandshakeEngine::new();
        let mut ss = engine.initialize_symmetric(XX);
        engine.mix_key(&mut ss, &[7u8; 32]).unwrap();
        let ck = ss.ck;

        let (cs1, cs2) = engine.split(ss.clone()).unwrap();
        let (k1, k2) = sha256::hkdf2(&ck, &[]).unwrap();
        assert_eq!(cs1.key(), &k1);
        assert_eq!(cs2.key(), &k2);

        let init = engine.split_for(ss.clone(), Role::Initiator).unwrap();
        assert_eq!(init.sending().key(), &k1);
        assert_eq!(init.receiving().key(), &k2);

        let resp = engine.split_for(ss, Role::Responder).unwrap();
        assert_eq!(resp.sending().key(), &k2);
        assert_eq!(resp.receiving().key(), &k1);
    }

    #[test]
    fn test_mix_key_does_not_log_chaining_key() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(logs.clone())
            .finish();

        let engine = HandshakeEngine::new();
        let mut ss = engine.initialize_symmetric(XX);
        tracing::subscriber::with_default(subscriber, || {
            engine.mix_key(&mut ss, &[7u8; 32]).unwrap();
            let (cs1, cs2) = engine.split(ss.clone()).unwrap();
            assert!(cs1.has_key() && cs2.has_key());
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("mix_key"));
        assert!(output.contains(&format!("{:02x?}", &ss.h[..8])));
        assert!(!output.contains(&format!("{:02x?}", &ss.ck[..8])));
        assert!(!output.contains(&format!("{:02x?}", &ss.cs.key()[..8])));
    }

    #[test]
    fn test_split_independence() {
        let engine = HandshakeEngine::new();
        let mut ss = engine.initialize_symmetric(XX);
        engine.mix_key(&mut ss, &[7u8; 32]).unwrap();

        let (mut cs1, mut cs2) = engine.split(ss).unwrap();
        assert_ne!(cs1.key(), cs2.key());
        assert_eq!(cs1.nonce().value(), 0);
        assert_eq!(cs2.nonce().value(), 0);

        let msg = engine.write_message_regular(&mut cs1, b"data").unwrap();
        let out = engine.read_message_regular(&mut cs2, &msg).unwrap();
        assert!(!out.valid);
        assert_eq!(cs2.nonce().value(), 0);
    }

    #[test]
    fn test_regular_messages() {
        let engine = HandshakeEngine::new();
        let mut send = engine.initialize_key([8u8; 32]);
        let mut recv = engine.initialize_key([8u8; 32]);

        let msg = engine.write_message_regular(&mut send, b"payload").unwrap();
        assert_eq!(msg.ne, engine.create_empty_key());
        assert!(msg.ns.is_empty());

        let out = engine.read_message_regular(&mut recv, &msg).unwrap();
        assert!(out.valid);
        assert_eq!(out.plaintext, b"payload");

        // Replaying the same message fails: the receiver nonce moved on
        let out = engine.read_message_regular(&mut recv, &msg).unwrap();
        assert!(!out.valid);
        assert_eq!(recv.nonce().value(), 1);
    }

    #[test]
    fn test_xx_end_to_end() {
        let engine = HandshakeEngine::new();
        let (init, resp) = run_xx(&engine);

        assert_eq!(init.h, resp.h);
        assert_eq!(init.ck, resp.ck);

        let (mut i_cs1, mut i_cs2) = engine.split(init).unwrap();
        let (mut r_cs1, mut r_cs2) = engine.split(resp).unwrap();

        for i in 0..3u8 {
            let msg = engine.write_message_regular(&mut i_cs1, &[i; 10]).unwrap();
            let out = engine.read_message_regular(&mut r_cs1, &msg).unwrap();
            assert!(out.valid);
            assert_eq!(out.plaintext, vec![i; 10]);
        }

        let msg = engine.write_message_regular(&mut r_cs2, b"pong").unwrap();
        let out = engine.read_message_regular(&mut i_cs2, &msg).unwrap();
        assert!(out.valid);
        assert_eq!(out.plaintext, b"pong");

        // Cross-wired directions never authenticate
        let msg = engine.write_message_regular(&mut i_cs1, b"wrong way").unwrap();
        assert!(!engine.read_message_regular(&mut r_cs2, &msg).unwrap().valid);
    }

    #[test]
    fn test_split_for_roles() {
        let engine = HandshakeEngine::new();
        let (init, resp) = run_xx(&engine);

        let mut init = engine.split_for(init, Role::Initiator).unwrap();
        let mut resp = engine.split_for(resp, Role::Responder).unwrap();

        let msg = init.write_message(b"ping").unwrap();
        assert_eq!(resp.read_message(&msg).unwrap(), b"ping");

        let msg = resp.write_message(b"pong").unwrap();
        assert_eq!(init.read_message(&msg).unwrap(), b"pong");
    }

    #[test]
    fn test_initialize_with_config_mixes_prologue() {
        let engine = HandshakeEngine::new();
        let config = HandshakeConfig {
            prologue: b"/noise".to_vec(),
            ..HandshakeConfig::default()
        };

        let ss = engine.initialize_with_config(&config);
        let mut expected = engine.initialize_symmetric(XX);
        engine.mix_hash(&mut expected, b"/noise");
        assert_eq!(ss, expected);
    }
}
