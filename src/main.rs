//! noisecore CLI - key generation and engine self-test

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use noisecore::crypto::x25519;
use noisecore::error::{CryptoError, ProtocolError};
use noisecore::{HandshakeConfig, HandshakeEngine, MessageBuffer, NoiseCoreError, Role};

/// noisecore - Noise handshake engine tools
#[derive(Parser, Debug)]
#[command(name = "noisecore")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a fresh X25519 keypair (base64)
    Keygen,

    /// Print the initial transcript hash for a protocol name (hex)
    HashName {
        /// Protocol name, e.g. Noise_XX_25519_ChaChaPoly_SHA256
        name: String,
    },

    /// Run an in-process initiator/responder exchange
    SelfTest {
        /// Handshake configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

/// Map an error to the process exit code
fn exit_code(e: &anyhow::Error) -> i32 {
    if let Some(e) = e.downcast_ref::<NoiseCoreError>() {
        return e.exit_code();
    }
    if let Some(e) = e.downcast_ref::<CryptoError>() {
        return NoiseCoreError::from(e.clone()).exit_code();
    }
    if let Some(e) = e.downcast_ref::<ProtocolError>() {
        return NoiseCoreError::from(e.clone()).exit_code();
    }
    1
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Keygen => {
            let (private, public) = x25519::generate_keypair();
            println!("PrivateKey = {}", BASE64.encode(private));
            println!("PublicKey = {}", BASE64.encode(public));
            Ok(())
        }
        Command::HashName { name } => {
            let engine = HandshakeEngine::new();
            println!("{}", hex::encode(engine.hash_protocol_name(name.as_bytes())));
            Ok(())
        }
        Command::SelfTest { config } => {
            let config = match config {
                Some(path) => {
                    tracing::info!("Loading configuration from: {}", path.display());
                    HandshakeConfig::from_file(&path)
                        .map_err(NoiseCoreError::from)
                        .with_context(|| format!("loading {}", path.display()))?
                }
                None => HandshakeConfig::default(),
            };
            self_test(&config)
        }
    }
}

/// Run the XX token sequence between two local parties, then exchange
/// transport messages in both directions
fn self_test(config: &HandshakeConfig) -> anyhow::Result<()> {
    if config.protocol.pattern() != "XX" {
        bail!("self-test drives the XX pattern, got {}", config.protocol.pattern());
    }
    tracing::info!("Self-test with {}", config.protocol);

    let engine = HandshakeEngine::new();
    let (init_s_priv, init_s_pub) = x25519::generate_keypair();
    let (init_e_priv, init_e_pub) = x25519::generate_keypair();
    let (resp_s_priv, resp_s_pub) = x25519::generate_keypair();
    let (resp_e_priv, resp_e_pub) = x25519::generate_keypair();

    let mut init = engine.initialize_with_config(config);
    let mut resp = engine.initialize_with_config(config);

    // -> e
    engine.mix_hash(&mut init, &init_e_pub);
    let payload = engine.encrypt_and_hash(&mut init, &[])?;
    let msg1 = MessageBuffer {
        ne: init_e_pub,
        ns: Vec::new(),
        ciphertext: payload,
    };

    engine.mix_hash(&mut resp, &msg1.ne);
    engine.decrypt_and_hash(&mut resp, &msg1.ciphertext)?.into_result()?;

    // <- e, ee, s, es
    engine.mix_hash(&mut resp, &resp_e_pub);
    engine.mix_key(&mut resp, &engine.dh(&resp_e_priv, &msg1.ne)?)?;
    let ns = engine.encrypt_and_hash(&mut resp, &resp_s_pub)?;
    engine.mix_key(&mut resp, &engine.dh(&resp_s_priv, &msg1.ne)?)?;
    let payload = engine.encrypt_and_hash(&mut resp, b"responder")?;
    let msg2 = MessageBuffer::from_bytes(
        &MessageBuffer {
            ne: resp_e_pub,
            ns,
            ciphertext: payload,
        }
        .to_bytes(),
        48,
    )?;

    engine.mix_hash(&mut init, &msg2.ne);
    engine.mix_key(&mut init, &engine.dh(&init_e_priv, &msg2.ne)?)?;
    let rs = engine.decrypt_and_hash(&mut init, &msg2.ns)?.into_result()?;
    let rs: [u8; 32] = rs
        .try_into()
        .map_err(|_| ProtocolError::AuthenticationFailed)?;
    engine.mix_key(&mut init, &engine.dh(&init_e_priv, &rs)?)?;
    engine.decrypt_and_hash(&mut init, &msg2.ciphertext)?.into_result()?;

    // -> s, se
    let ns = engine.encrypt_and_hash(&mut init, &init_s_pub)?;
    engine.mix_key(&mut init, &engine.dh(&init_s_priv, &resp_e_pub)?)?;
    let payload = engine.encrypt_and_hash(&mut init, b"initiator")?;

    let is = engine.decrypt_and_hash(&mut resp, &ns)?.into_result()?;
    let is: [u8; 32] = is
        .try_into()
        .map_err(|_| ProtocolError::AuthenticationFailed)?;
    engine.mix_key(&mut resp, &engine.dh(&resp_e_priv, &is)?)?;
    engine.decrypt_and_hash(&mut resp, &payload)?.into_result()?;

    if init.handshake_hash() != resp.handshake_hash() {
        bail!("transcript hashes diverged");
    }
    tracing::info!("Handshake hash: {}", hex::encode(init.handshake_hash()));

    let mut init = engine.split_for(init, Role::Initiator)?;
    let mut resp = engine.split_for(resp, Role::Responder)?;

    for (i, text) in ["ping", "pong"].iter().enumerate() {
        let msg = init.write_message(text.as_bytes())?;
        let got = resp.read_message(&msg)?;
        tracing::debug!("transport {} initiator -> responder ok", i);
        let msg = resp.write_message(&got)?;
        init.read_message(&msg)?;
    }

    // A message sent on one direction must not authenticate on the other
    let (mut init_send, _) = init.into_parts();
    let (mut resp_send, _) = resp.into_parts();
    let msg = engine.write_message_regular(&mut init_send, b"cross")?;
    if engine.read_message_regular(&mut resp_send, &msg)?.valid {
        bail!("cross-wired transport keys authenticated");
    }

    println!("self-test passed ({})", config.protocol);
    Ok(())
}
