use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::{self, Read};
use tracing::info;

use se05x::{
    api::{self, OverwritePolicy, RawPublicKey, RawSignature, EC_KEY_DER_LENGTH},
    config::DEFAULT_SCRATCH_OBJECT_ID,
    ecdsa_verify, ec_sign, ElementConfig, Se05x, SimulatedConnector, SimulatorConfig,
    SHA256_LENGTH,
};

#[derive(Parser, Debug)]
#[command(name = "se05x")]
#[command(about = "Secure element control over a simulated SE05X", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub element: ElementArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct ElementArgs {
    /// Storage available on the simulated element, in bytes
    #[arg(long, global = true, default_value_t = 50 * 1024)]
    capacity: usize,

    /// What creating an object at an occupied id does (replace, reject)
    #[arg(long, global = true, default_value = "replace")]
    overwrite: OverwriteArg,

    /// Object id used to hold the public key during `verify`
    #[arg(long, global = true, default_value_t = DEFAULT_SCRATCH_OBJECT_ID)]
    scratch_id: u32,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the element serial number
    Info,

    /// Draw from the element random number generator
    Random {
        /// Number of random bytes to print as hex
        #[arg(long, conflicts_with_all = ["below", "min", "max"])]
        bytes: Option<usize>,

        /// Print an integer in [0, BELOW)
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["min", "max"])]
        below: Option<i64>,

        /// Lower bound (inclusive) of an integer range
        #[arg(long, allow_negative_numbers = true, requires = "max")]
        min: Option<i64>,

        /// Upper bound (exclusive) of an integer range
        #[arg(long, allow_negative_numbers = true, requires = "min")]
        max: Option<i64>,
    },

    /// SHA-256 of data provided via stdin, computed on the element
    Sha256 {
        /// Feed stdin to the element in chunks of this many bytes
        #[arg(long)]
        chunk: Option<usize>,
    },

    /// Generate a P-256 key pair and print the public key as hex
    Generate {
        /// Object id to store the key pair at
        #[arg(long, default_value_t = 0x100)]
        id: u32,

        /// Print the DER SubjectPublicKeyInfo instead of raw X || Y
        #[arg(long)]
        der: bool,
    },

    /// Generate a key pair and sign data provided via stdin
    ///
    /// Prints the raw public key and the raw r || s signature as hex, one per
    /// line.
    Sign {
        /// Object id to store the key pair at
        #[arg(long, default_value_t = 0x100)]
        id: u32,
    },

    /// Verify a raw signature over data provided via stdin
    Verify {
        /// Raw X || Y public key in hex (128 hex chars = 64 bytes)
        #[arg(long)]
        public_key: String,

        /// Raw r || s signature in hex (128 hex chars = 64 bytes)
        #[arg(long)]
        signature: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OverwriteArg {
    Replace,
    Reject,
}

impl From<OverwriteArg> for OverwritePolicy {
    fn from(arg: OverwriteArg) -> Self {
        match arg {
            OverwriteArg::Replace => OverwritePolicy::Replace,
            OverwriteArg::Reject => OverwritePolicy::Reject,
        }
    }
}

fn connect(args: &ElementArgs) -> anyhow::Result<Se05x<SimulatedConnector>> {
    let config = ElementConfig {
        overwrite: args.overwrite.into(),
        scratch_object_id: args.scratch_id,
        ..ElementConfig::default()
    };
    let simulator = SimulatorConfig {
        storage_capacity: args.capacity,
        ..SimulatorConfig::default()
    };
    api::connect_simulated_with(config, simulator).context("failed to open element session")
}

fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::new();
    io::stdin()
        .read_to_end(&mut data)
        .context("failed to read stdin")?;
    Ok(data)
}

fn decode_hex<const N: usize>(name: &str, value: &str) -> anyhow::Result<[u8; N]> {
    let bytes = hex::decode(value).map_err(|e| anyhow::anyhow!("Invalid {} hex: {}", name, e))?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow::anyhow!("{} must be {} bytes, got {}", name, N, bytes.len()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(io::stderr)
        .init();

    let mut element = connect(&cli.element)?;

    match cli.command {
        Commands::Info => {
            let serial = element
                .serial_number()
                .context("failed to read serial number")?;
            println!("{}", serial);
        }

        Commands::Random {
            bytes,
            below,
            min,
            max,
        } => match (bytes, below, min.zip(max)) {
            (_, Some(below), _) => println!("{}", element.random_below(below)?),
            (_, _, Some((min, max))) => println!("{}", element.random_range(min, max)?),
            (bytes, _, _) => {
                let mut out = vec![0u8; bytes.unwrap_or(32)];
                element.random_bytes(&mut out)?;
                println!("{}", hex::encode(out));
            }
        },

        Commands::Sha256 { chunk } => {
            let data = read_stdin()?;
            let mut digest = [0u8; SHA256_LENGTH];
            match chunk {
                Some(size) if size > 0 => {
                    element.begin_sha256()?;
                    for part in data.chunks(size) {
                        element.update_sha256(part)?;
                    }
                    element.end_sha256(&mut digest)?;
                }
                _ => {
                    element.sha256(&data, &mut digest)?;
                }
            }
            println!("{}", hex::encode(digest));
        }

        Commands::Generate { id, der } => {
            if der {
                let mut out = [0u8; EC_KEY_DER_LENGTH];
                let len = element
                    .generate_private_key(id, &mut out)
                    .context("failed to generate key")?;
                println!("{}", hex::encode(&out[..len]));
            } else {
                let public_key = element
                    .generate_private_key_raw(id)
                    .context("failed to generate key")?;
                println!("{}", hex::encode(public_key.as_bytes()));
            }
        }

        Commands::Sign { id } => {
            let data = read_stdin()?;
            let public_key = element
                .generate_private_key_raw(id)
                .context("failed to generate key")?;
            let signature = ec_sign(&mut element, id, &data).context("failed to sign data")?;
            println!("{}", hex::encode(public_key.as_bytes()));
            println!("{}", hex::encode(signature.as_bytes()));
        }

        Commands::Verify {
            public_key,
            signature,
        } => {
            let public_key = RawPublicKey::new(decode_hex("public key", &public_key)?);
            let signature = RawSignature::new(decode_hex("signature", &signature)?);
            let data = read_stdin()?;

            let verification = ecdsa_verify(&mut element, &data, &signature, &public_key)
                .context("failed to verify signature")?;
            info!("Verification result: {:?}", verification);
            if !verification.is_valid() {
                println!("invalid");
                std::process::exit(1);
            }
            println!("valid");
        }
    }

    element.end();
    Ok(())
}
