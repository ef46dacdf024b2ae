//! pixsig - sign and verify image pixel content with embedded RSA signatures.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod exit_codes;

const AFTER_HELP: &str = "\
Exit codes:
  0   success
  65  signature check failed (tampered or invalid)
  66  cannot open an input file
  67  image is not signed
  68  malformed signature metadata
  69  metadata tool unavailable
  70  image could not be decoded
  74  metadata write failed
  76  embedded public key unusable
  78  private key unusable

To generate an RSA key:
  openssl genrsa -out key.pem";

#[derive(Parser)]
#[command(name = "pixsig")]
#[command(author, version, about = "Sign and verify image pixel content", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Metadata tag that carries the signature envelope
    #[arg(long, global = true, default_value = pixsig_core::DEFAULT_TAG)]
    tag: String,

    /// Suppress decorative output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign an image with an RSA private key
    Sign {
        /// Path to a PEM-encoded PKCS#1 RSA private key
        #[arg(long, value_name = "KEY")]
        rsa_key: PathBuf,

        /// Path to the image to sign
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// Verify an image's embedded signature
    Verify {
        /// Path to the image to verify
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sign { rsa_key, image } => {
            commands::sign::execute(&image, &rsa_key, &cli.tag, cli.quiet)
        }
        Commands::Verify { image } => commands::verify::execute(&image, &cli.tag, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_codes::classify(&err) as u8)
        }
    }
}
