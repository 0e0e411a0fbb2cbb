//! kmsign command-line tool

mod commands;
mod error;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use error::CliResult;
use settings::Settings;

#[derive(Parser)]
#[command(name = "kmsign")]
#[command(about = "Sign with local or cloud KMS keys, and wrap private keys for KMS import")]
#[command(version)]
struct Cli {
    /// TOML settings file
    #[arg(short, long, global = true, env = "KMSIGN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a file with a local key or a KMS key
    Sign(commands::sign::SignArgs),

    /// Wrap a private key for import into a KMS
    Wrap {
        /// PKCS#8 private key to import, PEM or DER
        #[arg(short, long)]
        key: PathBuf,

        /// RSA wrapping public key from the KMS, SPKI PEM or DER
        #[arg(short, long)]
        wrapping_key: PathBuf,

        /// Output file (defaults to `<key>.wrapped.bin`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the package base64 encoded
        #[arg(long)]
        base64: bool,
    },

    /// Show private key information
    Info {
        /// Key file path
        #[arg(short, long)]
        key: PathBuf,
    },
}

fn run(cli: Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Sign(args) => {
            commands::sign::handle(args, &settings)?;
        }
        Commands::Wrap {
            key,
            wrapping_key,
            output,
            base64,
        } => {
            commands::wrap::handle(key, wrapping_key, output, base64)?;
        }
        Commands::Info { key } => {
            commands::info::handle(&key)?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{} {}", "✗".red(), e);
        std::process::exit(1);
    }
}
