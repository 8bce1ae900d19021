use clap::Parser;
use radius_codec::{Packet, PacketError, RadiusDictionary};
use radius_codec::{DictionaryError, UserLocationInfo};
use std::fs;
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Error, Debug)]
enum InspectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Provide a hex datagram or --file")]
    NoInput,
}

/// Decode a captured RADIUS datagram and print it as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "radius-inspect")]
struct Cli {
    /// Datagram as a hex string (whitespace and ':' separators allowed)
    #[arg(value_name = "HEX", conflicts_with = "file")]
    hex: Option<String>,

    /// Read the raw datagram from a file instead
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Shared secret used for User-Password
    #[arg(short, long, default_value = "testing123")]
    secret: String,

    /// JSON dictionary (defaults to the built-in RFC + 3GPP table)
    #[arg(short, long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), InspectError> {
    let data = read_input(cli)?;

    let dictionary = match &cli.dictionary {
        Some(path) => RadiusDictionary::from_file(path)?,
        None => RadiusDictionary::standard(),
    };
    debug!(entries = dictionary.len(), "Dictionary ready");

    let decoded = Packet::decode(&data, &dictionary, cli.secret.as_bytes())?;
    let location = match UserLocationInfo::from_packet(&decoded.packet) {
        Ok(location) => location,
        Err(e) => {
            debug!(error = %e, "No usable location info");
            None
        }
    };

    let output = report::render(&decoded, location.as_ref());
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_input(cli: &Cli) -> Result<Vec<u8>, InspectError> {
    match (&cli.hex, &cli.file) {
        (Some(text), _) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !c.is_whitespace() && *c != ':')
                .collect();
            Ok(hex::decode(cleaned)?)
        }
        (None, Some(path)) => Ok(fs::read(path)?),
        (None, None) => Err(InspectError::NoInput),
    }
}
