//! # Estampa CLI
//!
//! Command-line interface for encoding print nodes to ESC/POS.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a JSON node list and send it to the printer
//! estampa render receipt.json --device /dev/usb/lp0 --init
//!
//! # Inspect the bytes instead
//! estampa render receipt.json --hex
//!
//! # Read nodes from stdin, write bytes to a file
//! cat receipt.json | estampa render - --output receipt.bin
//!
//! # Show only the text that would be printed
//! estampa text receipt.json
//!
//! # Open the cash drawer
//! estampa pulse --device /dev/usb/lp0
//! ```
//!
//! The input is a JSON array of nodes:
//!
//! ```json
//! [
//!   { "name": "text", "params": { "align": "center", "em": "true" }, "data": "RECEIPT" },
//!   { "name": "feed", "params": { "line": "2" } },
//!   { "name": "cut", "params": { "type": "feed" } }
//! ]
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use estampa::{Encoder, EstampaError, Node, transport::DeviceTransport};

/// Estampa - ESC/POS receipt encoder
#[derive(Parser, Debug)]
#[command(name = "estampa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress (info level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log every dispatched node (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON node list to ESC/POS bytes
    Render {
        /// JSON file with an array of nodes, or `-` for stdin
        input: PathBuf,

        /// Write bytes to this file
        #[arg(long, short, value_name = "FILE", conflicts_with = "device")]
        output: Option<PathBuf>,

        /// Send bytes to this printer device
        #[arg(long, value_name = "PATH")]
        device: Option<PathBuf>,

        /// Print a hex dump instead of raw bytes (stdout only)
        #[arg(long, conflicts_with_all = ["output", "device"])]
        hex: bool,

        /// Initialize the printer before the first node
        #[arg(long)]
        init: bool,

        /// Append the end-of-job marker after the last node
        #[arg(long)]
        end: bool,
    },

    /// Print only the literal text of a JSON node list
    Text {
        /// JSON file with an array of nodes, or `-` for stdin
        input: PathBuf,
    },

    /// Send a drawer pulse
    Pulse {
        /// Printer device path
        #[arg(long, default_value = estampa::transport::device::DEFAULT_DEVICE)]
        device: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn run(command: Commands) -> Result<(), EstampaError> {
    match command {
        Commands::Render {
            input,
            output,
            device,
            hex,
            init,
            end,
        } => {
            let nodes = read_nodes(&input)?;

            let mut enc = Encoder::new();
            if init {
                enc.init();
            }
            encode(&mut enc, &nodes)?;
            if end {
                enc.end();
            }
            tracing::info!(nodes = nodes.len(), bytes = enc.len(), "encoded");

            if let Some(path) = device {
                let mut transport = DeviceTransport::open(&path)?;
                enc.send_to(&mut transport)?;
                tracing::info!(device = %path.display(), "sent");
            } else if let Some(path) = output {
                fs::write(&path, enc.as_bytes())?;
                tracing::info!(file = %path.display(), "written");
            } else if hex {
                println!("{}", hex_dump(enc.as_bytes()));
            } else {
                enc.send_to(&mut io::stdout().lock())?;
            }
        }

        Commands::Text { input } => {
            let nodes = read_nodes(&input)?;
            let mut enc = Encoder::new();
            encode(&mut enc, &nodes)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(enc.read_text().as_bytes())?;
            stdout.flush()?;
        }

        Commands::Pulse { device } => {
            let mut enc = Encoder::new();
            enc.pulse();
            let mut transport = DeviceTransport::open(&device)?;
            enc.send_to(&mut transport)?;
        }
    }

    Ok(())
}

/// Dispatch every node, reporting which one failed.
fn encode(enc: &mut Encoder, nodes: &[Node]) -> Result<(), EstampaError> {
    for (i, node) in nodes.iter().enumerate() {
        enc.dispatch(node).map_err(|e| match e {
            EstampaError::InvalidParameter(msg) => {
                EstampaError::InvalidParameter(format!("node {} ({}): {}", i, node.name, msg))
            }
            EstampaError::MalformedPayload(msg) => {
                EstampaError::MalformedPayload(format!("node {} ({}): {}", i, node.name, msg))
            }
            other => other,
        })?;
    }
    Ok(())
}

fn read_nodes(input: &Path) -> Result<Vec<Node>, EstampaError> {
    let json = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&json)?)
}

/// 16 bytes per line: offset, hex, printable ASCII.
fn hex_dump(data: &[u8]) -> String {
    data.chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            format!("{:08x}  {:<47}  {}", i * 16, hex.join(" "), ascii)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rejects_output() {
        let res = Cli::try_parse_from(["estampa", "render", "in.json", "--hex", "--output", "x.bin"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_hex_rejects_device() {
        let res =
            Cli::try_parse_from(["estampa", "render", "in.json", "--hex", "--device", "/dev/usb/lp0"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_hex_alone_parses() {
        let cli = Cli::try_parse_from(["estampa", "render", "in.json", "--hex"]).unwrap();
        assert!(matches!(cli.command, Commands::Render { hex: true, .. }));
    }
}
