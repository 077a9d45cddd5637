//! devault-subver
//!
//! Command-line front end for the BIP-14 subversion helpers: builds the
//! subversion string a node advertises and decodes the ones peers send.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::setup_logging;
use config::CliConfig;
use protocol::{
    CLIENT_NAME, CLIENT_VERSION, ParseMode, SubVersion, format_full_version, format_version,
    user_agent,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "devault-subver")]
#[command(author, version, about = "Format and parse BIP-14 subversion strings")]
#[command(long_about = "
Formats the subversion string a node reports in its version handshake and
decodes subversion strings received from peers.

EXAMPLES:
    # Print this client's subversion string using configured comments
    devault-subver

    # Format a subversion string
    devault-subver format --name \"DeVault Core\" --version 1000100 --comment EB32.0

    # Render a packed version number
    devault-subver version 1020304

    # Decode a peer's subversion string
    devault-subver parse \"/DeVault Core:1.0.1(EB32.0)/\"

    # Reject malformed input instead of decoding it as 0
    devault-subver parse --strict \"/DeVault Core:1.0.1/\"

CONFIGURATION:
    The configuration file is looked up in the following order:
    1. Path specified with --config
    2. ~/.config/devault-subver/config.toml
    3. /etc/devault-subver/config.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<std::path::PathBuf>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a subversion string
    #[command(disable_version_flag = true)]
    Format {
        /// Client name (defaults to the configured name)
        #[arg(short, long)]
        name: Option<String>,

        /// Packed client version
        #[arg(long = "version", value_name = "N", conflicts_with = "client_version")]
        encoded: Option<u32>,

        /// Use this build's client version (the default)
        #[arg(long)]
        client_version: bool,

        /// Comment to include; repeat for several (defaults to the configured comments)
        #[arg(long = "comment", value_name = "TEXT")]
        comments: Vec<String>,
    },

    /// Render a packed version number as a dotted string
    Version {
        #[arg(value_name = "N")]
        version: u32,
    },

    /// Decode the version number from a subversion string
    Parse {
        #[arg(value_name = "SUBVERSION")]
        input: String,

        /// Fail on malformed input instead of reporting version 0
        #[arg(long)]
        strict: bool,
    },

    /// Print the full build description of this client
    FullVersion,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.save_config {
        let config = CliConfig::default();
        let path = CliConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let config = if let Some(ref path) = args.config {
        CliConfig::load(Some(config::expand_path(path)))
    } else {
        CliConfig::load_or_default()
    }
    .context("Failed to load configuration")?;

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.general.log_level);

    setup_logging(log_level).context("Failed to setup logging")?;

    info!("devault-subver v{}", env!("CARGO_PKG_VERSION"));
    debug!("Parser mode: {}", config.parser.mode);

    let output = run(args.command, &config)?;
    println!("{}", output);

    Ok(())
}

/// Execute a command against the loaded configuration, returning what to print
fn run(command: Option<Command>, config: &CliConfig) -> Result<String> {
    let output = match command {
        None => {
            if config.client.name == CLIENT_NAME {
                user_agent(&config.client.comments).to_string()
            } else {
                SubVersion {
                    name: config.client.name.clone(),
                    version: CLIENT_VERSION.encoded(),
                    comments: config.client.comments.clone(),
                }
                .to_string()
            }
        }
        Some(Command::Format {
            name,
            encoded,
            client_version: _,
            comments,
        }) => {
            let comments = if comments.is_empty() {
                config.client.comments.clone()
            } else {
                comments
            };
            SubVersion {
                name: name.unwrap_or_else(|| config.client.name.clone()),
                version: encoded.unwrap_or_else(|| CLIENT_VERSION.encoded()),
                comments,
            }
            .to_string()
        }
        Some(Command::Version { version }) => format_version(version),
        Some(Command::Parse { input, strict }) => {
            let mode = if strict {
                ParseMode::Strict
            } else {
                config.parser.mode
            };
            let version = mode
                .unformat(&input)
                .with_context(|| format!("Failed to parse subversion {:?}", input))?;
            format!("{} ({})", version, format_version(version))
        }
        Some(Command::FullVersion) => format_full_version(),
    };
    Ok(output)
}
