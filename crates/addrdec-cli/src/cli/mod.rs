//! CLI for the addrdec address parameter decoder.

mod commands;

use addrdec_core::config;
use addrdec_core::{DecodeStage, Syntax};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use commands::{run_config, run_decode, run_encode, DecodeArgs};

/// Top-level CLI for addrdec.
#[derive(Debug, Parser)]
#[command(name = "addrdec")]
#[command(about = "addrdec: decode raw, percent-encoded or Base64-encoded URL parameters", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/addrdec/config.toml, created if missing).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Encoding produced by `encode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodeAs {
    Percent,
    Base64,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Decode a parameter value into a URL/URI.
    Decode {
        /// Raw parameter value. Omit to resolve an absent parameter.
        value: Option<String>,

        /// Named call site from the config file.
        #[arg(long)]
        site: Option<String>,

        /// Target syntax (url or uri); overrides the call site.
        #[arg(long)]
        syntax: Option<Syntax>,

        /// Comma-separated stage order, e.g. direct-parse,base64-decode.
        #[arg(long, value_delimiter = ',')]
        stages: Option<Vec<DecodeStage>>,

        /// Character encoding label, e.g. ISO-8859-1 or UTF-8.
        #[arg(long)]
        encoding: Option<String>,

        /// Treat the parameter as optional (absent is not an error).
        #[arg(long)]
        optional: bool,

        /// Decode `+` as a space during percent-decoding.
        #[arg(long)]
        plus_as_space: bool,

        /// Print a JSON report instead of the bare address.
        #[arg(long)]
        json: bool,
    },

    /// Encode an address as a parameter value.
    Encode {
        /// Address text to encode.
        address: String,

        /// Output encoding.
        #[arg(long = "as", value_enum, default_value = "base64")]
        encode_as: EncodeAs,

        /// Character encoding label (default: the configured one).
        #[arg(long)]
        encoding: Option<String>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Decode {
                value,
                site,
                syntax,
                stages,
                encoding,
                optional,
                plus_as_space,
                json,
            } => {
                let args = DecodeArgs {
                    site,
                    syntax,
                    stages,
                    encoding,
                    optional,
                    plus_as_space,
                    json,
                };
                run_decode(&cfg, value.as_deref(), &args)?;
            }
            CliCommand::Encode {
                address,
                encode_as,
                encoding,
            } => {
                let encoding = encoding.unwrap_or_else(|| cfg.defaults.decode.encoding.clone());
                run_encode(&address, encode_as, &encoding)?;
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
