//! Decode command: resolve one parameter value the way a request handler would.

use addrdec_core::{AddrdecConfig, AddressParameter, DecodeOutcome, DecodeStage, Syntax};
use anyhow::{anyhow, Result};
use serde::Serialize;

/// Command-line overrides on top of the selected call site.
#[derive(Debug, Clone, Default)]
pub struct DecodeArgs {
    pub site: Option<String>,
    pub syntax: Option<Syntax>,
    pub stages: Option<Vec<DecodeStage>>,
    pub encoding: Option<String>,
    pub optional: bool,
    pub plus_as_space: bool,
    pub json: bool,
}

/// JSON view of a successful outcome.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DecodeReport {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Call site from config with command-line overrides applied.
/// An explicit `--site` must name a `[sites.*]` table.
pub fn build_parameter(cfg: &AddrdecConfig, args: &DecodeArgs) -> Result<AddressParameter> {
    let site = match args.site.as_deref() {
        Some(name) => cfg.sites.get(name).ok_or_else(|| {
            let known: Vec<&str> = cfg.sites.keys().map(String::as_str).collect();
            anyhow!("unknown call site {:?} (configured: {:?})", name, known)
        })?,
        None => &cfg.defaults,
    };
    let mut param = site.parameter(args.site.as_deref().unwrap_or("value"));
    if let Some(syntax) = args.syntax {
        param.syntax = syntax;
    }
    if let Some(stages) = &args.stages {
        param.config.stages = stages.clone();
    }
    if let Some(encoding) = &args.encoding {
        param.config.encoding = encoding.clone();
    }
    if args.optional {
        param.required = false;
    }
    if args.plus_as_space {
        param.config.plus_as_space = true;
    }
    Ok(param)
}

/// Resolve `value` and print the address. Failures become errors (exit 1).
pub fn run_decode(cfg: &AddrdecConfig, value: Option<&str>, args: &DecodeArgs) -> Result<()> {
    let param = build_parameter(cfg, args)?;
    tracing::info!(
        "decode syntax={} stages={:?} encoding={} required={}",
        param.syntax,
        param.config.stages,
        param.config.encoding,
        param.required
    );

    let report = match param.resolve(value) {
        DecodeOutcome::Present(addr) => DecodeReport {
            outcome: "present",
            syntax: Some(addr.syntax().name()),
            address: Some(addr.into_string()),
        },
        DecodeOutcome::Absent => DecodeReport {
            outcome: "absent",
            syntax: None,
            address: None,
        },
        DecodeOutcome::Failed(failure) => {
            tracing::info!("decode failed: {}", failure.kind());
            anyhow::bail!("{}: {}", failure.kind(), failure);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else if let Some(address) = &report.address {
        println!("{}", address);
    }
    Ok(())
}
