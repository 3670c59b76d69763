//! Config command: print the effective configuration.

use addrdec_core::AddrdecConfig;
use anyhow::Result;

pub fn run_config(cfg: &AddrdecConfig) -> Result<()> {
    print!("{}", cfg.to_toml()?);
    Ok(())
}
