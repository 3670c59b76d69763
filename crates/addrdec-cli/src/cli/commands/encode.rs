//! Encode command: produce a parameter value the decoder accepts.

use crate::cli::EncodeAs;
use addrdec_core::encode::{base64_encode, percent_encode};
use anyhow::{Context, Result};

pub fn encode_value(address: &str, encode_as: EncodeAs, encoding: &str) -> Result<String> {
    let encoded = match encode_as {
        EncodeAs::Percent => percent_encode(address, encoding),
        EncodeAs::Base64 => base64_encode(address, encoding),
    };
    encoded.with_context(|| format!("encode {:?} as {:?}", address, encode_as))
}

/// Encode and print the parameter value.
pub fn run_encode(address: &str, encode_as: EncodeAs, encoding: &str) -> Result<()> {
    println!("{}", encode_value(address, encode_as, encoding)?);
    Ok(())
}
