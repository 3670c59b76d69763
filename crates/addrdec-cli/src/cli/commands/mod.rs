//! CLI command handlers. Each command is in its own file.

mod config;
pub mod decode;
pub mod encode;

pub use config::run_config;
pub use decode::{run_decode, DecodeArgs};
pub use encode::run_encode;
