//! Decoding of address (URL/URI) request parameters that may arrive raw,
//! percent-encoded or Base64-encoded.
//!
//! ```
//! use addrdec_core::{resolve, DecodeConfig, Syntax};
//!
//! let cfg = DecodeConfig::default();
//! let outcome = resolve(Some("aHR0cDovL2V4YW1wbGUuY29tLw=="), true, &cfg, Syntax::Url);
//! assert_eq!(outcome.address().unwrap().as_str(), "http://example.com/");
//! ```

pub mod address;
pub mod charset;
pub mod config;
pub mod decoder;
pub mod encode;
pub mod logging;
pub mod stage;

pub use address::{Address, Syntax, UriRef};
pub use config::{AddrdecConfig, CallSiteConfig, DecodeConfig};
pub use decoder::{resolve, AddressParameter, DecodeFailure, DecodeOutcome, ParameterError};
pub use stage::DecodeStage;
