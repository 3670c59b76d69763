//! Layered decode resolution.
//!
//! [`resolve`] runs the configured stages in order against a raw parameter and
//! returns the first address that parses against the requested syntax. Stage
//! failures are logged at debug level and otherwise discarded; callers only see
//! the aggregate [`DecodeOutcome`].
//!
//! The call is pure and synchronous, so it can be shared freely across request
//! threads without coordination.

mod error;

pub use error::{DecodeFailure, ParameterError};

use crate::address::{Address, Syntax};
use crate::config::DecodeConfig;
use crate::stage::StageContext;

/// Result of resolving one parameter. Exactly one variant holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Present(Address),
    /// Only produced for optional parameters.
    Absent,
    Failed(DecodeFailure),
}

impl DecodeOutcome {
    pub fn is_present(&self) -> bool {
        matches!(self, DecodeOutcome::Present(_))
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            DecodeOutcome::Present(addr) => Some(addr),
            _ => None,
        }
    }

    /// `Present` → `Ok(Some)`, `Absent` → `Ok(None)`, `Failed` → `Err`.
    pub fn into_result(self) -> Result<Option<Address>, DecodeFailure> {
        match self {
            DecodeOutcome::Present(addr) => Ok(Some(addr)),
            DecodeOutcome::Absent => Ok(None),
            DecodeOutcome::Failed(failure) => Err(failure),
        }
    }
}

/// Resolves a possibly encoded address parameter.
///
/// - `raw == None`: `Failed(MissingParameter)` if `required`, else `Absent`.
/// - otherwise each stage of `config.stages` is tried in order and the first
///   address that parses as `syntax` is returned; later stages never run.
pub fn resolve(
    raw: Option<&str>,
    required: bool,
    config: &DecodeConfig,
    syntax: Syntax,
) -> DecodeOutcome {
    let Some(raw) = raw else {
        if required {
            tracing::debug!("required address parameter missing");
            return DecodeOutcome::Failed(DecodeFailure::MissingParameter);
        }
        return DecodeOutcome::Absent;
    };

    tracing::debug!(payload = raw, %syntax, "decoding possibly encoded address");
    let ctx = StageContext {
        encoding: &config.encoding,
        plus_as_space: config.plus_as_space,
        syntax,
    };

    for stage in &config.stages {
        match stage.attempt(raw, &ctx) {
            Ok(addr) => {
                tracing::debug!(%stage, "decoded address parameter");
                return DecodeOutcome::Present(addr);
            }
            Err(e) => tracing::debug!(%stage, "stage failed: {}", e),
        }
    }

    tracing::debug!("failed to decode address parameter");
    DecodeOutcome::Failed(DecodeFailure::DecodeError {
        syntax,
        attempted: config.stages.clone(),
    })
}

/// A named address parameter as declared by one call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressParameter {
    pub name: String,
    pub required: bool,
    pub syntax: Syntax,
    pub config: DecodeConfig,
}

impl AddressParameter {
    pub fn new(name: impl Into<String>, syntax: Syntax) -> Self {
        Self {
            name: name.into(),
            required: true,
            syntax,
            config: DecodeConfig::default(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolve(&self, raw: Option<&str>) -> DecodeOutcome {
        let _span = tracing::debug_span!("address_parameter", name = %self.name).entered();
        resolve(raw, self.required, &self.config, self.syntax)
    }

    /// Like [`resolve`](Self::resolve), as a `Result` naming the parameter on failure.
    pub fn bind(&self, raw: Option<&str>) -> Result<Option<Address>, ParameterError> {
        self.resolve(raw)
            .into_result()
            .map_err(|failure| ParameterError {
                name: self.name.clone(),
                failure,
            })
    }
}
