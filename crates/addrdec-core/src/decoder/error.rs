//! Aggregate failures of a decode call.

use crate::address::Syntax;
use crate::stage::DecodeStage;

/// Terminal, non-retryable failure of [`resolve`](super::resolve).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailure {
    /// A required parameter was not supplied.
    #[error("missing required parameter")]
    MissingParameter,
    /// The parameter was present but no configured stage produced a valid address.
    #[error("could not decode parameter as {syntax} (tried {})", stage_list(.attempted))]
    DecodeError {
        syntax: Syntax,
        attempted: Vec<DecodeStage>,
    },
}

impl DecodeFailure {
    /// Stable kebab-case tag for reports (`missing-parameter` / `decode-error`).
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeFailure::MissingParameter => "missing-parameter",
            DecodeFailure::DecodeError { .. } => "decode-error",
        }
    }
}

fn stage_list(stages: &[DecodeStage]) -> String {
    if stages.is_empty() {
        return "no stages".to_string();
    }
    stages
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// [`DecodeFailure`] bound to the name of the parameter it concerns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parameter {name:?}: {failure}")]
pub struct ParameterError {
    pub name: String,
    #[source]
    pub failure: DecodeFailure,
}
