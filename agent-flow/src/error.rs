use thiserror::Error;

/// Errors that abort an agent run.
///
/// Lookups that find nothing are not errors: tools report them in-band so the
/// model can reason about them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Unknown tool requested: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidToolArguments { tool: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;
