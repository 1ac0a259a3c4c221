/// Error taxonomy for the pipeline. Every stage surfaces its failure
/// immediately; there is no retry or partial-result salvage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("format error: {0}")]
    Format(String),

    #[error("tool invocation error: {0}")]
    ToolInvocation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Service(err.to_string())
    }
}
