/// Failures surfaced by the report pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The inbound request is outside the closed enumerations or malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A station timestamp did not match the fixed upstream format.
    #[error("Station '{station}' has malformed lastUpdated '{value}': {source}")]
    StationTimestamp {
        station: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Content error: {0}")]
    Content(String),
}

impl ReportError {
    /// Wraps an infrastructure error, keeping its context chain in the message.
    pub fn upstream(err: anyhow::Error) -> Self {
        ReportError::Upstream(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
