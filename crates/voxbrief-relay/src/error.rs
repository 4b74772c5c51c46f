use voxbrief_core::VoxbriefError;

/// Every way a media relay can fail. Each variant maps to one fixed reply.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("inference endpoint not configured")]
    NotConfigured,

    #[error("unsupported content kind: {0}")]
    UnsupportedKind(String),

    #[error("inference endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("inference request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("inference endpoint returned {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl RelayError {
    /// Short tag used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::NotConfigured => "not_configured",
            RelayError::UnsupportedKind(_) => "unsupported_kind",
            RelayError::Unreachable(_) => "unreachable",
            RelayError::Timeout { .. } => "timeout",
            RelayError::ServerError { .. } => "server_error",
            RelayError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<VoxbriefError> for RelayError {
    fn from(e: VoxbriefError) -> Self {
        match e {
            VoxbriefError::UnsupportedKind { kind } => RelayError::UnsupportedKind(kind),
            other => RelayError::Unexpected(other.to_string()),
        }
    }
}

impl From<std::io::Error> for RelayError {
    fn from(e: std::io::Error) -> Self {
        RelayError::Unexpected(format!("I/O error: {e}"))
    }
}
