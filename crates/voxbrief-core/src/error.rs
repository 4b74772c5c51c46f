use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoxbriefError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required setting: {name}")]
    MissingSetting { name: &'static str },

    #[error("Unsupported content kind: {kind}")]
    UnsupportedKind { kind: String },
}

impl VoxbriefError {
    /// Short error code string used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            VoxbriefError::Config(_) => "CONFIG_ERROR",
            VoxbriefError::MissingSetting { .. } => "MISSING_SETTING",
            VoxbriefError::UnsupportedKind { .. } => "UNSUPPORTED_KIND",
        }
    }
}

pub type Result<T> = std::result::Result<T, VoxbriefError>;
