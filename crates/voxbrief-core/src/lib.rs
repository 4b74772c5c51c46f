pub mod config;
pub mod error;
pub mod templates;
pub mod types;

pub use config::VoxbriefConfig;
pub use error::{Result, VoxbriefError};
pub use templates::Templates;
pub use types::{ContentKind, InboundMessage, MediaKind, RelaySummary};
