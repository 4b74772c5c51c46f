pub mod client;
pub mod dispatch;
pub mod error;
pub mod relay;
pub mod scratch;
pub mod transport;

pub use client::InferenceClient;
pub use dispatch::respond;
pub use error::RelayError;
pub use relay::MediaRelay;
pub use transport::{MediaTransport, WorkingIndicator};
