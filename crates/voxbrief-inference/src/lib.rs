pub mod app;
pub mod backend;
pub mod context;
pub mod http;
pub mod openai;
pub mod pipeline;

pub use app::build_router;
pub use backend::{BackendError, Summarizer, Transcriber};
pub use context::ServiceContext;
