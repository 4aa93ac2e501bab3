pub mod error;
pub mod schema;
pub mod llm;
pub mod agent;
pub mod graph;
pub mod store;
pub mod tracing;

pub use error::{IngestError, Result};
