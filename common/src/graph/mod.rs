pub mod cypher;
pub mod executor;

pub use cypher::transform_to_cypher;
pub use executor::{ingest_statements, GraphConfig, GraphDriver, GraphSession, HttpGraphDriver};
