use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion error: {0}")]
    Completion(String),

    #[error("model response was not valid JSON: {reason}")]
    SchemaParse { reason: String, raw: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("graph error: {0}")]
    Graph(String),

    #[error("tracing initialization failed: {0}")]
    Tracing(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
