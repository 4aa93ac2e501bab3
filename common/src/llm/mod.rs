pub mod client;

pub use client::{ClientConfig, CompletionClient, Message, MessageRole, OpenAiClient};
