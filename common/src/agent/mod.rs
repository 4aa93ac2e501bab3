pub mod prompt;
pub mod converter;

pub use converter::regulation_text_to_schema;
pub use prompt::build_regulation_prompt;
