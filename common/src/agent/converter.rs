use crate::agent::prompt::build_regulation_prompt;
use crate::error::{IngestError, Result};
use crate::llm::{CompletionClient, Message};
use crate::schema::{normalize_schema, RegulationSchema};

/// Convert one natural-language regulation rule into a normalized schema.
///
/// Single round trip: prompt, one completion request, parse, normalize. A
/// response that does not parse as JSON is terminal; the raw text is logged
/// and carried in the error for diagnosis. No retry, no fallback.
#[tracing::instrument(skip(client, natural_text), fields(text_len = natural_text.len()))]
pub async fn regulation_text_to_schema(
    client: &dyn CompletionClient,
    natural_text: &str,
) -> Result<RegulationSchema> {
    let prompt = build_regulation_prompt(natural_text);
    let messages = vec![Message::user(prompt)];

    let raw_text = client.complete(messages).await?;
    let raw_text = raw_text.trim();

    let schema: RegulationSchema = match serde_json::from_str(raw_text) {
        Ok(schema) => schema,
        Err(err) => {
            tracing::error!(raw = %raw_text, "failed to parse model response as JSON");
            return Err(IngestError::SchemaParse {
                reason: err.to_string(),
                raw: raw_text.to_string(),
            });
        }
    };

    let normalized = normalize_schema(schema);

    tracing::info!(
        element_type = %normalized.element_type,
        condition_count = normalized.conditions.len(),
        "regulation converted to schema"
    );

    Ok(normalized)
}
