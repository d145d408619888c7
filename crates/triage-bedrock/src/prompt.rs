//! Prompt construction for the classifier and report models.

use triage_core::models::payload::Narrative;
use triage_core::models::prediction::PredictionResult;

use crate::error::BedrockError;

const CLASSIFIER_INSTRUCTIONS: &str = "\
You triage clinical assessment requests before they are routed to predictive risk models. \
Decide whether the request carries enough structured data to run the models. \
Where the narrative states a value for one of the known parameters, extract it using the \
parameter's exact name and a plain JSON number, boolean or string. Never invent values.

Respond with a single JSON object and nothing else:
{\"decision\": \"route_to_models\" | \"need_more_data\" | \"complete\", \
\"extracted_fields\": {<parameter>: <value>}, \"reasoning\": \"<one or two sentences>\"}";

/// System prompt for report generation.
pub const REPORT_SYSTEM_PROMPT: &str = "\
You write concise clinical risk summaries for clinicians from model predictions. \
Use only the predictions and narrative provided. For models marked unavailable, say the \
result is missing and do not guess it. Do not give a diagnosis.

Respond with a single JSON object and nothing else:
{\"report\": \"<summary text>\", \"follow_up_questions\": [\"<question>\", ...]}";

/// System prompt for the intent classifier, listing the parameter names
/// it may extract.
pub fn classifier_system_prompt(vocabulary: &[String]) -> String {
    let mut prompt = String::from(CLASSIFIER_INSTRUCTIONS);
    prompt.push_str("\n\n<known_parameters>\n");
    for name in vocabulary {
        prompt.push_str(name);
        prompt.push('\n');
    }
    prompt.push_str("</known_parameters>");
    prompt
}

/// User message for the classifier: the narrative fields plus a summary
/// of what is already structured.
pub fn classifier_message(narrative: &Narrative, summary: &str) -> String {
    let mut message = String::new();

    if narrative.is_empty() {
        message.push_str("<narrative/>\n");
    } else {
        message.push_str("<narrative>\n");
        for (field, text) in narrative.iter() {
            message.push_str(&format!("<field name=\"{field}\">\n{}\n</field>\n", text.trim_end()));
        }
        message.push_str("</narrative>\n");
    }

    message.push_str(&format!("<structured_summary>\n{summary}\n</structured_summary>"));
    message
}

/// User message for the report model: the assembled context followed by
/// the raw predictions as JSON.
pub fn report_message(
    context: &str,
    predictions: &[PredictionResult],
) -> Result<String, BedrockError> {
    let json = serde_json::to_string_pretty(predictions)?;
    Ok(format!("{context}\n<predictions_json>\n{json}\n</predictions_json>"))
}
