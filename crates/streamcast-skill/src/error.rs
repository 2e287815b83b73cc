//! Error types for the dispatch cycle.

/// Errors raised while resolving prompts or handling a request.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("No handler accepts request {}{}", .request_type, intent_suffix(.intent))]
    Unroutable {
        request_type: String,
        intent: Option<String>,
    },
    #[error("No prompt table found for locale {}", .locale.as_deref().unwrap_or("<none>"))]
    PromptResolution { locale: Option<String> },
    #[error("Prompt table has no entry for {0}")]
    MissingPrompt(String),
    #[error("Prompt {0} has no candidates")]
    EmptyPrompt(String),
    #[error("Prompt table was not resolved for this request")]
    PromptsUnavailable,
    #[error("No stream configured")]
    NoStreamConfigured,
    #[error("Skill id mismatch: expected {}, got {}", .expected, .actual.as_deref().unwrap_or("<none>"))]
    SkillIdMismatch {
        expected: String,
        actual: Option<String>,
    },
}

fn intent_suffix(intent: &Option<String>) -> String {
    match intent {
        Some(name) => format!(" ({})", name),
        None => String::new(),
    }
}
