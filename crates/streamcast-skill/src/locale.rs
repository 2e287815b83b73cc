//! Locale resolution.
//!
//! Looks for `<locale>.json` first and then `<language>.json` (the first
//! two characters of the tag). There is no further fallback: a request in
//! a language without a prompt file cannot be answered.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::SkillError;
use crate::input::HandlerInput;
use crate::interceptor::RequestInterceptor;
use crate::prompts::PromptTable;

#[derive(Debug, Clone)]
pub struct LocaleResolver {
    prompts_dir: PathBuf,
}

impl LocaleResolver {
    pub fn new(prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
        }
    }

    /// Load the prompt table for `locale`, falling back to its language.
    pub fn resolve(&self, locale: Option<&str>) -> Result<PromptTable, SkillError> {
        let not_found = || SkillError::PromptResolution {
            locale: locale.map(str::to_string),
        };
        let locale = locale.ok_or_else(not_found)?;

        for tag in candidate_tags(locale) {
            let path = self.prompts_dir.join(format!("{}.json", tag));
            match PromptTable::from_file(&path) {
                Ok(table) => {
                    debug!(locale, file = %path.display(), "Prompt table loaded");
                    return Ok(table);
                }
                Err(e) => {
                    debug!(locale, file = %path.display(), error = %e, "Prompt file unusable")
                }
            }
        }
        Err(not_found())
    }
}

/// File stems to try for `locale`, most specific first.
fn candidate_tags(locale: &str) -> Vec<&str> {
    if !is_safe_tag(locale) {
        return Vec::new();
    }
    let mut tags = vec![locale];
    if let Some(language) = locale.get(..2) {
        if language != locale {
            tags.push(language);
        }
    }
    tags
}

/// Only tags made of ASCII letters, digits, `-` and `_` may name a file.
fn is_safe_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl RequestInterceptor for LocaleResolver {
    fn process(&self, input: &mut HandlerInput<'_>) -> Result<(), SkillError> {
        let locale = input.envelope.locale();
        info!("Locale is {}", locale.unwrap_or("<none>"));
        let table = self.resolve(locale)?;
        input.attributes.prompts = Some(table);
        Ok(())
    }
}
