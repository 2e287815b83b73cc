//! Localized prompt tables.
//!
//! A prompt file is a flat JSON object mapping symbolic keys to either a
//! single string or a list of interchangeable candidates.

use std::collections::HashMap;
use std::path::Path;

use rand::{Rng, RngCore};
use serde::Deserialize;
use streamcast_core::error::Result;

use crate::error::SkillError;

pub const DEVICE_NOT_SUPPORTED: &str = "DEVICE_NOT_SUPPORTED";
pub const UNHANDLED: &str = "UNHANDLED";
pub const ABOUT: &str = "ABOUT";
pub const ABOUT_REPROMPT: &str = "ABOUT_REPROMPT";
pub const HELP: &str = "HELP";
pub const HELP_REPROMPT: &str = "HELP_REPROMPT";
pub const FALLBACK: &str = "FALLBACK";
pub const FALLBACK_REPROMPT: &str = "FALLBACK_REPROMPT";
pub const ERROR: &str = "ERROR";
pub const ERROR_REPROMPT: &str = "ERROR_REPROMPT";

/// Keys every shipped prompt file must define.
pub const REQUIRED_KEYS: [&str; 10] = [
    DEVICE_NOT_SUPPORTED,
    UNHANDLED,
    ABOUT,
    ABOUT_REPROMPT,
    HELP,
    HELP_REPROMPT,
    FALLBACK,
    FALLBACK_REPROMPT,
    ERROR,
    ERROR_REPROMPT,
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PromptValue {
    One(String),
    Many(Vec<String>),
}

impl PromptValue {
    pub fn candidates(&self) -> &[String] {
        match self {
            PromptValue::One(text) => std::slice::from_ref(text),
            PromptValue::Many(list) => list,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PromptTable {
    entries: HashMap<String, PromptValue>,
}

impl PromptTable {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn get(&self, key: &str) -> std::result::Result<&PromptValue, SkillError> {
        self.entries
            .get(key)
            .ok_or_else(|| SkillError::MissingPrompt(key.to_string()))
    }

    /// Pick one candidate for `key` uniformly at random.
    pub fn pick(
        &self,
        key: &str,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<String, SkillError> {
        let candidates = self.get(key)?.candidates();
        choose(candidates, rng)
            .cloned()
            .ok_or_else(|| SkillError::EmptyPrompt(key.to_string()))
    }

    /// Required keys this table does not define.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.entries.contains_key(*key))
            .collect()
    }
}

/// Uniform choice over `candidates`; `None` when the slice is empty.
pub fn choose<'a, T>(candidates: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.random_range(0..candidates.len()))
}
