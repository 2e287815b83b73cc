//! Per-request context handed to interceptors and handlers.

use rand::RngCore;
use streamcast_core::{RequestEnvelope, StreamDescriptor};

use crate::error::SkillError;
use crate::prompts::PromptTable;

/// Attributes that live for exactly one request.
#[derive(Debug, Default)]
pub struct RequestAttributes {
    /// Set by the locale resolver before any handler runs.
    pub prompts: Option<PromptTable>,
}

pub struct HandlerInput<'a> {
    pub envelope: &'a RequestEnvelope,
    pub stream: &'a StreamDescriptor,
    pub attributes: RequestAttributes,
    rng: &'a mut dyn RngCore,
}

impl<'a> HandlerInput<'a> {
    pub fn new(
        envelope: &'a RequestEnvelope,
        stream: &'a StreamDescriptor,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            envelope,
            stream,
            attributes: RequestAttributes::default(),
            rng,
        }
    }

    pub fn prompts(&self) -> Result<&PromptTable, SkillError> {
        self.attributes
            .prompts
            .as_ref()
            .ok_or(SkillError::PromptsUnavailable)
    }

    /// Random candidate for `key` from this request's prompt table.
    pub fn pick_prompt(&mut self, key: &str) -> Result<String, SkillError> {
        let prompts = self
            .attributes
            .prompts
            .as_ref()
            .ok_or(SkillError::PromptsUnavailable)?;
        prompts.pick(key, &mut *self.rng)
    }
}
