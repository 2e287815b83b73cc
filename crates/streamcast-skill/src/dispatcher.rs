//! First-match request routing.

use streamcast_core::ResponseEnvelope;
use tracing::debug;

use crate::error::SkillError;
use crate::handler::{default_handlers, RequestHandler};
use crate::input::HandlerInput;

/// Ordered list of request handlers.
///
/// Exactly one handler runs per request: the first one, in registration
/// order, whose `can_handle` returns true.
pub struct Dispatcher {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Dispatcher with every built-in handler registered.
    pub fn with_defaults() -> Self {
        Self {
            handlers: default_handlers(),
        }
    }

    pub fn register(&mut self, handler: Box<dyn RequestHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn dispatch(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.can_handle(input))
            .ok_or_else(|| SkillError::Unroutable {
                request_type: input.envelope.request.kind.type_name().to_string(),
                intent: input.envelope.intent_name().map(|n| n.to_string()),
            })?;

        debug!(
            handler = handler.name(),
            request_type = input.envelope.request.kind.type_name(),
            "Dispatching request"
        );
        handler.handle(input)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
