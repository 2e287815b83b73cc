//! Session and host notifications that need no reply beyond an ack.

use streamcast_core::{RequestKind, ResponseEnvelope};

use crate::error::SkillError;
use crate::handler::{request_kind, RequestHandler};
use crate::input::HandlerInput;

pub struct SessionEndedHandler;

impl RequestHandler for SessionEndedHandler {
    fn name(&self) -> &'static str {
        "session_ended"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(request_kind(input), RequestKind::SessionEnded(_))
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        if let RequestKind::SessionEnded(ended) = request_kind(input) {
            let reason = ended.reason.as_deref().unwrap_or("UNKNOWN");
            match &ended.error {
                Some(error) => tracing::info!(reason, error = %error, "Session ended"),
                None => tracing::info!(reason, "Session ended"),
            }
        }
        Ok(ResponseEnvelope::empty())
    }
}

/// The host rejected one of our earlier responses.
pub struct ExceptionEncounteredHandler;

impl RequestHandler for ExceptionEncounteredHandler {
    fn name(&self) -> &'static str {
        "exception_encountered"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(request_kind(input), RequestKind::ExceptionEncountered(_))
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        if let RequestKind::ExceptionEncountered(exception) = request_kind(input) {
            tracing::info!(
                error = %exception.error.clone().unwrap_or_default(),
                cause_request_id = exception
                    .cause
                    .as_ref()
                    .and_then(|c| c.request_id.as_deref())
                    .unwrap_or(""),
                "Host reported an exception"
            );
        }
        Ok(ResponseEnvelope::empty())
    }
}
