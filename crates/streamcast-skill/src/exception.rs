//! Error handlers that turn a failed dispatch cycle into a response.

use streamcast_core::{ResponseBuilder, ResponseEnvelope};
use tracing::error;

use crate::error::SkillError;
use crate::input::HandlerInput;
use crate::prompts::{ERROR, ERROR_REPROMPT};

pub trait ExceptionHandler: Send + Sync {
    fn can_handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> bool;

    fn handle(
        &self,
        input: &mut HandlerInput<'_>,
        error: &SkillError,
    ) -> Result<ResponseEnvelope, SkillError>;
}

/// Handles every error by apologising in the request's language and
/// keeping the session open.
pub struct CatchAllExceptionHandler;

impl ExceptionHandler for CatchAllExceptionHandler {
    fn can_handle(&self, _input: &HandlerInput<'_>, _error: &SkillError) -> bool {
        true
    }

    fn handle(
        &self,
        input: &mut HandlerInput<'_>,
        err: &SkillError,
    ) -> Result<ResponseEnvelope, SkillError> {
        error!(
            request_id = %input.envelope.request.request_id,
            error = %err,
            "Error handled"
        );
        let speech = input.pick_prompt(ERROR)?;
        let reprompt = input.pick_prompt(ERROR_REPROMPT)?;
        Ok(ResponseBuilder::new().speak(&speech).ask(&reprompt).build())
    }
}
