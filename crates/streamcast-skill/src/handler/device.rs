//! Device capability check.

use streamcast_core::{ResponseBuilder, ResponseEnvelope};

use crate::error::SkillError;
use crate::handler::RequestHandler;
use crate::input::HandlerInput;
use crate::prompts::DEVICE_NOT_SUPPORTED;

/// Turns away devices that cannot play audio, whatever they asked for.
///
/// Requests without any device (some host-internal events) pass through.
pub struct CheckAudioInterfaceHandler;

impl RequestHandler for CheckAudioInterfaceHandler {
    fn name(&self) -> &'static str {
        "check_audio_interface"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        input.envelope.supports_audio_player() == Some(false)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        let speech = input.pick_prompt(DEVICE_NOT_SUPPORTED)?;
        Ok(ResponseBuilder::new()
            .speak(&speech)
            .set_should_end_session(true)
            .build())
    }
}
