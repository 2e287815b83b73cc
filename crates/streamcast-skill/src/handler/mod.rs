//! Request handlers and their registration order.
//!
//! Each handler pairs a predicate (`can_handle`) with the response it
//! builds. The dispatcher runs the first handler whose predicate accepts
//! the request, so the order returned by [`default_handlers`] is part of
//! the skill's behaviour.

pub mod conversation;
pub mod device;
pub mod lifecycle;
pub mod playback;

use streamcast_core::{IntentName, RequestKind, ResponseEnvelope};

use crate::error::SkillError;
use crate::input::HandlerInput;

pub trait RequestHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError>;
}

/// All handlers in the order they must be tried.
pub fn default_handlers() -> Vec<Box<dyn RequestHandler>> {
    vec![
        Box::new(device::CheckAudioInterfaceHandler),
        Box::new(playback::LaunchRequestHandler),
        Box::new(playback::ResumeStreamHandler),
        Box::new(conversation::UnhandledFeaturesHandler),
        Box::new(playback::CancelOrStopHandler),
        Box::new(conversation::HelpHandler),
        Box::new(conversation::AboutHandler),
        Box::new(conversation::FallbackHandler),
        Box::new(playback::PlaybackStartedHandler),
        Box::new(playback::PlaybackStoppedHandler),
        Box::new(playback::PlaybackFailedHandler),
        Box::new(lifecycle::SessionEndedHandler),
        Box::new(lifecycle::ExceptionEncounteredHandler),
    ]
}

/// True when the request is an intent request for any of `names`.
pub(crate) fn is_intent(input: &HandlerInput<'_>, names: &[IntentName]) -> bool {
    input
        .envelope
        .intent_name()
        .is_some_and(|name| names.contains(name))
}

pub(crate) fn request_kind<'i>(input: &'i HandlerInput<'_>) -> &'i RequestKind {
    &input.envelope.request.kind
}
