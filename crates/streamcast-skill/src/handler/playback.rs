//! Playback handlers.
//!
//! The host owns the player state machine. These handlers only answer its
//! requests and notifications with Play, Stop and ClearQueue directives for
//! the configured stream.

use streamcast_core::response::ClearBehavior;
use streamcast_core::{Directive, IntentName, RequestKind, ResponseBuilder, ResponseEnvelope};

use crate::error::SkillError;
use crate::handler::{is_intent, request_kind, RequestHandler};
use crate::input::HandlerInput;

fn clear_and_stop() -> ResponseEnvelope {
    ResponseBuilder::new()
        .add_directive(Directive::ClearQueue {
            clear_behavior: ClearBehavior::ClearAll,
        })
        .add_directive(Directive::Stop)
        .set_should_end_session(true)
        .build()
}

fn play(input: &HandlerInput<'_>) -> ResponseBuilder {
    ResponseBuilder::new()
        .add_directive(Directive::play_stream(input.stream))
        .set_should_end_session(true)
}

/// Starts the stream as soon as the skill is opened.
pub struct LaunchRequestHandler;

impl RequestHandler for LaunchRequestHandler {
    fn name(&self) -> &'static str {
        "launch"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(request_kind(input), RequestKind::Launch)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        let speech = format!("Starting {}", input.stream.title);
        Ok(play(input).speak(&speech).build())
    }
}

pub struct ResumeStreamHandler;

impl RequestHandler for ResumeStreamHandler {
    fn name(&self) -> &'static str {
        "resume_stream"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(request_kind(input), RequestKind::PlayCommandIssued)
            || is_intent(input, &[IntentName::Resume])
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        Ok(play(input).build())
    }
}

pub struct CancelOrStopHandler;

impl RequestHandler for CancelOrStopHandler {
    fn name(&self) -> &'static str {
        "cancel_or_stop"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        is_intent(
            input,
            &[IntentName::Cancel, IntentName::Stop, IntentName::Pause],
        )
    }

    fn handle(&self, _input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        Ok(clear_and_stop())
    }
}

/// Drops anything the host queued behind the live stream.
pub struct PlaybackStartedHandler;

impl RequestHandler for PlaybackStartedHandler {
    fn name(&self) -> &'static str {
        "playback_started"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(request_kind(input), RequestKind::PlaybackStarted(_))
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        if let RequestKind::PlaybackStarted(event) = request_kind(input) {
            tracing::debug!(
                token = event.token.as_deref().unwrap_or(""),
                offset_ms = event.offset_in_milliseconds.unwrap_or(0),
                "Playback started"
            );
        }
        Ok(ResponseBuilder::new()
            .add_directive(Directive::ClearQueue {
                clear_behavior: ClearBehavior::ClearEnqueued,
            })
            .build())
    }
}

pub struct PlaybackStoppedHandler;

impl RequestHandler for PlaybackStoppedHandler {
    fn name(&self) -> &'static str {
        "playback_stopped"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(
            request_kind(input),
            RequestKind::PauseCommandIssued | RequestKind::PlaybackStopped(_)
        )
    }

    fn handle(&self, _input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        Ok(clear_and_stop())
    }
}

/// Restarts the stream from scratch after the host reports a failure.
pub struct PlaybackFailedHandler;

impl RequestHandler for PlaybackFailedHandler {
    fn name(&self) -> &'static str {
        "playback_failed"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        matches!(request_kind(input), RequestKind::PlaybackFailed(_))
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        if let RequestKind::PlaybackFailed(event) = request_kind(input) {
            tracing::warn!(
                token = event.token.as_deref().unwrap_or(""),
                error = %event.error.clone().unwrap_or_default(),
                "Playback failed, restarting stream"
            );
        }
        Ok(play(input).build())
    }
}
