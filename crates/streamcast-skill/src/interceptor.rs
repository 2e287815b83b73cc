//! Hooks that run before and after dispatch.
//!
//! Request interceptors may enrich the per-request attributes; response
//! interceptors only observe. Both run inside the error boundary, so a
//! failure here reaches the exception handlers like any handler failure.

use streamcast_core::ResponseEnvelope;

use crate::error::SkillError;
use crate::input::HandlerInput;

pub trait RequestInterceptor: Send + Sync {
    fn process(&self, input: &mut HandlerInput<'_>) -> Result<(), SkillError>;
}

pub trait ResponseInterceptor: Send + Sync {
    fn process(
        &self,
        input: &HandlerInput<'_>,
        response: &ResponseEnvelope,
    ) -> Result<(), SkillError>;
}

/// Logs every inbound `request` object at DEBUG, as received.
pub struct RequestLogger;

impl RequestInterceptor for RequestLogger {
    fn process(&self, input: &mut HandlerInput<'_>) -> Result<(), SkillError> {
        tracing::debug!(
            request_id = %input.envelope.request.request_id,
            request = %input.envelope.request.raw,
            "Skill request"
        );
        Ok(())
    }
}

/// Logs every outbound response at DEBUG.
pub struct ResponseLogger;

impl ResponseInterceptor for ResponseLogger {
    fn process(
        &self,
        input: &HandlerInput<'_>,
        response: &ResponseEnvelope,
    ) -> Result<(), SkillError> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            let body = serde_json::to_string(response).unwrap_or_default();
            tracing::debug!(
                request_id = %input.envelope.request.request_id,
                response = %body,
                "Skill response"
            );
        }
        Ok(())
    }
}
