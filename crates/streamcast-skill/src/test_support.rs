//! Shared fixtures for unit tests.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use streamcast_core::stream::default_streams;
use streamcast_core::{RequestEnvelope, ResponseEnvelope};

use crate::error::SkillError;
use crate::handler::RequestHandler;
use crate::input::HandlerInput;

/// Wrap a `request` object in an envelope from an audio-capable device.
pub fn envelope(request: Value) -> RequestEnvelope {
    serde_json::from_value(json!({
        "version": "1.0",
        "context": {
            "System": {
                "application": { "applicationId": "amzn1.ask.skill.test" },
                "device": {
                    "deviceId": "device-1",
                    "supportedInterfaces": { "AudioPlayer": {} }
                }
            }
        },
        "request": request
    }))
    .unwrap()
}

/// Same as [`envelope`] but from a device without the AudioPlayer interface.
pub fn screenless_envelope(request: Value) -> RequestEnvelope {
    serde_json::from_value(json!({
        "version": "1.0",
        "context": {
            "System": {
                "device": { "deviceId": "device-2", "supportedInterfaces": {} }
            }
        },
        "request": request
    }))
    .unwrap()
}

pub fn launch_request(locale: &str) -> Value {
    json!({ "type": "LaunchRequest", "requestId": "req-launch", "locale": locale })
}

pub fn intent_request(name: &str, locale: &str) -> Value {
    json!({
        "type": "IntentRequest",
        "requestId": "req-intent",
        "locale": locale,
        "intent": { "name": name, "confirmationStatus": "NONE" }
    })
}

pub fn typed_request(request_type: &str, locale: &str) -> Value {
    json!({ "type": request_type, "requestId": "req-typed", "locale": locale, "token": "1" })
}

pub fn english_prompts() -> Value {
    json!({
        "DEVICE_NOT_SUPPORTED": "Sorry, this device can't play audio.",
        "UNHANDLED": ["That isn't supported.", "I can't do that with a live stream."],
        "ABOUT": ["This is a radio skill."],
        "ABOUT_REPROMPT": ["Want to listen?"],
        "HELP": ["Say play to start.", "Ask me to play the radio.", "Say stop to end."],
        "HELP_REPROMPT": ["What would you like?"],
        "FALLBACK": ["I didn't get that."],
        "FALLBACK_REPROMPT": ["Try again?"],
        "ERROR": "Something went wrong.",
        "ERROR_REPROMPT": "Please try again."
    })
}

/// Write `<locale>.json` files into `dir`.
pub fn write_prompts(dir: &Path, locales: &[&str], prompts: &Value) {
    for locale in locales {
        std::fs::write(
            dir.join(format!("{}.json", locale)),
            serde_json::to_string(prompts).unwrap(),
        )
        .unwrap();
    }
}

/// Check the predicate, then run the handler with the English prompts attached.
pub fn run_handler(
    handler: &dyn RequestHandler,
    env: &RequestEnvelope,
) -> Result<ResponseEnvelope, SkillError> {
    let streams = default_streams();
    let mut rng = StdRng::seed_from_u64(7);
    let mut input = HandlerInput::new(env, &streams[0], &mut rng);
    input.attributes.prompts = Some(serde_json::from_value(english_prompts()).unwrap());
    assert!(handler.can_handle(&input), "{} rejected the request", handler.name());
    handler.handle(&mut input)
}

pub fn accepts(handler: &dyn RequestHandler, env: &RequestEnvelope) -> bool {
    let streams = default_streams();
    let mut rng = StdRng::seed_from_u64(7);
    let input = HandlerInput::new(env, &streams[0], &mut rng);
    handler.can_handle(&input)
}
