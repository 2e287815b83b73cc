//! Spoken-only handlers: help, about, fallback and unsupported player
//! commands. All text comes from the request's prompt table.

use streamcast_core::{IntentName, ResponseBuilder, ResponseEnvelope};

use crate::error::SkillError;
use crate::handler::{is_intent, RequestHandler};
use crate::input::HandlerInput;
use crate::prompts::{
    ABOUT, ABOUT_REPROMPT, FALLBACK, FALLBACK_REPROMPT, HELP, HELP_REPROMPT, UNHANDLED,
};

/// Speak a random `speech_key` prompt and keep the session open with a
/// random `reprompt_key` prompt.
fn speak_and_ask(
    input: &mut HandlerInput<'_>,
    speech_key: &str,
    reprompt_key: &str,
) -> Result<ResponseEnvelope, SkillError> {
    let speech = input.pick_prompt(speech_key)?;
    let reprompt = input.pick_prompt(reprompt_key)?;
    Ok(ResponseBuilder::new().speak(&speech).ask(&reprompt).build())
}

/// Player features a single live stream cannot offer.
pub struct UnhandledFeaturesHandler;

const UNSUPPORTED_PLAYER_INTENTS: [IntentName; 8] = [
    IntentName::LoopOn,
    IntentName::Next,
    IntentName::Previous,
    IntentName::Repeat,
    IntentName::ShuffleOn,
    IntentName::StartOver,
    IntentName::ShuffleOff,
    IntentName::LoopOff,
];

impl RequestHandler for UnhandledFeaturesHandler {
    fn name(&self) -> &'static str {
        "unhandled_features"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        is_intent(input, &UNSUPPORTED_PLAYER_INTENTS)
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        let speech = input.pick_prompt(UNHANDLED)?;
        Ok(ResponseBuilder::new()
            .speak(&speech)
            .set_should_end_session(true)
            .build())
    }
}

pub struct HelpHandler;

impl RequestHandler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        is_intent(input, &[IntentName::Help])
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        speak_and_ask(input, HELP, HELP_REPROMPT)
    }
}

/// Only reachable as a one-shot utterance; during playback the host keeps
/// the microphone for player commands.
pub struct AboutHandler;

impl RequestHandler for AboutHandler {
    fn name(&self) -> &'static str {
        "about"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        is_intent(input, &[IntentName::About])
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        speak_and_ask(input, ABOUT, ABOUT_REPROMPT)
    }
}

pub struct FallbackHandler;

impl RequestHandler for FallbackHandler {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        is_intent(input, &[IntentName::Fallback])
    }

    fn handle(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        speak_and_ask(input, FALLBACK, FALLBACK_REPROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{accepts, english_prompts, envelope, intent_request, run_handler};

    fn candidates(key: &str) -> Vec<String> {
        serde_json::from_value(english_prompts()[key].clone()).unwrap()
    }

    #[test]
    fn test_unhandled_player_intents() {
        let unhandled = candidates("UNHANDLED");
        for name in [
            "AMAZON.LoopOnIntent",
            "AMAZON.NextIntent",
            "AMAZON.PreviousIntent",
            "AMAZON.RepeatIntent",
            "AMAZON.ShuffleOnIntent",
            "AMAZON.StartOverIntent",
            "AMAZON.ShuffleOffIntent",
            "AMAZON.LoopOffIntent",
        ] {
            let env = envelope(intent_request(name, "en-US"));
            let response = run_handler(&UnhandledFeaturesHandler, &env).unwrap().response;
            let speech = response.speech_text().unwrap().to_string();
            assert!(unhandled.contains(&speech), "{} spoke {:?}", name, speech);
            assert_eq!(response.should_end_session, Some(true));
            assert!(response.directives.is_empty());
            assert!(response.reprompt.is_none());
        }
    }

    #[test]
    fn test_help_keeps_session_open() {
        let env = envelope(intent_request("AMAZON.HelpIntent", "en-US"));
        let response = run_handler(&HelpHandler, &env).unwrap().response;
        assert!(candidates("HELP").contains(&response.speech_text().unwrap().to_string()));
        assert!(candidates("HELP_REPROMPT")
            .contains(&response.reprompt_text().unwrap().to_string()));
        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_about() {
        let env = envelope(intent_request("AboutIntent", "en-US"));
        let response = run_handler(&AboutHandler, &env).unwrap().response;
        assert_eq!(response.speech_text(), Some("This is a radio skill."));
        assert_eq!(response.reprompt_text(), Some("Want to listen?"));
        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_fallback() {
        let env = envelope(intent_request("AMAZON.FallbackIntent", "en-US"));
        let response = run_handler(&FallbackHandler, &env).unwrap().response;
        assert_eq!(response.speech_text(), Some("I didn't get that."));
        assert_eq!(response.reprompt_text(), Some("Try again?"));
        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_predicates_are_specific() {
        let help = envelope(intent_request("AMAZON.HelpIntent", "en-US"));
        assert!(!accepts(&AboutHandler, &help));
        assert!(!accepts(&FallbackHandler, &help));
        assert!(!accepts(&UnhandledFeaturesHandler, &help));

        let custom = envelope(intent_request("PlayJazzIntent", "en-US"));
        assert!(!accepts(&HelpHandler, &custom));
    }
}
