//! The assembled skill: interceptors, dispatcher and error boundary.

use rand::RngCore;
use streamcast_core::{RequestEnvelope, ResponseEnvelope, StreamDescriptor, StreamcastConfig};
use tracing::{info, warn};

use crate::dispatcher::Dispatcher;
use crate::error::SkillError;
use crate::exception::{CatchAllExceptionHandler, ExceptionHandler};
use crate::handler::RequestHandler;
use crate::input::HandlerInput;
use crate::interceptor::{RequestInterceptor, RequestLogger, ResponseInterceptor, ResponseLogger};
use crate::locale::LocaleResolver;

/// Processes one request envelope at a time.
///
/// Each invocation runs the request interceptors in order, dispatches to
/// the first accepting handler, then runs the response interceptors. Any
/// error raised along the way goes to the first exception handler that
/// accepts it. The skill keeps no state between invocations, so a shared
/// reference can serve concurrent requests.
pub struct Skill {
    dispatcher: Dispatcher,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
    stream: StreamDescriptor,
    skill_id: Option<String>,
}

impl Skill {
    pub fn builder() -> SkillBuilder {
        SkillBuilder::new()
    }

    /// The standard skill for `config`.
    pub fn from_config(config: &StreamcastConfig) -> Result<Self, SkillError> {
        SkillBuilder::standard(config).build()
    }

    pub fn stream(&self) -> &StreamDescriptor {
        &self.stream
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.dispatcher.handler_names()
    }

    /// Handle one request using the thread-local random generator.
    pub fn invoke(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        let mut rng = rand::rng();
        self.invoke_with_rng(envelope, &mut rng)
    }

    /// Handle one request, drawing prompt variants from `rng`.
    ///
    /// Fails only when the skill id does not match, or when no exception
    /// handler could produce a response. In the latter case the original
    /// error is returned.
    pub fn invoke_with_rng(
        &self,
        envelope: &RequestEnvelope,
        rng: &mut dyn RngCore,
    ) -> Result<ResponseEnvelope, SkillError> {
        self.verify_skill_id(envelope)?;

        let mut input = HandlerInput::new(envelope, &self.stream, rng);
        match self.run(&mut input) {
            Ok(response) => Ok(response),
            Err(err) => self.recover(&mut input, err),
        }
    }

    fn run(&self, input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
        for interceptor in &self.request_interceptors {
            interceptor.process(input)?;
        }
        let response = self.dispatcher.dispatch(input)?;
        for interceptor in &self.response_interceptors {
            interceptor.process(input, &response)?;
        }
        Ok(response)
    }

    fn recover(
        &self,
        input: &mut HandlerInput<'_>,
        err: SkillError,
    ) -> Result<ResponseEnvelope, SkillError> {
        let Some(handler) = self
            .exception_handlers
            .iter()
            .find(|h| h.can_handle(input, &err))
        else {
            return Err(err);
        };
        match handler.handle(input, &err) {
            Ok(response) => Ok(response),
            Err(secondary) => {
                warn!(error = %err, secondary = %secondary, "Exception handler failed");
                Err(err)
            }
        }
    }

    fn verify_skill_id(&self, envelope: &RequestEnvelope) -> Result<(), SkillError> {
        let Some(expected) = &self.skill_id else {
            return Ok(());
        };
        let actual = envelope.application_id();
        if actual == Some(expected.as_str()) {
            Ok(())
        } else {
            Err(SkillError::SkillIdMismatch {
                expected: expected.clone(),
                actual: actual.map(str::to_string),
            })
        }
    }
}

/// Assembles a [`Skill`]. Registration order is preserved for every list.
pub struct SkillBuilder {
    dispatcher: Dispatcher,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    exception_handlers: Vec<Box<dyn ExceptionHandler>>,
    stream: Option<StreamDescriptor>,
    skill_id: Option<String>,
}

impl SkillBuilder {
    /// An empty builder: no handlers, interceptors or stream.
    pub fn new() -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            exception_handlers: Vec::new(),
            stream: None,
            skill_id: None,
        }
    }

    /// Every built-in handler, the locale resolver, both loggers and the
    /// catch-all exception handler, wired from `config`.
    pub fn standard(config: &StreamcastConfig) -> Self {
        info!(
            prompts_dir = %config.skill.prompts_dir,
            verify_skill_id = config.skill.skill_id.is_some(),
            "Building skill"
        );
        let mut builder = Self {
            dispatcher: Dispatcher::with_defaults(),
            ..Self::new()
        };
        builder = builder
            .add_request_interceptor(Box::new(LocaleResolver::new(&config.skill.prompts_dir)))
            .add_request_interceptor(Box::new(RequestLogger))
            .add_response_interceptor(Box::new(ResponseLogger))
            .add_exception_handler(Box::new(CatchAllExceptionHandler));
        if let Some(stream) = config.primary_stream() {
            builder = builder.with_stream(stream.clone());
        }
        if let Some(skill_id) = &config.skill.skill_id {
            builder = builder.with_skill_id(skill_id.clone());
        }
        builder
    }

    pub fn add_request_handler(mut self, handler: Box<dyn RequestHandler>) -> Self {
        self.dispatcher.register(handler);
        self
    }

    pub fn add_request_interceptor(mut self, interceptor: Box<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn add_response_interceptor(mut self, interceptor: Box<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn add_exception_handler(mut self, handler: Box<dyn ExceptionHandler>) -> Self {
        self.exception_handlers.push(handler);
        self
    }

    pub fn with_stream(mut self, stream: StreamDescriptor) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn with_skill_id(mut self, skill_id: impl Into<String>) -> Self {
        self.skill_id = Some(skill_id.into());
        self
    }

    pub fn build(self) -> Result<Skill, SkillError> {
        let stream = self.stream.ok_or(SkillError::NoStreamConfigured)?;
        Ok(Skill {
            dispatcher: self.dispatcher,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            exception_handlers: self.exception_handlers,
            stream,
            skill_id: self.skill_id,
        })
    }
}

impl Default for SkillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        english_prompts, envelope, intent_request, launch_request, screenless_envelope,
        write_prompts,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::collections::HashSet;
    use std::path::Path;
    use streamcast_core::{Directive, ResponseBuilder};

    fn skill_for(dir: &Path) -> Skill {
        let mut config = StreamcastConfig::default();
        config.skill.prompts_dir = dir.to_string_lossy().into_owned();
        Skill::from_config(&config).unwrap()
    }

    fn english_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_prompts(dir.path(), &["en"], &english_prompts());
        dir
    }

    fn invoke(skill: &Skill, request: serde_json::Value) -> ResponseEnvelope {
        let mut rng = StdRng::seed_from_u64(11);
        skill.invoke_with_rng(&envelope(request), &mut rng).unwrap()
    }

    struct Greeting;

    impl RequestHandler for Greeting {
        fn name(&self) -> &'static str {
            "greeting"
        }

        fn can_handle(&self, _input: &HandlerInput<'_>) -> bool {
            true
        }

        fn handle(&self, _input: &mut HandlerInput<'_>) -> Result<ResponseEnvelope, SkillError> {
            Ok(ResponseBuilder::new().speak("Hello.").build())
        }
    }

    struct FailingAudit;

    impl ResponseInterceptor for FailingAudit {
        fn process(
            &self,
            _input: &HandlerInput<'_>,
            _response: &ResponseEnvelope,
        ) -> Result<(), SkillError> {
            Err(SkillError::MissingPrompt("AUDIT".to_string()))
        }
    }

    #[test]
    fn test_response_interceptor_failure_reaches_catch_all() {
        let dir = english_dir();
        let skill = Skill::builder()
            .add_request_interceptor(Box::new(LocaleResolver::new(dir.path())))
            .add_request_handler(Box::new(Greeting))
            .add_response_interceptor(Box::new(FailingAudit))
            .add_exception_handler(Box::new(CatchAllExceptionHandler))
            .with_stream(StreamcastConfig::default().streams.remove(0))
            .build()
            .unwrap();
        assert_eq!(skill.handler_names(), vec!["greeting"]);

        let response = invoke(&skill, launch_request("en-US")).response;
        assert_eq!(response.speech_text(), Some("Something went wrong."));
        assert_eq!(response.reprompt_text(), Some("Please try again."));
        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_launch_starts_stream() {
        let dir = english_dir();
        let response = invoke(&skill_for(dir.path()), launch_request("en-US")).response;
        assert_eq!(response.speech_text(), Some("Starting Dabble Radio"));
        assert!(matches!(response.directives[0], Directive::Play { .. }));
        assert_eq!(response.should_end_session, Some(true));
    }

    #[test]
    fn test_stop_clears_and_stops() {
        let dir = english_dir();
        let response = invoke(
            &skill_for(dir.path()),
            intent_request("AMAZON.StopIntent", "en-US"),
        )
        .response;
        assert_eq!(response.directives.len(), 2);
        assert_eq!(response.directives[1], Directive::Stop);
    }

    #[test]
    fn test_help_variants_are_all_reachable() {
        let dir = english_dir();
        let skill = skill_for(dir.path());
        let env = envelope(intent_request("AMAZON.HelpIntent", "en-US"));
        let mut rng = StdRng::seed_from_u64(5);

        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let response = skill.invoke_with_rng(&env, &mut rng).unwrap().response;
            seen.insert(response.speech_text().unwrap().to_string());
            assert_eq!(response.should_end_session, Some(false));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_unroutable_request_gets_spoken_error() {
        let dir = english_dir();
        let response = invoke(
            &skill_for(dir.path()),
            intent_request("PlayJazzIntent", "en-US"),
        )
        .response;
        assert_eq!(response.speech_text(), Some("Something went wrong."));
        assert_eq!(response.reprompt_text(), Some("Please try again."));
        assert_eq!(response.should_end_session, Some(false));
    }

    #[test]
    fn test_regional_locale_uses_language_file() {
        let dir = english_dir();
        let response = invoke(
            &skill_for(dir.path()),
            intent_request("AMAZON.FallbackIntent", "en-GB"),
        )
        .response;
        assert_eq!(response.speech_text(), Some("I didn't get that."));
    }

    #[test]
    fn test_unsupported_locale_is_an_error() {
        let dir = english_dir();
        let skill = skill_for(dir.path());
        let mut rng = StdRng::seed_from_u64(0);
        let result = skill.invoke_with_rng(&envelope(launch_request("xx-YY")), &mut rng);
        assert!(matches!(
            result,
            Err(SkillError::PromptResolution { locale: Some(ref l) }) if l == "xx-YY"
        ));
    }

    #[test]
    fn test_missing_prompt_key_falls_back_to_error_speech() {
        let dir = tempfile::tempdir().unwrap();
        write_prompts(
            dir.path(),
            &["en"],
            &json!({ "ERROR": "Oops.", "ERROR_REPROMPT": "Again?" }),
        );
        let response = invoke(
            &skill_for(dir.path()),
            intent_request("AMAZON.HelpIntent", "en-US"),
        )
        .response;
        assert_eq!(response.speech_text(), Some("Oops."));
        assert_eq!(response.reprompt_text(), Some("Again?"));
    }

    #[test]
    fn test_screenless_device_is_turned_away_first() {
        let dir = english_dir();
        let skill = skill_for(dir.path());
        let mut rng = StdRng::seed_from_u64(0);
        let response = skill
            .invoke_with_rng(&screenless_envelope(launch_request("en-US")), &mut rng)
            .unwrap()
            .response;
        assert_eq!(
            response.speech_text(),
            Some("Sorry, this device can't play audio.")
        );
        assert!(response.directives.is_empty());
    }

    #[test]
    fn test_skill_id_is_verified() {
        let dir = english_dir();
        let mut config = StreamcastConfig::default();
        config.skill.prompts_dir = dir.path().to_string_lossy().into_owned();
        config.skill.skill_id = Some("amzn1.ask.skill.other".to_string());
        let skill = Skill::from_config(&config).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let result = skill.invoke_with_rng(&envelope(launch_request("en-US")), &mut rng);
        assert!(matches!(result, Err(SkillError::SkillIdMismatch { .. })));

        config.skill.skill_id = Some("amzn1.ask.skill.test".to_string());
        let skill = Skill::from_config(&config).unwrap();
        assert!(skill
            .invoke_with_rng(&envelope(launch_request("en-US")), &mut rng)
            .is_ok());
    }

    #[test]
    fn test_builder_requires_stream() {
        assert!(matches!(
            SkillBuilder::new().build(),
            Err(SkillError::NoStreamConfigured)
        ));

        let mut config = StreamcastConfig::default();
        config.streams.clear();
        assert!(matches!(
            Skill::from_config(&config),
            Err(SkillError::NoStreamConfigured)
        ));
    }

    #[test]
    fn test_without_exception_handler_error_propagates() {
        let skill = SkillBuilder::new()
            .with_stream(StreamcastConfig::default().streams.remove(0))
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = skill.invoke_with_rng(&envelope(launch_request("en-US")), &mut rng);
        assert!(matches!(result, Err(SkillError::Unroutable { .. })));
    }

    #[test]
    fn test_standard_registers_all_handlers() {
        let skill = Skill::from_config(&StreamcastConfig::default()).unwrap();
        assert_eq!(skill.handler_names().len(), 13);
        assert_eq!(skill.stream().title, "Dabble Radio");
    }
}
