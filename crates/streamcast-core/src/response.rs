//! Outbound response envelope and its builder.

use serde::{Deserialize, Serialize};

use crate::stream::{ImageSource, StreamDescriptor};

pub const RESPONSE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: Response,
}

impl ResponseEnvelope {
    /// An envelope with nothing to say and no directives.
    pub fn empty() -> Self {
        ResponseBuilder::new().build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Plain text of the output speech, without SSML wrapping.
    pub fn speech_text(&self) -> Option<&str> {
        self.output_speech.as_ref().map(OutputSpeech::text)
    }

    /// Plain text of the reprompt, without SSML wrapping.
    pub fn reprompt_text(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.text())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    #[serde(rename = "PlainText")]
    PlainText { text: String },
}

impl OutputSpeech {
    /// Wrap text in a `<speak>` element unless it already is one.
    pub fn ssml(text: &str) -> Self {
        let trimmed = text.trim();
        let ssml = if trimmed.starts_with("<speak>") && trimmed.ends_with("</speak>") {
            trimmed.to_string()
        } else {
            format!("<speak>{}</speak>", text)
        };
        OutputSpeech::Ssml { ssml }
    }

    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::Ssml { ssml } => ssml
                .strip_prefix("<speak>")
                .and_then(|s| s.strip_suffix("</speak>"))
                .unwrap_or(ssml),
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Side effects the host performs after receiving the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play", rename_all = "camelCase")]
    Play {
        play_behavior: PlayBehavior,
        audio_item: AudioItem,
    },
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
    #[serde(rename = "AudioPlayer.ClearQueue", rename_all = "camelCase")]
    ClearQueue { clear_behavior: ClearBehavior },
}

impl Directive {
    /// Play `stream` from the beginning, replacing whatever is queued.
    pub fn play_stream(stream: &StreamDescriptor) -> Self {
        Directive::Play {
            play_behavior: PlayBehavior::ReplaceAll,
            audio_item: AudioItem {
                stream: AudioStream {
                    token: stream.token.clone(),
                    url: stream.url.clone(),
                    offset_in_milliseconds: 0,
                    expected_previous_token: None,
                },
                metadata: Some(AudioItemMetadata::from(stream)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayBehavior {
    ReplaceAll,
    Enqueue,
    ReplaceEnqueued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClearBehavior {
    ClearAll,
    ClearEnqueued,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItem {
    pub stream: AudioStream,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AudioItemMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    pub token: String,
    pub url: String,
    pub offset_in_milliseconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItemMetadata {
    pub title: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<Image>,
}

impl From<&StreamDescriptor> for AudioItemMetadata {
    fn from(stream: &StreamDescriptor) -> Self {
        Self {
            title: stream.title.clone(),
            subtitle: stream.subtitle.clone(),
            art: Image::from_sources(&stream.art),
            background_image: Image::from_sources(&stream.background_image),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub sources: Vec<ImageSourceWire>,
}

impl Image {
    /// `None` for an empty list; the host rejects images without sources.
    fn from_sources(sources: &[ImageSource]) -> Option<Self> {
        if sources.is_empty() {
            return None;
        }
        Some(Self {
            sources: sources.iter().map(ImageSourceWire::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSourceWire {
    pub content_description: String,
    pub url: String,
    pub width_pixels: u32,
    pub height_pixels: u32,
}

impl From<&ImageSource> for ImageSourceWire {
    fn from(source: &ImageSource) -> Self {
        Self {
            content_description: source.content_description.clone(),
            url: source.url.clone(),
            width_pixels: source.width_pixels,
            height_pixels: source.height_pixels,
        }
    }
}

/// Fluent builder used by every handler.
///
/// `ask` implies the session stays open; handlers that never call `ask` or
/// `set_should_end_session` leave the flag unset and the host decides.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, speech: &str) -> Self {
        self.response.output_speech = Some(OutputSpeech::ssml(speech));
        self
    }

    pub fn ask(mut self, reprompt: &str) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(reprompt),
        });
        self.response.should_end_session = Some(false);
        self
    }

    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.response.directives.push(directive);
        self
    }

    pub fn set_should_end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            response: self.response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::default_streams;
    use serde_json::json;

    #[test]
    fn test_empty_response_serializes_minimal() {
        let value = serde_json::to_value(ResponseEnvelope::empty()).unwrap();
        assert_eq!(value, json!({ "version": "1.0", "response": {} }));
    }

    #[test]
    fn test_speak_wraps_ssml() {
        let envelope = ResponseBuilder::new().speak("Hello there").build();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value["response"]["outputSpeech"],
            json!({ "type": "SSML", "ssml": "<speak>Hello there</speak>" })
        );
        assert_eq!(envelope.response.speech_text(), Some("Hello there"));
    }

    #[test]
    fn test_speak_keeps_existing_speak_element() {
        let speech = OutputSpeech::ssml("<speak>Hi <break time=\"1s\"/></speak>");
        assert_eq!(
            speech,
            OutputSpeech::Ssml {
                ssml: "<speak>Hi <break time=\"1s\"/></speak>".to_string()
            }
        );
        assert_eq!(speech.text(), "Hi <break time=\"1s\"/>");
    }

    #[test]
    fn test_ask_keeps_session_open() {
        let envelope = ResponseBuilder::new().speak("Question?").ask("Still there?").build();
        assert_eq!(envelope.response.should_end_session, Some(false));
        assert_eq!(envelope.response.reprompt_text(), Some("Still there?"));
    }

    #[test]
    fn test_play_directive_wire_format() {
        let streams = default_streams();
        let stream = &streams[0];
        let envelope = ResponseBuilder::new()
            .add_directive(Directive::play_stream(stream))
            .set_should_end_session(true)
            .build();
        let value = serde_json::to_value(&envelope).unwrap();
        let directive = &value["response"]["directives"][0];

        assert_eq!(directive["type"], "AudioPlayer.Play");
        assert_eq!(directive["playBehavior"], "REPLACE_ALL");
        assert_eq!(directive["audioItem"]["stream"]["token"], "1");
        assert_eq!(directive["audioItem"]["stream"]["offsetInMilliseconds"], 0);
        assert!(directive["audioItem"]["stream"]
            .get("expectedPreviousToken")
            .is_none());
        assert_eq!(directive["audioItem"]["metadata"]["title"], "Dabble Radio");
        assert_eq!(
            directive["audioItem"]["metadata"]["art"]["sources"][0]["widthPixels"],
            512
        );
        assert_eq!(
            directive["audioItem"]["metadata"]["backgroundImage"]["sources"][0]["heightPixels"],
            800
        );
        assert_eq!(value["response"]["shouldEndSession"], true);
    }

    #[test]
    fn test_play_directive_omits_missing_images() {
        let mut stream = default_streams().remove(0);
        stream.art.clear();
        stream.background_image.clear();

        let value = serde_json::to_value(Directive::play_stream(&stream)).unwrap();
        let metadata = &value["audioItem"]["metadata"];
        assert_eq!(metadata["title"], "Dabble Radio");
        assert!(metadata.get("art").is_none());
        assert!(metadata.get("backgroundImage").is_none());
    }

    #[test]
    fn test_stop_and_clear_queue_wire_format() {
        let envelope = ResponseBuilder::new()
            .add_directive(Directive::ClearQueue {
                clear_behavior: ClearBehavior::ClearEnqueued,
            })
            .add_directive(Directive::Stop)
            .build();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value["response"]["directives"],
            json!([
                { "type": "AudioPlayer.ClearQueue", "clearBehavior": "CLEAR_ENQUEUED" },
                { "type": "AudioPlayer.Stop" }
            ])
        );
    }

    #[test]
    fn test_response_deserializes_from_wire() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "response": {
                "directives": [{ "type": "AudioPlayer.ClearQueue", "clearBehavior": "CLEAR_ALL" }],
                "shouldEndSession": true
            }
        }))
        .unwrap();
        assert_eq!(
            envelope.response.directives,
            vec![Directive::ClearQueue {
                clear_behavior: ClearBehavior::ClearAll
            }]
        );
        assert!(envelope.response.output_speech.is_none());
    }
}
