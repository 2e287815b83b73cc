//! Inbound request envelope sent by the voice platform.
//!
//! The host defines this schema; only the parts the skill routes on are
//! modelled and everything else is ignored. The `request` object is turned
//! into a typed [`RequestKind`] while deserializing, so handlers never look
//! at raw type strings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Context,
    pub request: Request,
}

impl RequestEnvelope {
    pub fn locale(&self) -> Option<&str> {
        self.request.locale.as_deref()
    }

    /// Name of the intent, for intent requests only.
    pub fn intent_name(&self) -> Option<&IntentName> {
        match &self.request.kind {
            RequestKind::Intent(intent) => Some(&intent.intent.name),
            _ => None,
        }
    }

    /// Application id from the context, falling back to the session.
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .system
            .application
            .as_ref()
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|app| app.application_id.as_str())
    }

    /// Whether the calling device can play audio.
    ///
    /// `None` when the request carries no device at all.
    pub fn supports_audio_player(&self) -> Option<bool> {
        self.context
            .system
            .device
            .as_ref()
            .map(|device| device.supported_interfaces.audio_player.is_some())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: SystemState,
    #[serde(rename = "AudioPlayer", default)]
    pub audio_player: Option<AudioPlayerState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub supported_interfaces: SupportedInterfaces,
}

/// Interfaces the device advertises. Presence of a key means support.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupportedInterfaces {
    #[serde(rename = "AudioPlayer", default)]
    pub audio_player: Option<AudioPlayerInterface>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioPlayerInterface {}

/// Host-side playback state reported with every request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub offset_in_milliseconds: Option<u64>,
    #[serde(default)]
    pub player_activity: Option<String>,
}

/// The `request` object: common header fields plus the typed body.
#[derive(Debug, Clone)]
pub struct Request {
    pub request_id: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub locale: Option<String>,
    pub kind: RequestKind,
    /// The object exactly as received, including fields not modelled here.
    pub raw: Value,
}

/// Every request category the skill distinguishes.
#[derive(Debug, Clone)]
pub enum RequestKind {
    Launch,
    Intent(IntentRequest),
    SessionEnded(SessionEndedRequest),
    PlaybackStarted(PlaybackEvent),
    PlaybackStopped(PlaybackEvent),
    PlaybackNearlyFinished(PlaybackEvent),
    PlaybackFinished(PlaybackEvent),
    PlaybackFailed(PlaybackFailedEvent),
    PlayCommandIssued,
    PauseCommandIssued,
    NextCommandIssued,
    PreviousCommandIssued,
    ExceptionEncountered(ExceptionEncounteredRequest),
    /// A request type this skill has no model for. Holds the raw type tag.
    Unsupported(String),
}

impl RequestKind {
    /// The wire `type` tag for this request.
    pub fn type_name(&self) -> &str {
        match self {
            RequestKind::Launch => "LaunchRequest",
            RequestKind::Intent(_) => "IntentRequest",
            RequestKind::SessionEnded(_) => "SessionEndedRequest",
            RequestKind::PlaybackStarted(_) => "AudioPlayer.PlaybackStarted",
            RequestKind::PlaybackStopped(_) => "AudioPlayer.PlaybackStopped",
            RequestKind::PlaybackNearlyFinished(_) => "AudioPlayer.PlaybackNearlyFinished",
            RequestKind::PlaybackFinished(_) => "AudioPlayer.PlaybackFinished",
            RequestKind::PlaybackFailed(_) => "AudioPlayer.PlaybackFailed",
            RequestKind::PlayCommandIssued => "PlaybackController.PlayCommandIssued",
            RequestKind::PauseCommandIssued => "PlaybackController.PauseCommandIssued",
            RequestKind::NextCommandIssued => "PlaybackController.NextCommandIssued",
            RequestKind::PreviousCommandIssued => "PlaybackController.PreviousCommandIssued",
            RequestKind::ExceptionEncountered(_) => "System.ExceptionEncountered",
            RequestKind::Unsupported(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub intent: Intent,
    #[serde(default)]
    pub dialog_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: IntentName,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub error: Option<HostError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackEvent {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub offset_in_milliseconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackFailedEvent {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<HostError>,
    #[serde(default)]
    pub current_playback_state: Option<AudioPlayerState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionEncounteredRequest {
    #[serde(default)]
    pub error: Option<HostError>,
    #[serde(default)]
    pub cause: Option<ExceptionCause>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionCause {
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Error details the host attaches to failure notifications.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HostError {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.error_type.as_deref().unwrap_or("UNKNOWN"),
            self.message.as_deref().unwrap_or("")
        )
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    #[serde(rename = "type")]
    request_type: String,
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(flatten)]
    body: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let raw = RawRequest::deserialize(&value).map_err(serde::de::Error::custom)?;
        let kind = parse_kind(&raw.request_type, raw.body).map_err(serde::de::Error::custom)?;
        Ok(Request {
            request_id: raw.request_id,
            timestamp: raw.timestamp,
            locale: raw.locale,
            kind,
            raw: value,
        })
    }
}

fn parse_kind(request_type: &str, body: Map<String, Value>) -> serde_json::Result<RequestKind> {
    let body = Value::Object(body);
    let kind = match request_type {
        "LaunchRequest" => RequestKind::Launch,
        "IntentRequest" => RequestKind::Intent(serde_json::from_value(body)?),
        "SessionEndedRequest" => RequestKind::SessionEnded(serde_json::from_value(body)?),
        "AudioPlayer.PlaybackStarted" => {
            RequestKind::PlaybackStarted(serde_json::from_value(body)?)
        }
        "AudioPlayer.PlaybackStopped" => {
            RequestKind::PlaybackStopped(serde_json::from_value(body)?)
        }
        "AudioPlayer.PlaybackNearlyFinished" => {
            RequestKind::PlaybackNearlyFinished(serde_json::from_value(body)?)
        }
        "AudioPlayer.PlaybackFinished" => {
            RequestKind::PlaybackFinished(serde_json::from_value(body)?)
        }
        "AudioPlayer.PlaybackFailed" => RequestKind::PlaybackFailed(serde_json::from_value(body)?),
        "PlaybackController.PlayCommandIssued" => RequestKind::PlayCommandIssued,
        "PlaybackController.PauseCommandIssued" => RequestKind::PauseCommandIssued,
        "PlaybackController.NextCommandIssued" => RequestKind::NextCommandIssued,
        "PlaybackController.PreviousCommandIssued" => RequestKind::PreviousCommandIssued,
        "System.ExceptionEncountered" => {
            RequestKind::ExceptionEncountered(serde_json::from_value(body)?)
        }
        other => RequestKind::Unsupported(other.to_string()),
    };
    Ok(kind)
}

/// Intent names the skill recognises, plus a catch-all for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentName {
    Help,
    Cancel,
    Stop,
    Pause,
    Resume,
    Fallback,
    LoopOn,
    LoopOff,
    Next,
    Previous,
    Repeat,
    ShuffleOn,
    ShuffleOff,
    StartOver,
    About,
    Custom(String),
}

impl IntentName {
    pub fn as_str(&self) -> &str {
        match self {
            IntentName::Help => "AMAZON.HelpIntent",
            IntentName::Cancel => "AMAZON.CancelIntent",
            IntentName::Stop => "AMAZON.StopIntent",
            IntentName::Pause => "AMAZON.PauseIntent",
            IntentName::Resume => "AMAZON.ResumeIntent",
            IntentName::Fallback => "AMAZON.FallbackIntent",
            IntentName::LoopOn => "AMAZON.LoopOnIntent",
            IntentName::LoopOff => "AMAZON.LoopOffIntent",
            IntentName::Next => "AMAZON.NextIntent",
            IntentName::Previous => "AMAZON.PreviousIntent",
            IntentName::Repeat => "AMAZON.RepeatIntent",
            IntentName::ShuffleOn => "AMAZON.ShuffleOnIntent",
            IntentName::ShuffleOff => "AMAZON.ShuffleOffIntent",
            IntentName::StartOver => "AMAZON.StartOverIntent",
            IntentName::About => "AboutIntent",
            IntentName::Custom(name) => name,
        }
    }
}

impl From<String> for IntentName {
    fn from(name: String) -> Self {
        match name.as_str() {
            "AMAZON.HelpIntent" => IntentName::Help,
            "AMAZON.CancelIntent" => IntentName::Cancel,
            "AMAZON.StopIntent" => IntentName::Stop,
            "AMAZON.PauseIntent" => IntentName::Pause,
            "AMAZON.ResumeIntent" => IntentName::Resume,
            "AMAZON.FallbackIntent" => IntentName::Fallback,
            "AMAZON.LoopOnIntent" => IntentName::LoopOn,
            "AMAZON.LoopOffIntent" => IntentName::LoopOff,
            "AMAZON.NextIntent" => IntentName::Next,
            "AMAZON.PreviousIntent" => IntentName::Previous,
            "AMAZON.RepeatIntent" => IntentName::Repeat,
            "AMAZON.ShuffleOnIntent" => IntentName::ShuffleOn,
            "AMAZON.ShuffleOffIntent" => IntentName::ShuffleOff,
            "AMAZON.StartOverIntent" => IntentName::StartOver,
            "AboutIntent" => IntentName::About,
            _ => IntentName::Custom(name),
        }
    }
}

impl From<IntentName> for String {
    fn from(name: IntentName) -> Self {
        match name {
            IntentName::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
