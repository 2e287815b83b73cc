//! Audio stream descriptors.
//!
//! A stream is configured once and never changes while the process runs.
//! Only the first configured stream is played by any handler.

use serde::{Deserialize, Serialize};

/// One playable audio source plus the metadata shown on screen devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Opaque token the host echoes back in AudioPlayer events.
    pub token: String,
    /// Playback URL. Hosts only accept HTTPS sources.
    pub url: String,
    /// Spoken before playback starts and shown as the track title.
    pub title: String,
    /// Tagline shown on screen devices while playing.
    #[serde(default)]
    pub subtitle: String,
    /// Album art, typically 512x512.
    #[serde(default)]
    pub art: Vec<ImageSource>,
    /// Background image, typically 1200x800.
    #[serde(default)]
    pub background_image: Vec<ImageSource>,
}

/// A single image rendition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(default)]
    pub content_description: String,
    pub url: String,
    #[serde(default)]
    pub width_pixels: u32,
    #[serde(default)]
    pub height_pixels: u32,
}

/// The stream shipped with a fresh install.
pub fn default_streams() -> Vec<StreamDescriptor> {
    vec![StreamDescriptor {
        token: "1".to_string(),
        url: "https://www.radiokrishna.com/RKC-Terni-HQ.m3u".to_string(),
        title: "Dabble Radio".to_string(),
        subtitle: "A subtitle for dabble radio".to_string(),
        art: vec![ImageSource {
            content_description: "example image".to_string(),
            url: "https://s3.amazonaws.com/cdn.dabblelab.com/img/audiostream-starter-512x512.png"
                .to_string(),
            width_pixels: 512,
            height_pixels: 512,
        }],
        background_image: vec![ImageSource {
            content_description: "example image".to_string(),
            url: "https://s3.amazonaws.com/cdn.dabblelab.com/img/wayfarer-on-beach-1200x800.png"
                .to_string(),
            width_pixels: 1200,
            height_pixels: 800,
        }],
    }]
}
