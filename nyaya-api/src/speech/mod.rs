//! Speech-to-text and text-to-speech abstractions
//!
//! The engines themselves run outside this service. Handlers depend only on
//! the `SpeechToText` and `TextToSpeech` ports; the providers below talk to
//! HTTP engines, and `DisabledSpeech` stands in when none is configured.
//!
//! | Provider | STT | TTS |
//! |----------|-----|-----|
//! | `WhisperHttpProvider` | yes | no |
//! | `HttpTtsProvider` | no | yes |
//! | `DisabledSpeech` | 503 | 503 |

pub mod disabled;
pub mod error;
pub mod http_tts;
pub mod whisper_http;

pub use disabled::DisabledSpeech;
pub use error::SpeechError;
pub use http_tts::HttpTtsProvider;
pub use whisper_http::WhisperHttpProvider;

use async_trait::async_trait;
use nyaya_common::config::SpeechConfig;
use nyaya_common::models::Language;
use std::sync::Arc;
use std::time::Duration;

/// Raw audio plus enough metadata to forward it
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            filename: filename.into(),
        }
    }

    /// Synthesized speech, named after its content type
    pub fn speech(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        let filename = format!("speech.{}", audio_extension(&content_type));
        Self::new(bytes, content_type, filename)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// File extension for an audio content type; parameters are ignored
pub fn audio_extension(content_type: &str) -> &'static str {
    let base = content_type.split(';').next().unwrap_or_default().trim();
    match base.to_ascii_lowercase().as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/ogg" | "audio/opus" => "ogg",
        "audio/webm" => "webm",
        "audio/flac" | "audio/x-flac" => "flac",
        _ => "bin",
    }
}

/// Transcribe recorded audio
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, clip: AudioClip) -> Result<String, SpeechError>;

    fn name(&self) -> &'static str;
}

/// Synthesize speech from text
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, SpeechError>;

    fn name(&self) -> &'static str;
}

/// Both ports, as held by the application state
#[derive(Clone)]
pub struct SpeechServices {
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
}

impl SpeechServices {
    pub fn new(stt: Arc<dyn SpeechToText>, tts: Arc<dyn TextToSpeech>) -> Self {
        Self { stt, tts }
    }

    /// Speech disabled in both directions
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledSpeech), Arc::new(DisabledSpeech))
    }

    /// Build providers from the `[speech]` config table
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let stt: Arc<dyn SpeechToText> = match &config.stt_url {
            Some(url) => Arc::new(WhisperHttpProvider::new(url, timeout)?),
            None => Arc::new(DisabledSpeech),
        };
        let tts: Arc<dyn TextToSpeech> = match &config.tts_url {
            Some(url) => Arc::new(HttpTtsProvider::new(url, timeout)?),
            None => Arc::new(DisabledSpeech),
        };

        Ok(Self::new(stt, tts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_extension_ignores_parameters() {
        assert_eq!(audio_extension("audio/wav; rate=22050"), "wav");
        assert_eq!(audio_extension("audio/MPEG"), "mp3");
        assert_eq!(audio_extension("audio/ogg;codecs=opus"), "ogg");
        assert_eq!(audio_extension("application/octet-stream"), "bin");
    }

    #[test]
    fn test_speech_clip_named_by_type() {
        let clip = AudioClip::speech(vec![1, 2], "audio/mpeg");
        assert_eq!(clip.filename, "speech.mp3");
        assert_eq!(clip.content_type, "audio/mpeg");
    }
}
