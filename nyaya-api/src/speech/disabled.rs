//! Placeholder provider used when no engine URL is configured

use super::{AudioClip, SpeechError, SpeechToText, TextToSpeech};
use async_trait::async_trait;
use nyaya_common::models::Language;

#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSpeech;

#[async_trait]
impl SpeechToText for DisabledSpeech {
    async fn transcribe(&self, _clip: AudioClip) -> Result<String, SpeechError> {
        Err(SpeechError::NotConfigured("Speech-to-text"))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[async_trait]
impl TextToSpeech for DisabledSpeech {
    async fn synthesize(&self, _text: &str, _language: Language) -> Result<AudioClip, SpeechError> {
        Err(SpeechError::NotConfigured("Text-to-speech"))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
