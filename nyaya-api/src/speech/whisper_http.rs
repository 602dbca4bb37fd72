//! Whisper-compatible HTTP transcription
//!
//! Works with whisper.cpp's `server` (`/inference`) and OpenAI-style
//! `/v1/audio/transcriptions` endpoints: the clip goes out as a multipart
//! `file` part and the reply carries a JSON `text` field.

use super::{AudioClip, SpeechError, SpeechToText};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
}

pub struct WhisperHttpProvider {
    http_client: Client,
    endpoint: String,
}

impl WhisperHttpProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SpeechError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SpeechToText for WhisperHttpProvider {
    async fn transcribe(&self, clip: AudioClip) -> Result<String, SpeechError> {
        debug!("Transcribing {} bytes via {}", clip.bytes.len(), self.endpoint);

        let part = Part::bytes(clip.bytes)
            .file_name(clip.filename)
            .mime_str(&clip.content_type)
            .map_err(|e| SpeechError::InvalidAudio(format!("Bad content type: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("response_format", "json");

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: WhisperResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;

        Ok(body.text.trim().to_string())
    }

    fn name(&self) -> &'static str {
        "whisper-http"
    }
}
