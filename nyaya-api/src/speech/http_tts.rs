//! HTTP text-to-speech
//!
//! Posts `{"text", "language"}` as JSON and returns the response body as
//! audio, keeping the engine's content type.

use super::{AudioClip, SpeechError, TextToSpeech};
use async_trait::async_trait;
use nyaya_common::models::{Language, TtsRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub struct HttpTtsProvider {
    http_client: Client,
    endpoint: String,
}

impl HttpTtsProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SpeechError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl TextToSpeech for HttpTtsProvider {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, SpeechError> {
        debug!("Synthesizing {} characters ({}) via {}", text.chars().count(), language, self.endpoint);

        let request = TtsRequest {
            text: text.to_string(),
            language,
        };
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request)
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

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .unwrap_or("audio/wav")
            .to_string();

        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(SpeechError::InvalidResponse("empty audio body".to_string()));
        }

        Ok(AudioClip::speech(bytes, content_type))
    }

    fn name(&self) -> &'static str {
        "http-tts"
    }
}
