//! REST client for nyaya-api
//!
//! One method per endpoint. Non-2xx responses are decoded from the
//! `{"error": {"code", "message"}}` body into `ClientError::Api`.

use nyaya_common::models::{
    Case, CaseStatus, CaseUpdate, ErrorBody, HealthResponse, Language, LegalDocument, LegalQuery,
    MessageResponse, NewCase, NewDocument, NewQuery, NewStudent, SeedSummary, Student,
    TextQueryRequest, TextQueryResponse, TranscriptionResponse, TtsRequest, VoiceQueryResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{header, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ClientError, Result};

const USER_AGENT: &str = concat!("nyaya/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Audio returned by the text-to-speech endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl SpeechAudio {
    /// Media type without parameters such as `; rate=22050`
    fn media_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    pub fn is_wav(&self) -> bool {
        self.extension() == "wav"
    }

    /// File extension used when the audio is saved rather than played
    pub fn extension(&self) -> &'static str {
        match self.media_type().as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/ogg" | "audio/opus" => "ogg",
            "audio/webm" => "webm",
            "audio/flac" | "audio/x-flac" => "flac",
            _ => "bin",
        }
    }
}

/// nyaya-api client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and turn non-2xx into `ClientError::Api`
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error.message,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            Err(_) => body,
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.http.delete(self.url(path))).await?;
        Ok(response.json().await?)
    }

    fn wav_part(wav: Vec<u8>) -> Result<Part> {
        Ok(Part::bytes(wav)
            .file_name("recording.wav")
            .mime_str("audio/wav")?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/api/health").await
    }

    // Queries

    pub async fn submit_query(&self, query: &NewQuery) -> Result<LegalQuery> {
        self.post_json("/api/queries", query).await
    }

    pub async fn text_query(&self, query: &str, language: Language) -> Result<String> {
        let request = TextQueryRequest {
            query: query.to_string(),
            language,
        };
        let response: TextQueryResponse = self.post_json("/api/text-query", &request).await?;
        Ok(response.answer)
    }

    pub async fn get_query(&self, id: Uuid) -> Result<LegalQuery> {
        self.get_json(&format!("/api/queries/{}", id)).await
    }

    pub async fn list_queries(&self, limit: i64) -> Result<Vec<LegalQuery>> {
        self.get_json(&format!("/api/queries?limit={}", limit)).await
    }

    // Voice

    /// Upload a WAV recording; with no language the server detects one
    pub async fn voice_query(
        &self,
        wav: Vec<u8>,
        language: Option<Language>,
    ) -> Result<VoiceQueryResponse> {
        let mut form = Form::new().part("audio_file", Self::wav_part(wav)?);
        if let Some(language) = language {
            form = form.text("language", language.as_str());
        }

        let request = self.http.post(self.url("/api/voice-query")).multipart(form);
        Ok(self.send(request).await?.json().await?)
    }

    pub async fn transcribe(&self, wav: Vec<u8>) -> Result<String> {
        let form = Form::new().part("audio_file", Self::wav_part(wav)?);
        let request = self.http.post(self.url("/api/voice-to-text")).multipart(form);
        let response: TranscriptionResponse = self.send(request).await?.json().await?;
        Ok(response.text)
    }

    pub async fn text_to_speech(&self, text: &str, language: Language) -> Result<SpeechAudio> {
        let request = TtsRequest {
            text: text.to_string(),
            language,
        };
        let response = self
            .send(self.http.post(self.url("/api/text-to-speech")).json(&request))
            .await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/wav")
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(SpeechAudio {
            bytes,
            content_type,
        })
    }

    // Documents

    pub async fn generate_document(&self, document: &NewDocument) -> Result<LegalDocument> {
        self.post_json("/api/documents", document).await
    }

    pub async fn get_document(&self, id: Uuid) -> Result<LegalDocument> {
        self.get_json(&format!("/api/documents/{}", id)).await
    }

    // Students

    pub async fn list_students(&self) -> Result<Vec<Student>> {
        self.get_json("/api/students").await
    }

    pub async fn create_student(&self, student: &NewStudent) -> Result<Student> {
        self.post_json("/api/students", student).await
    }

    pub async fn delete_student(&self, id: Uuid) -> Result<MessageResponse> {
        self.delete_json(&format!("/api/students/{}", id)).await
    }

    pub async fn student_cases(&self, id: Uuid) -> Result<Vec<Case>> {
        self.get_json(&format!("/api/students/{}/assigned-cases", id))
            .await
    }

    // Cases

    pub async fn list_cases(&self) -> Result<Vec<Case>> {
        self.get_json("/api/cases").await
    }

    pub async fn create_case(&self, case: &NewCase) -> Result<Case> {
        self.post_json("/api/cases", case).await
    }

    pub async fn update_case(&self, id: Uuid, update: &CaseUpdate) -> Result<Case> {
        let request = self
            .http
            .patch(self.url(&format!("/api/cases/{}", id)))
            .json(update);
        Ok(self.send(request).await?.json().await?)
    }

    pub async fn assign_case(&self, id: Uuid, student_id: Uuid) -> Result<Case> {
        self.update_case(id, &CaseUpdate::assign(student_id)).await
    }

    pub async fn unassign_case(&self, id: Uuid) -> Result<Case> {
        self.update_case(id, &CaseUpdate::unassign()).await
    }

    pub async fn set_case_status(&self, id: Uuid, status: CaseStatus) -> Result<Case> {
        self.update_case(id, &CaseUpdate::status(status)).await
    }

    pub async fn delete_case(&self, id: Uuid) -> Result<MessageResponse> {
        self.delete_json(&format!("/api/cases/{}", id)).await
    }

    pub async fn seed(&self) -> Result<SeedSummary> {
        let response = self.send(self.http.post(self.url("/api/seed"))).await?;
        Ok(response.json().await?)
    }
}
