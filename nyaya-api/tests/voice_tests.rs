//! Voice endpoint tests with in-process speech providers

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use nyaya_api::speech::{AudioClip, SpeechError, SpeechServices, SpeechToText, TextToSpeech};
use nyaya_api::{build_router, AppState, HttpSettings};
use nyaya_common::db::{self, init_memory_database};
use nyaya_common::models::Language;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

const BOUNDARY: &str = "nyaya-test-boundary";

/// Returns a fixed transcript and remembers the last clip it was given
struct FixedTranscript {
    text: String,
    last_clip: Mutex<Option<AudioClip>>,
}

impl FixedTranscript {
    fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: text.to_string(),
            last_clip: Mutex::new(None),
        })
    }
}

#[async_trait]
impl SpeechToText for FixedTranscript {
    async fn transcribe(&self, clip: AudioClip) -> Result<String, SpeechError> {
        *self.last_clip.lock().unwrap() = Some(clip);
        Ok(self.text.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Encodes the text and language into the "audio" so tests can inspect it
struct EchoSpeech;

#[async_trait]
impl TextToSpeech for EchoSpeech {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, SpeechError> {
        Ok(AudioClip::new(
            format!("{}:{}", language, text).into_bytes(),
            "audio/mpeg",
            "speech.mp3",
        ))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

/// Always fails as an unreachable engine would
struct BrokenEngine;

#[async_trait]
impl SpeechToText for BrokenEngine {
    async fn transcribe(&self, _clip: AudioClip) -> Result<String, SpeechError> {
        Err(SpeechError::Provider {
            status: 500,
            message: "model crashed".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

async fn app_with(stt: Arc<dyn SpeechToText>) -> (axum::Router, sqlx::SqlitePool) {
    let pool = init_memory_database().await.unwrap();
    let speech = SpeechServices::new(stt, Arc::new(EchoSpeech));
    (build_router(AppState::new(pool.clone(), speech)), pool)
}

/// Build a multipart body from (name, filename, content type, bytes) parts
fn multipart_body(parts: &[(&str, Option<&str>, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match filename {
            Some(filename) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn audio_part(bytes: &[u8]) -> (&'static str, Option<&'static str>, Option<&'static str>, &[u8]) {
    ("audio_file", Some("question.webm"), Some("audio/webm"), bytes)
}

async fn json_of(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_voice_to_text_forwards_clip() {
    let stt = FixedTranscript::new("police did not register my complaint");
    let (app, _pool) = app_with(stt.clone()).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[audio_part(b"RIFFfake")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert_eq!(body["text"], "police did not register my complaint");

    let clip = stt.last_clip.lock().unwrap().clone().unwrap();
    assert_eq!(clip.bytes, b"RIFFfake");
    assert_eq!(clip.content_type, "audio/webm");
    assert_eq!(clip.filename, "question.webm");
}

#[tokio::test]
async fn test_voice_query_detects_language_and_stores() {
    let (app, pool) = app_with(FixedTranscript::new("मेरा फोन चोरी हो गया, police")).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-query",
            multipart_body(&[audio_part(b"audio")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert_eq!(body["language"], "hi");
    assert!(body["answer"].as_str().unwrap().starts_with("पुलिस के साथ"));

    let stored = db::list_queries(&pool, 10).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].category.as_str(), "fir");
}

#[tokio::test]
async fn test_voice_query_language_field_wins() {
    let (app, _pool) = app_with(FixedTranscript::new("how do I file an rti")).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-query",
            multipart_body(&[
                ("language", None, None, &b"hi"[..]),
                audio_part(b"audio"),
            ]),
        ))
        .await
        .unwrap();

    let body = json_of(response).await;
    assert_eq!(body["language"], "hi");
    assert!(body["answer"].as_str().unwrap().contains("आरटीआई"));
}

#[tokio::test]
async fn test_voice_query_silence() {
    let (app, pool) = app_with(FixedTranscript::new("   ")).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-query",
            multipart_body(&[audio_part(b"audio")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    assert_eq!(body["query_text"], "");
    assert_eq!(body["answer"], "No speech detected. Please try again.");
    assert!(db::list_queries(&pool, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_or_empty_audio_rejected() {
    let (app, _pool) = app_with(FixedTranscript::new("unused")).await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[("language", None, None, &b"en"[..])]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(response).await["error"]["message"],
        "audio_file is required"
    );

    let response = app
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[audio_part(b"")]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(response).await["error"]["message"], "Audio file is empty");
}

#[tokio::test]
async fn test_alternate_audio_field_name() {
    let (app, _pool) = app_with(FixedTranscript::new("hello")).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[("file", Some("a.wav"), Some("audio/wav"), &b"data"[..])]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_audio_content_type_rejected() {
    let stt = FixedTranscript::new("hello");
    let (app, _pool) = app_with(stt.clone()).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[("audio_file", Some("a.webm"), Some("not a type"), &b"data"[..])]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_of(response).await["error"]["message"],
        "Invalid content type for audio_file: not a type"
    );
    assert!(stt.last_clip.lock().unwrap().is_none());
}

#[tokio::test]
async fn test_engine_failure_is_bad_gateway() {
    let (app, _pool) = app_with(Arc::new(BrokenEngine)).await;

    let response = app
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[audio_part(b"audio")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_of(response).await["error"]["code"], "SPEECH_FAILED");
}

#[tokio::test]
async fn test_disabled_stt_is_503() {
    let pool = init_memory_database().await.unwrap();
    let app = build_router(AppState::new(pool, SpeechServices::disabled()));

    let response = app
        .oneshot(multipart_request(
            "/api/voice-query",
            multipart_body(&[audio_part(b"audio")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_upload_over_limit_is_413() {
    let pool = init_memory_database().await.unwrap();
    let speech = SpeechServices::new(FixedTranscript::new("x"), Arc::new(EchoSpeech));
    let app = build_router(AppState::new(pool, speech).with_settings(HttpSettings {
        cors_origins: vec!["*".to_string()],
        max_upload_bytes: 1024,
    }));

    let big = vec![0u8; 4096];
    let response = app
        .oneshot(multipart_request(
            "/api/voice-to-text",
            multipart_body(&[audio_part(&big)]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_text_to_speech_returns_audio() {
    let (app, _pool) = app_with(FixedTranscript::new("unused")).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/text-to-speech")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"text": "  Visit the police station  ", "language": "hi"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"speech.mp3\""
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"hi:Visit the police station");
}
