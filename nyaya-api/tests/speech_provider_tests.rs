//! HTTP speech providers against a fake engine on an ephemeral port

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use nyaya_api::speech::{
    AudioClip, HttpTtsProvider, SpeechError, SpeechServices, SpeechToText, TextToSpeech,
    WhisperHttpProvider,
};
use nyaya_common::config::SpeechConfig;
use nyaya_common::models::{Language, TtsRequest};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// What the fake engine saw in the last transcription upload
#[derive(Debug, Default, Clone)]
struct Received {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
    response_format: Option<String>,
    fields: Vec<String>,
}

type Shared = Arc<Mutex<Received>>;

async fn inference(State(seen): State<Shared>, mut multipart: Multipart) -> impl IntoResponse {
    let mut received = Received::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        received.fields.push(name.clone());
        match name.as_str() {
            "file" => {
                received.file_name = field.file_name().map(str::to_string);
                received.content_type = field.content_type().map(str::to_string);
                received.bytes = field.bytes().await.unwrap().to_vec();
            }
            "response_format" => received.response_format = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    *seen.lock().unwrap() = received;
    Json(json!({"text": "  my landlord kept the deposit \n"}))
}

async fn tts(Json(request): Json<TtsRequest>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "audio/mpeg")],
        format!("{}|{}", request.language, request.text),
    )
}

/// Spawn the fake engine and return its base URL
async fn spawn_engine() -> (String, Shared) {
    let seen = Shared::default();
    let app = Router::new()
        .route("/inference", post(inference))
        .route(
            "/inference-down",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
        )
        .route("/inference-garbled", post(|| async { "not json" }))
        .route("/tts", post(tts))
        .route(
            "/tts-untyped",
            post(|| async { ([(header::CONTENT_TYPE, "text/plain")], "RIFF....") }),
        )
        .route(
            "/tts-empty",
            post(|| async { ([(header::CONTENT_TYPE, "audio/wav")], "") }),
        )
        .route(
            "/tts-busy",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "queue full") }),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

fn clip() -> AudioClip {
    AudioClip::new(b"RIFFclip".to_vec(), "audio/wav", "question.wav")
}

#[tokio::test]
async fn test_whisper_sends_file_and_trims_text() {
    let (base, seen) = spawn_engine().await;
    let stt = WhisperHttpProvider::new(format!("{}/inference", base), TIMEOUT).unwrap();

    let text = stt.transcribe(clip()).await.unwrap();
    assert_eq!(text, "my landlord kept the deposit");

    let received = seen.lock().unwrap().clone();
    assert_eq!(received.fields, vec!["file", "response_format"]);
    assert_eq!(received.file_name.as_deref(), Some("question.wav"));
    assert_eq!(received.content_type.as_deref(), Some("audio/wav"));
    assert_eq!(received.bytes, b"RIFFclip");
    assert_eq!(received.response_format.as_deref(), Some("json"));
}

#[tokio::test]
async fn test_whisper_error_status_is_provider_error() {
    let (base, _) = spawn_engine().await;
    let stt = WhisperHttpProvider::new(format!("{}/inference-down", base), TIMEOUT).unwrap();

    match stt.transcribe(clip()).await {
        Err(SpeechError::Provider { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_whisper_unparsable_reply() {
    let (base, _) = spawn_engine().await;
    let stt = WhisperHttpProvider::new(format!("{}/inference-garbled", base), TIMEOUT).unwrap();

    assert!(matches!(
        stt.transcribe(clip()).await,
        Err(SpeechError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_whisper_unreachable_is_network_error() {
    let stt = WhisperHttpProvider::new("http://127.0.0.1:9/inference", TIMEOUT).unwrap();
    assert!(matches!(
        stt.transcribe(clip()).await,
        Err(SpeechError::Network(_))
    ));
}

#[tokio::test]
async fn test_tts_keeps_engine_content_type() {
    let (base, _) = spawn_engine().await;
    let tts = HttpTtsProvider::new(format!("{}/tts", base), TIMEOUT).unwrap();

    let audio = tts
        .synthesize("File an FIR at the nearest station", Language::Hi)
        .await
        .unwrap();
    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(audio.filename, "speech.mp3");
    assert_eq!(audio.bytes, b"hi|File an FIR at the nearest station");
}

#[tokio::test]
async fn test_tts_non_audio_type_falls_back_to_wav() {
    let (base, _) = spawn_engine().await;
    let tts = HttpTtsProvider::new(format!("{}/tts-untyped", base), TIMEOUT).unwrap();

    let audio = tts.synthesize("hello", Language::En).await.unwrap();
    assert_eq!(audio.content_type, "audio/wav");
    assert_eq!(audio.filename, "speech.wav");
}

#[tokio::test]
async fn test_tts_empty_body_is_invalid() {
    let (base, _) = spawn_engine().await;
    let tts = HttpTtsProvider::new(format!("{}/tts-empty", base), TIMEOUT).unwrap();

    assert!(matches!(
        tts.synthesize("hello", Language::En).await,
        Err(SpeechError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_tts_error_status_is_provider_error() {
    let (base, _) = spawn_engine().await;
    let tts = HttpTtsProvider::new(format!("{}/tts-busy", base), TIMEOUT).unwrap();

    match tts.synthesize("hello", Language::En).await {
        Err(SpeechError::Provider { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "queue full");
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_services_from_config() {
    let (base, _) = spawn_engine().await;

    let configured = SpeechServices::from_config(&SpeechConfig {
        stt_url: Some(format!("{}/inference", base)),
        tts_url: Some(format!("{}/tts", base)),
        timeout_secs: 5,
    })
    .unwrap();
    assert_eq!(configured.stt.name(), "whisper-http");
    assert_eq!(configured.tts.name(), "http-tts");
    assert_eq!(
        configured.stt.transcribe(clip()).await.unwrap(),
        "my landlord kept the deposit"
    );

    let disabled = SpeechServices::from_config(&SpeechConfig::default()).unwrap();
    assert_eq!(disabled.stt.name(), "disabled");
    assert!(matches!(
        disabled.tts.synthesize("hello", Language::En).await,
        Err(SpeechError::NotConfigured(_))
    ));
}
