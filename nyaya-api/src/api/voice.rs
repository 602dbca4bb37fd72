//! Voice endpoints
//!
//! Uploads arrive as multipart form data with the recording in `audio_file`
//! (`file` and `audio` are accepted too) and an optional `language` field.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nyaya_common::models::{Language, TranscriptionResponse, TtsRequest, VoiceQueryResponse};
use tracing::info;

use crate::extract::ApiJson;
use crate::legal::{detect_language, NO_SPEECH_ANSWER};
use crate::speech::AudioClip;
use crate::{ApiError, ApiResult, AppState};

use super::queries::answer_and_store;

const AUDIO_FIELDS: [&str; 3] = ["audio_file", "file", "audio"];

/// Fields extracted from a voice upload
#[derive(Debug, Default)]
struct VoiceUpload {
    clip: Option<AudioClip>,
    language: Option<String>,
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<VoiceUpload> {
    let mut upload = VoiceUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if AUDIO_FIELDS.contains(&name.as_str()) {
            let filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "recording.webm".to_string());
            // multer drops a content type it cannot parse; the raw header tells us it was sent
            let raw_type = field.headers().get(header::CONTENT_TYPE);
            let content_type = match (field.content_type(), raw_type) {
                (Some(parsed), _) => parsed.to_string(),
                (None, None) => "application/octet-stream".to_string(),
                (None, Some(raw)) => {
                    return Err(ApiError::BadRequest(format!(
                        "Invalid content type for {}: {}",
                        name,
                        String::from_utf8_lossy(raw.as_bytes())
                    )))
                }
            };
            let bytes = field.bytes().await.map_err(multipart_error)?;
            upload.clip = Some(AudioClip::new(bytes.to_vec(), content_type, filename));
        } else if name == "language" {
            let value = field.text().await.map_err(multipart_error)?;
            if !value.trim().is_empty() {
                upload.language = Some(value);
            }
        }
    }

    Ok(upload)
}

fn require_clip(upload: &mut VoiceUpload) -> ApiResult<AudioClip> {
    match upload.clip.take() {
        Some(clip) if !clip.is_empty() => Ok(clip),
        Some(_) => Err(ApiError::BadRequest("Audio file is empty".to_string())),
        None => Err(ApiError::BadRequest("audio_file is required".to_string())),
    }
}

/// POST /api/voice-to-text
pub async fn voice_to_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<TranscriptionResponse>> {
    let mut upload = read_upload(multipart).await?;
    let clip = require_clip(&mut upload)?;

    let text = state.speech.stt.transcribe(clip).await?;
    info!("✓ Transcribed {} characters", text.chars().count());

    Ok(Json(TranscriptionResponse { text }))
}

/// POST /api/voice-query
///
/// Transcribe, pick a language (explicit form value, else detected from the
/// transcript), answer, and store the query.
pub async fn voice_query(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<VoiceQueryResponse>> {
    let mut upload = read_upload(multipart).await?;
    let clip = require_clip(&mut upload)?;

    let transcript = state.speech.stt.transcribe(clip).await?;
    let transcript = transcript.trim();

    if transcript.is_empty() {
        return Ok(Json(VoiceQueryResponse {
            query_text: String::new(),
            language: Language::En,
            answer: NO_SPEECH_ANSWER.to_string(),
        }));
    }

    let language = match upload.language.as_deref() {
        Some(code) => Language::from_code(code),
        None => detect_language(transcript),
    };

    let query = answer_and_store(&state, transcript, language).await?;

    Ok(Json(VoiceQueryResponse {
        query_text: query.query_text,
        language: query.detected_language,
        answer: query.response_text,
    }))
}

/// POST /api/text-to-speech
pub async fn text_to_speech(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TtsRequest>,
) -> ApiResult<Response> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    let clip = state.speech.tts.synthesize(text, request.language).await?;
    info!("✓ Generated TTS: {} characters", text.chars().count());

    let disposition = format!("attachment; filename=\"{}\"", clip.filename);
    Ok((
        [
            (header::CONTENT_TYPE, clip.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        clip.bytes,
    )
        .into_response())
}
