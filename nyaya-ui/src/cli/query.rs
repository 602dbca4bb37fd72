//! ask, voice, history and speak commands

use anyhow::{bail, Context as _, Result};
use nyaya_common::models::Language;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::Context;
use crate::audio::{self, Player, Recorder};
use crate::client::SpeechAudio;
use crate::forms::QueryForm;

pub async fn ask(ctx: &Context, text: String, language: Language, speak: bool) -> Result<()> {
    let query = QueryForm { text, language }
        .validate()
        .map_err(crate::ClientError::from)?;

    let answer = ctx.client.submit_query(&query).await?;
    print!("{}", ctx.renderer.guidance(&answer));

    if speak {
        read_aloud(ctx, &answer.response_text, answer.detected_language).await?;
    }
    Ok(())
}

/// Where a voice command gets its WAV from
pub struct AudioSource {
    pub file: Option<PathBuf>,
    pub max_seconds: u64,
}

impl AudioSource {
    async fn load(self) -> Result<Vec<u8>> {
        match self.file {
            Some(path) => tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            None => record(Duration::from_secs(self.max_seconds)).await,
        }
    }
}

pub async fn voice(
    ctx: &Context,
    source: AudioSource,
    language: Option<Language>,
    speak: bool,
) -> Result<()> {
    let wav = source.load().await?;

    let response = ctx.client.voice_query(wav, language).await?;
    print!("{}", ctx.renderer.voice_answer(&response));

    if speak && !response.query_text.is_empty() {
        read_aloud(ctx, &response.answer, response.language).await?;
    }
    Ok(())
}

pub async fn transcribe(ctx: &Context, source: AudioSource) -> Result<()> {
    let wav = source.load().await?;
    let text = ctx.client.transcribe(wav).await?;
    print!("{}", ctx.renderer.transcript(&text));
    Ok(())
}

pub async fn history(ctx: &Context, limit: i64) -> Result<()> {
    if limit < 1 {
        bail!("--limit must be at least 1");
    }
    let queries = ctx.client.list_queries(limit).await?;
    print!("{}", ctx.renderer.history(&queries));
    Ok(())
}

pub async fn speak(
    ctx: &Context,
    text: &str,
    language: Language,
    out: Option<PathBuf>,
    play: bool,
) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Text cannot be empty");
    }

    let audio = ctx.client.text_to_speech(text, language).await?;
    info!("Received {} bytes of {}", audio.bytes.len(), audio.content_type);

    if let Some(path) = &out {
        tokio::fs::write(path, &audio.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "{}",
            ctx.renderer.success(&format!("Saved audio to {}", path.display()))
        );
    }

    if play {
        play_audio(ctx, audio, out.is_some()).await?;
    }
    Ok(())
}

async fn read_aloud(ctx: &Context, text: &str, language: Language) -> Result<()> {
    let audio = ctx.client.text_to_speech(text, language).await?;
    play_audio(ctx, audio, false).await
}

/// Record from the microphone until Enter or the time limit
async fn record(max_duration: Duration) -> Result<Vec<u8>> {
    eprintln!(
        "Recording... press Enter to stop (max {}s)",
        max_duration.as_secs()
    );

    let recording = tokio::task::spawn_blocking(move || {
        let recorder = Recorder::open_default()?;
        recorder.record(audio::stop_on_enter(), max_duration)
    })
    .await
    .context("Recording task failed")??;

    if recording.is_empty() {
        bail!("No audio captured");
    }
    debug!("Recorded {:.1}s", recording.duration().as_secs_f64());

    Ok(recording.to_wav()?)
}

/// Play WAV directly; other formats are written to the temp dir for an
/// external player
async fn play_audio(ctx: &Context, audio: SpeechAudio, already_saved: bool) -> Result<()> {
    if audio.is_wav() {
        tokio::task::spawn_blocking(move || Player::open_default()?.play_wav(&audio.bytes))
            .await
            .context("Playback task failed")??;
        return Ok(());
    }

    if !already_saved {
        let path = std::env::temp_dir().join(format!("nyaya-speech.{}", audio.extension()));
        tokio::fs::write(&path, &audio.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!(
            "{}",
            ctx.renderer.success(&format!(
                "Cannot play {} here; saved to {}",
                audio.content_type,
                path.display()
            ))
        );
    }
    Ok(())
}
