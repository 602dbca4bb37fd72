//! Microphone capture and playback using cpal
//!
//! Recording downmixes whatever the input device delivers to mono f32 and is
//! encoded as 16-bit PCM WAV (hound) for upload. Playback decodes WAV,
//! resamples to the output device rate with rubato when needed, and blocks
//! until done.
//!
//! cpal streams are not `Send` on every host, so both `Recorder::record` and
//! `Player::play` are blocking calls meant for `spawn_blocking`.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use rubato::{
    Resampler as _, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};
use std::io::{BufRead, Cursor};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::error::{ClientError, Result};

/// Longest recording accepted by the voice command by default
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Input frames per resampler call
const RESAMPLE_CHUNK: usize = 1024;

fn audio_err(context: &str, err: impl std::fmt::Display) -> ClientError {
    ClientError::Audio(format!("{}: {}", context, err))
}

/// Mono PCM samples in [-1.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Recording {
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn to_wav(&self) -> Result<Vec<u8>> {
        encode_wav(&self.samples, self.sample_rate)
    }
}

/// Encode mono samples as 16-bit PCM WAV in memory
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for sample in samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Decode WAV bytes, downmixing to mono
pub fn decode_wav(bytes: &[u8]) -> Result<Recording> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let samples = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    Ok(Recording {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Windowed-sinc sample rate conversion for mono speech (rubato)
///
/// Output length is `samples.len() * to_rate / from_rate`, with the filter delay
/// removed so the clip starts on time.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, RESAMPLE_CHUNK, 1)
        .map_err(|e| audio_err("Failed to create resampler", e))?;

    let delay = resampler.output_delay();
    let expected = (samples.len() as f64 * ratio).round() as usize;
    let mut output = Vec::with_capacity(expected + delay);

    let mut chunks = samples.chunks_exact(RESAMPLE_CHUNK);
    for chunk in &mut chunks {
        let input: [&[f32]; 1] = [chunk];
        let out = resampler
            .process(&input[..], None)
            .map_err(|e| audio_err("Resampling failed", e))?;
        output.extend_from_slice(&out[0]);
    }

    let rest = chunks.remainder();
    if !rest.is_empty() {
        let input: [&[f32]; 1] = [rest];
        let out = resampler
            .process_partial(Some(&input[..]), None)
            .map_err(|e| audio_err("Resampling failed", e))?;
        output.extend_from_slice(&out[0]);
    }

    // Flush the filter tail
    while output.len() < expected + delay {
        let out = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| audio_err("Resampling failed", e))?;
        if out[0].is_empty() {
            break;
        }
        output.extend_from_slice(&out[0]);
    }

    output.drain(..delay.min(output.len()));
    output.truncate(expected);

    debug!(
        "Resampled {} samples at {}Hz to {} at {}Hz",
        samples.len(),
        from_rate,
        output.len(),
        to_rate
    );
    Ok(output)
}

/// Set the returned flag when the user presses Enter
pub fn stop_on_enter() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);

    thread::spawn(move || {
        let mut line = String::new();
        if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
            warn!("Failed to read stdin: {}", e);
        }
        flag.store(true, Ordering::SeqCst);
    });

    stop
}

/// Default microphone capture
pub struct Recorder {
    device: Device,
    config: StreamConfig,
    sample_format: SampleFormat,
}

impl Recorder {
    pub fn open_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| ClientError::Audio("No microphone (input device) found".to_string()))?;

        let supported = device
            .default_input_config()
            .map_err(|e| audio_err("Failed to get input config", e))?;

        info!(
            "Using input device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        Ok(Self {
            device,
            sample_format: supported.sample_format(),
            config: supported.config(),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Capture until `stop` is set or `max_duration` elapses
    pub fn record(&self, stop: Arc<AtomicBool>, max_duration: Duration) -> Result<Recording> {
        let buffer = Arc::new(Mutex::new(Vec::<f32>::new()));

        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(Arc::clone(&buffer))?,
            SampleFormat::I16 => self.build_stream::<i16>(Arc::clone(&buffer))?,
            SampleFormat::U16 => self.build_stream::<u16>(Arc::clone(&buffer))?,
            other => {
                return Err(ClientError::Audio(format!(
                    "Unsupported input sample format: {:?}",
                    other
                )))
            }
        };

        stream
            .play()
            .map_err(|e| audio_err("Failed to start recording", e))?;

        let started = Instant::now();
        while !stop.load(Ordering::SeqCst) && started.elapsed() < max_duration {
            thread::sleep(POLL_INTERVAL);
        }
        drop(stream);

        let mut samples = match buffer.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        let max_samples = (max_duration.as_secs_f64() * self.sample_rate() as f64) as usize;
        samples.truncate(max_samples);

        debug!("Captured {} samples", samples.len());
        Ok(Recording {
            samples,
            sample_rate: self.sample_rate(),
        })
    }

    fn build_stream<T>(&self, buffer: Arc<Mutex<Vec<f32>>>) -> Result<Stream>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let channels = self.config.channels.max(1) as usize;

        self.device
            .build_input_stream(
                &self.config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = buffer.lock() {
                        for frame in data.chunks(channels) {
                            let sum: f32 = frame.iter().map(|s| f32::from_sample(*s)).sum();
                            buf.push(sum / frame.len() as f32);
                        }
                    }
                },
                |err| error!("Input stream error: {}", err),
                None,
            )
            .map_err(|e| audio_err("Failed to open microphone stream", e))
    }
}

/// Default speaker playback
pub struct Player {
    device: Device,
    config: StreamConfig,
    sample_format: SampleFormat,
}

impl Player {
    pub fn open_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| ClientError::Audio("No default output device found".to_string()))?;

        let supported = device
            .default_output_config()
            .map_err(|e| audio_err("Failed to get output config", e))?;

        debug!(
            "Output config: sample_rate={}, channels={}, format={:?}",
            supported.sample_rate().0,
            supported.channels(),
            supported.sample_format()
        );

        Ok(Self {
            device,
            sample_format: supported.sample_format(),
            config: supported.config(),
        })
    }

    /// Decode and play a WAV clip, returning once it has finished
    pub fn play_wav(&self, bytes: &[u8]) -> Result<()> {
        let recording = decode_wav(bytes)?;
        self.play(&recording)
    }

    pub fn play(&self, recording: &Recording) -> Result<()> {
        let device_rate = self.config.sample_rate.0;
        let samples = Arc::new(resample(
            &recording.samples,
            recording.sample_rate,
            device_rate,
        )?);
        if samples.is_empty() {
            return Ok(());
        }

        let position = Arc::new(AtomicUsize::new(0));
        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(Arc::clone(&samples), Arc::clone(&position))?,
            SampleFormat::I16 => self.build_stream::<i16>(Arc::clone(&samples), Arc::clone(&position))?,
            SampleFormat::U16 => self.build_stream::<u16>(Arc::clone(&samples), Arc::clone(&position))?,
            other => {
                return Err(ClientError::Audio(format!(
                    "Unsupported output sample format: {:?}",
                    other
                )))
            }
        };

        stream
            .play()
            .map_err(|e| audio_err("Failed to start playback", e))?;

        // Bound the wait in case the device stops pulling samples
        let expected = Duration::from_secs_f64(samples.len() as f64 / device_rate as f64);
        let deadline = Instant::now() + expected + Duration::from_secs(2);
        while position.load(Ordering::SeqCst) < samples.len() && Instant::now() < deadline {
            thread::sleep(POLL_INTERVAL);
        }
        // Let the device drain its last buffer
        thread::sleep(Duration::from_millis(150));

        Ok(())
    }

    fn build_stream<T>(&self, samples: Arc<Vec<f32>>, position: Arc<AtomicUsize>) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = self.config.channels.max(1) as usize;

        self.device
            .build_output_stream(
                &self.config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let index = position.fetch_add(1, Ordering::Relaxed);
                        let value = samples.get(index).copied().unwrap_or(0.0);
                        for out in frame.iter_mut() {
                            *out = T::from_sample(value);
                        }
                    }
                },
                |err| error!("Output stream error: {}", err),
                None,
            )
            .map_err(|e| audio_err("Failed to open output stream", e))
    }
}
