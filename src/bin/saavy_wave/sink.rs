//! cpal-backed audio sink
//!
//! One output stream is opened for the lifetime of the sink. `play` swaps the
//! buffer the stream reads from; `stop` silences it. Buffers recorded at a
//! different rate than the device are stepped through at `buffer_rate /
//! device_rate` samples per frame.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, PushError};

use saavy_wave::{
    io::{AudioSink, PlaybackOptions},
    SampleBuffer, SynthError,
};

/// How often a blocking `play` checks whether the buffer has run out
const BLOCKING_POLL: Duration = Duration::from_millis(10);

/// What the audio callback is currently reading
#[derive(Default)]
struct Transport {
    samples: Vec<f32>,
    position: f64,
    step: f64,
    looping: bool,
    active: bool,
}

impl Transport {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        if !self.active || self.samples.is_empty() {
            return 0.0;
        }

        let mut index = self.position as usize;
        if index >= self.samples.len() {
            if !self.looping {
                self.active = false;
                return 0.0;
            }
            self.position %= self.samples.len() as f64;
            index = self.position as usize;
        }

        self.position += self.step;
        self.samples[index]
    }
}

fn lock(transport: &Mutex<Transport>) -> MutexGuard<'_, Transport> {
    // poisoned state is still plain data
    transport.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct CpalSink {
    transport: Arc<Mutex<Transport>>,
    device_rate: u32,
    _stream: cpal::Stream,
}

impl CpalSink {
    /// Open the default output device. Every frame sent to the device is also
    /// pushed to `scope` (dropped when the ring is full).
    pub fn new(mut scope: Option<Producer<f32>>) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let device_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        tracing::info!(device_rate, channels, "opened output device");

        let transport = Arc::new(Mutex::new(Transport::default()));
        let callback_transport = transport.clone();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let mut transport = lock(&callback_transport);
                    let mut scope_open = scope.is_some();
                    for frame in data.chunks_mut(channels) {
                        let sample = transport.next_sample();
                        frame.fill(sample);

                        // the UI only needs the latest window; skip the rest once it is full
                        if scope_open {
                            if let Some(scope) = scope.as_mut() {
                                if let Err(PushError::Full(_)) = scope.push(sample) {
                                    scope_open = false;
                                }
                            }
                        }
                    }
                },
                |err| tracing::error!("audio stream error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        Ok(Self {
            transport,
            device_rate,
            _stream: stream,
        })
    }

    pub fn device_rate(&self) -> u32 {
        self.device_rate
    }

    /// Seconds into the current buffer, and whether it is still sounding.
    pub fn position(&self, sample_rate: u32) -> (f64, bool) {
        let transport = lock(&self.transport);
        let seconds = if sample_rate == 0 {
            0.0
        } else {
            transport.position / sample_rate as f64
        };
        (seconds, transport.active)
    }
}

impl AudioSink for CpalSink {
    fn play(&mut self, buffer: &SampleBuffer, options: PlaybackOptions) -> saavy_wave::Result<()> {
        if buffer.sample_rate == 0 {
            return Err(SynthError::Playback(
                "buffer has no sample rate".to_string(),
            ));
        }

        let samples = buffer.as_slice().to_vec();
        {
            let mut transport = lock(&self.transport);
            transport.samples = samples;
            transport.position = 0.0;
            transport.step = buffer.sample_rate as f64 / self.device_rate as f64;
            transport.looping = options.looping;
            transport.active = true;
        }
        tracing::debug!(
            seconds = buffer.duration(),
            looping = options.looping,
            "cpal sink started buffer"
        );

        if options.blocking {
            while lock(&self.transport).active {
                std::thread::sleep(BLOCKING_POLL);
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> saavy_wave::Result<()> {
        let mut transport = lock(&self.transport);
        transport.active = false;
        transport.position = 0.0;
        Ok(())
    }
}
