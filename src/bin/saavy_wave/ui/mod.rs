//! TUI module for saavy-wave
//!
//! Oscilloscope, spectrum and transport line for the looping demo.

mod spectrum;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::Duration;

use saavy_wave::{
    io::PlaybackOptions,
    sequencing::ArpMode,
    synth::Synth,
    Waveform,
};

use super::sink::CpalSink;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Samples kept for the scope and the FFT
const VIS_BUFFER_SIZE: usize = 1024;

/// What is loaded on the demo channel
#[derive(Debug, Clone, Copy)]
pub struct NowPlaying {
    pub shape: Waveform,
    pub mode: ArpMode,
    pub channel: usize,
    /// Rate the signal was rendered at
    pub sample_rate: u32,
    /// Rate the output device runs at
    pub device_rate: u32,
    /// Length of the looped signal
    pub seconds: f64,
}

pub struct UiApp {
    audio_rx: Consumer<f32>,
    synth: Synth<CpalSink>,
    now_playing: NowPlaying,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    is_playing: bool,
    should_quit: bool,
}

impl UiApp {
    pub fn new(audio_rx: Consumer<f32>, synth: Synth<CpalSink>, now_playing: NowPlaying) -> Self {
        Self {
            audio_rx,
            synth,
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, now_playing.device_rate as f32),
            now_playing,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            is_playing: true,
            should_quit: false,
        }
    }

    /// Draw and handle keys until `q`/`Esc`, then halt the synth.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }

        self.synth.halt()?;
        Ok(())
    }

    /// Drain the scope ring, keeping the latest VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        let mut fresh = Vec::with_capacity(available);
        while let Ok(sample) = self.audio_rx.pop() {
            fresh.push(sample);
        }

        self.audio_buffer.extend(fresh);
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> EyreResult<()> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.is_playing {
                    self.synth.halt()?;
                } else {
                    self.synth.play(
                        self.now_playing.channel,
                        PlaybackOptions::default().looping(true),
                    )?;
                }
                self.is_playing = !self.is_playing;
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Min(8),     // Waveform
                Constraint::Length(10), // Spectrum
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        let (position, sounding) = self.synth.sink().position(self.now_playing.sample_rate);
        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(
            frame,
            chunks[0],
            &self.now_playing,
            position,
            self.is_playing && sounding,
            &stats,
        );
        render_waveform(frame, chunks[1], &self.audio_buffer);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = Paragraph::new(" [Q] Quit  [Space] Play/Stop")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
