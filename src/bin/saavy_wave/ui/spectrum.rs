//! Spectrum analyzer widget
//!
//! Hann-windowed FFT of the scope buffer, read out at log-spaced frequencies
//! between 20 Hz and Nyquist.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use saavy_wave::WindowKind;

/// Points drawn across the frequency axis
const SPECTRUM_POINTS: usize = 48;

const LOWEST_HZ: f64 = 20.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin read for each plotted point
    bins: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db)
    points: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);
        let window = WindowKind::Hanning
            .coefficients(fft_len)
            .into_iter()
            .map(|w| w as f32)
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).max(LOWEST_HZ);
        let last_bin = (fft_len / 2).max(1) - 1;
        let span = (nyquist / LOWEST_HZ).ln();

        let (freqs, bins): (Vec<f64>, Vec<usize>) = (0..SPECTRUM_POINTS)
            .map(|i| {
                let t = i as f64 / (SPECTRUM_POINTS - 1) as f64;
                let hz = LOWEST_HZ * (span * t).exp();
                let bin = (hz * fft_len as f64 / sample_rate.max(1.0) as f64).round() as usize;
                (hz, bin.min(last_bin))
            })
            .unzip();

        Self {
            window,
            bins,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            points: freqs.into_iter().map(|hz| (hz, FLOOR_DB)).collect(),
        }
    }

    /// Recompute from the latest scope samples (ignored unless the length
    /// matches the FFT size).
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((_, db), &bin) in self.points.iter_mut().zip(&self.bins) {
            let power = self.scratch[bin].norm_sqr().max(1e-12);
            *db = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum.last().map(|(hz, _)| *hz).unwrap_or(LOWEST_HZ);
    let max_db = spectrum.iter().map(|(_, db)| *db).fold(FLOOR_DB, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([LOWEST_HZ, max_freq])
                .labels(vec!["20".to_string(), format!("{:.0}", max_freq)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
