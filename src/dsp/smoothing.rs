use std::f64::consts::PI;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::buffer::SampleBuffer;
use crate::error::{Result, SynthError};

/*
Window Smoothing
================

Concatenated note buffers meet with hard edges. Convolving the joined signal
with a short, normalized window kernel rounds those edges off:

    1. mirror the first and last `len - 1` samples outward
           [x3 x2 x1] x0 x1 x2 ... xN-1 [xN-2 xN-3 xN-4]
    2. convolve with the kernel divided by its sum (unity DC gain)
    3. keep the `N` outputs centered on the original samples

With the flat window this is a centered moving average; the tapered windows
weight the middle of the neighbourhood more heavily.

| window   | w[n], n in 0..M, M = len                              |
| -------- | ----------------------------------------------------- |
| flat     | 1                                                     |
| hanning  | 0.5 - 0.5 cos(2πn/(M-1))                              |
| hamming  | 0.54 - 0.46 cos(2πn/(M-1))                            |
| bartlett | 1 - |2n/(M-1) - 1|                                    |
| blackman | 0.42 - 0.5 cos(2πn/(M-1)) + 0.08 cos(4πn/(M-1))       |
*/

/// Windows shorter than this are not worth convolving; the input is returned as-is.
pub const MIN_WINDOW_LEN: usize = 3;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Flat,
    Hanning,
    Hamming,
    Bartlett,
    Blackman,
}

impl WindowKind {
    pub const ALL: [WindowKind; 5] = [
        WindowKind::Flat,
        WindowKind::Hanning,
        WindowKind::Hamming,
        WindowKind::Bartlett,
        WindowKind::Blackman,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Flat => "flat",
            WindowKind::Hanning => "hanning",
            WindowKind::Hamming => "hamming",
            WindowKind::Bartlett => "bartlett",
            WindowKind::Blackman => "blackman",
        }
    }

    /// Raw (unnormalized) window coefficients of length `len`.
    pub fn coefficients(&self, len: usize) -> Vec<f64> {
        if len == 1 {
            return vec![1.0];
        }
        let m = (len - 1) as f64;
        (0..len)
            .map(|n| {
                let n = n as f64;
                match self {
                    WindowKind::Flat => 1.0,
                    WindowKind::Hanning => 0.5 - 0.5 * (2.0 * PI * n / m).cos(),
                    WindowKind::Hamming => 0.54 - 0.46 * (2.0 * PI * n / m).cos(),
                    WindowKind::Bartlett => 1.0 - (2.0 * n / m - 1.0).abs(),
                    WindowKind::Blackman => {
                        0.42 - 0.5 * (2.0 * PI * n / m).cos() + 0.08 * (4.0 * PI * n / m).cos()
                    }
                }
            })
            .collect()
    }

    /// Window coefficients scaled to sum to one.
    pub fn kernel(&self, len: usize) -> Vec<f64> {
        let mut w = self.coefficients(len);
        let sum: f64 = w.iter().sum();
        for c in w.iter_mut() {
            *c /= sum;
        }
        w
    }
}

impl FromStr for WindowKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(WindowKind::Flat),
            "hanning" | "hann" => Ok(WindowKind::Hanning),
            "hamming" => Ok(WindowKind::Hamming),
            "bartlett" => Ok(WindowKind::Bartlett),
            "blackman" => Ok(WindowKind::Blackman),
            _ => Err(SynthError::UnknownWindow(s.to_string())),
        }
    }
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Smooth `samples` with a `window_len`-point window of the given kind.
///
/// The result has the same length as the input. Errors when the input is
/// empty or shorter than the window; windows under [`MIN_WINDOW_LEN`] points
/// return a copy of the input.
pub fn smooth(samples: &[f32], window_len: usize, kind: WindowKind) -> Result<Vec<f32>> {
    if samples.is_empty() {
        return Err(SynthError::InvalidInput(
            "cannot smooth an empty buffer".to_string(),
        ));
    }
    if samples.len() < window_len {
        return Err(SynthError::InvalidInput(format!(
            "buffer of {} samples is shorter than the {}-point window",
            samples.len(),
            window_len
        )));
    }
    if window_len < MIN_WINDOW_LEN {
        return Ok(samples.to_vec());
    }

    let len = samples.len();
    let reach = window_len - 1;

    // mirror-pad: x[reach..1] ++ x ++ x[len-2..len-1-reach]
    let mut padded = Vec::with_capacity(len + 2 * reach);
    padded.extend(samples[1..=reach].iter().rev().map(|&x| x as f64));
    padded.extend(samples.iter().map(|&x| x as f64));
    padded.extend(samples[len - 1 - reach..len - 1].iter().rev().map(|&x| x as f64));

    let kernel = kind.kernel(window_len);
    // the kernel is symmetric, so convolution and correlation coincide
    let offset = reach - reach / 2;

    let smoothed = (0..len)
        .map(|i| {
            let start = i + offset;
            padded[start..start + window_len]
                .iter()
                .zip(&kernel)
                .map(|(x, w)| x * w)
                .sum::<f64>() as f32
        })
        .collect();

    Ok(smoothed)
}

/// [`smooth`] with the window named at runtime.
pub fn smooth_named(samples: &[f32], window_len: usize, window: &str) -> Result<Vec<f32>> {
    let kind = window.parse::<WindowKind>()?;
    smooth(samples, window_len, kind)
}

/// Window settings used when a channel signal is smoothed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoothing {
    pub window_len: usize,
    pub kind: WindowKind,
}

impl Smoothing {
    pub fn new(window_len: usize, kind: WindowKind) -> Self {
        Self { window_len, kind }
    }

    pub fn apply(&self, buffer: &SampleBuffer) -> Result<SampleBuffer> {
        let samples = smooth(&buffer.samples, self.window_len, self.kind)?;
        Ok(SampleBuffer::from_samples(samples, buffer.sample_rate))
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            window_len: 30,
            kind: WindowKind::Hanning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_signal(len: usize) -> Vec<f32> {
        (0..len).map(|i| ((i * 7) % 13) as f32).collect()
    }

    #[test]
    fn flat_window_is_a_moving_average() {
        let x = ramp_signal(64);
        let y = smooth(&x, 5, WindowKind::Flat).unwrap();
        assert_eq!(y.len(), x.len());

        for i in 2..62 {
            let expected = x[i - 2..=i + 2].iter().sum::<f32>() / 5.0;
            assert!(
                (y[i] - expected).abs() < 1e-4,
                "index {i}: expected {expected}, got {}",
                y[i]
            );
        }
    }

    #[test]
    fn edges_use_mirrored_samples() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = smooth(&x, 3, WindowKind::Flat).unwrap();
        // left mirror of index 0 is x[1], right mirror of the last is x[4]
        assert!((y[0] - (1.0 + 0.0 + 1.0) / 3.0).abs() < 1e-6);
        assert!((y[5] - (4.0 + 5.0 + 4.0) / 3.0).abs() < 1e-6);
    }

    #[test]
    fn short_windows_return_the_input() {
        let x = ramp_signal(16);
        assert_eq!(smooth(&x, 2, WindowKind::Hanning).unwrap(), x);
        assert_eq!(smooth(&x, 0, WindowKind::Flat).unwrap(), x);
    }

    #[test]
    fn constant_signal_is_preserved() {
        let x = vec![0.75f32; 200];
        for kind in WindowKind::ALL {
            let y = smooth(&x, 30, kind).unwrap();
            assert!(y.iter().all(|&s| (s - 0.75).abs() < 1e-5), "{kind} changed DC level");
        }
    }

    #[test]
    fn smoothing_softens_a_step() {
        let mut x = vec![0.0f32; 100];
        x[50..].fill(1.0);
        let y = smooth(&x, 11, WindowKind::Hanning).unwrap();

        assert!(y[49] > 0.0 && y[49] < 1.0);
        assert!(y[50] > 0.0 && y[50] < 1.0);
        assert!(y[10].abs() < 1e-6);
        assert!((y[90] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            smooth(&[], 5, WindowKind::Flat),
            Err(SynthError::InvalidInput(_))
        ));
        assert!(matches!(
            smooth(&[1.0, 2.0, 3.0], 5, WindowKind::Flat),
            Err(SynthError::InvalidInput(_))
        ));
        assert!(matches!(
            smooth_named(&[1.0; 8], 5, "kaiser"),
            Err(SynthError::UnknownWindow(name)) if name == "kaiser"
        ));
    }

    #[test]
    fn kernels_are_normalized_and_symmetric() {
        for kind in WindowKind::ALL {
            let k = kind.kernel(9);
            assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            for i in 0..9 {
                assert!((k[i] - k[8 - i]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn hanning_coefficients_match_reference() {
        let w = WindowKind::Hanning.coefficients(5);
        let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
        for (a, b) in w.iter().zip(expected) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
