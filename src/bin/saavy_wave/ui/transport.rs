//! Transport line: what is playing, where, and how loud

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::NowPlaying;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    now_playing: &NowPlaying,
    position: f64,
    is_playing: bool,
    stats: &AudioStats,
) {
    let block = Block::default().title(" saavy-wave ").borders(Borders::ALL);

    let (symbol, state, state_color) = if is_playing {
        ("▶", "Looping", Color::Green)
    } else {
        ("■", "Stopped", Color::Yellow)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", now_playing.mode, now_playing.shape),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", symbol, state),
            Style::default().fg(state_color),
        ),
        Span::styled(
            format!("ch {}  {:.2}s / {:.2}s  ", now_playing.channel, position, now_playing.seconds),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "{:.1}kHz -> {:.1}kHz  ",
                now_playing.sample_rate as f32 / 1000.0,
                now_playing.device_rate as f32 / 1000.0
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
