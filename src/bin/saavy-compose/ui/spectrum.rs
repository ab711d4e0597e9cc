//! FFT spectrum widget with log-spaced display bins.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const DISPLAY_BINS: usize = 64;
const FLOOR_DB: f64 = -100.0;

pub struct Spectrum {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin index for each display point
    bins: Vec<usize>,
    /// (log10 frequency, dB) per display point
    points: Vec<(f64, f64)>,
    max_log_freq: f64,
}

impl Spectrum {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        let denom = fft_len.saturating_sub(1).max(1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 - 0.5 * (std::f32::consts::TAU * i as f32 / denom).cos())
            .collect();

        let nyquist = (sample_rate as f64 / 2.0).clamp(40.0, 20_000.0);
        let (lo, hi) = (20.0f64.log10(), nyquist.log10());
        let last_bin = (fft_len / 2).saturating_sub(1);

        let mut bins = Vec::with_capacity(DISPLAY_BINS);
        let mut points = Vec::with_capacity(DISPLAY_BINS);
        for i in 0..DISPLAY_BINS {
            let log_freq = lo + (hi - lo) * i as f64 / (DISPLAY_BINS - 1) as f64;
            let freq = 10f64.powf(log_freq);
            let bin = (freq * fft_len as f64 / sample_rate as f64).round() as usize;
            bins.push(bin.min(last_bin));
            points.push((log_freq, FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bins,
            points,
            max_log_freq: hi,
        }
    }

    /// Recompute from the newest `fft_len` samples; shorter input is ignored.
    pub fn update(&mut self, samples: &[f32]) {
        let len = self.window.len();
        if samples.len() < len {
            return;
        }
        let recent = &samples[samples.len() - len..];

        for ((slot, &s), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        // Normalize so a full-scale sine lands near 0 dB
        let norm = 2.0 / len as f32;
        for (point, &bin) in self.points.iter_mut().zip(&self.bins) {
            let magnitude = self.scratch[bin].norm() * norm;
            point.1 = (20.0 * (magnitude.max(1e-6) as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &Spectrum) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum.points());

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([20.0f64.log10(), spectrum.max_log_freq])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0 dB"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
