//! Terminal UI: oscilloscope, spectrum and patch controls.

pub mod state;
mod spectrum;
mod waveform;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use saavy_compose::Engine;
use tracing::error;

pub use state::Controls;

use super::app::{Patch, GAIN_KEY, GATE_KEY};
use spectrum::{render_spectrum, Spectrum};
use waveform::render_waveform;

/// Samples kept for the scope and FFT
const VIS_BUFFER_SIZE: usize = 2048;

pub struct UiApp {
    audio_rx: Consumer<f32>,
    engine: Arc<Mutex<Engine>>,
    patch: Patch,
    controls: Controls,
    audio_buffer: Vec<f32>,
    spectrum: Spectrum,
    status: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        engine: Arc<Mutex<Engine>>,
        patch: Patch,
        controls: Controls,
        sample_rate: f32,
    ) -> Self {
        Self {
            audio_rx,
            engine,
            patch,
            controls,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: Spectrum::new(VIS_BUFFER_SIZE, sample_rate),
            status: String::new(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        self.spectrum.update(&self.audio_buffer);
    }

    fn handle_key(&mut self, key: KeyCode) -> EyreResult<()> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => {
                self.controls.nudge_gain(0.05);
                self.set_const(GAIN_KEY, self.controls.gain)?;
            }
            KeyCode::Down => {
                self.controls.nudge_gain(-0.05);
                self.set_const(GAIN_KEY, self.controls.gain)?;
            }
            KeyCode::Char(' ') => {
                self.controls.toggle_gate();
                self.set_const(GATE_KEY, self.controls.gate_value())?;
            }
            KeyCode::Right => {
                self.controls.nudge_detune(1.0);
                self.rebuild()?;
            }
            KeyCode::Left => {
                self.controls.nudge_detune(-1.0);
                self.rebuild()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn set_const(&self, key: &str, value: f32) -> EyreResult<()> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| eyre!("audio thread panicked"))?;
        engine.set_const(key, value);
        Ok(())
    }

    /// Rebuild the graph after a structural change (detune is a prop).
    fn rebuild(&mut self) -> EyreResult<()> {
        let graph = self.patch.build(&self.controls);
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| eyre!("audio thread panicked"))?;
        match engine.render_graph(&graph) {
            Ok(()) => {
                let ops = engine.program().map_or(0, |p| p.op_count());
                self.status = format!("rebuilt: {ops} ops");
            }
            Err(err) => {
                error!(%err, "failed to rebuild patch");
                self.status = format!("rebuild failed: {err}");
            }
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Controls
                Constraint::Min(8),    // Waveform
                Constraint::Min(8),    // Spectrum
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let controls = Paragraph::new(format!(
            " gain {:.2}   gate {}   detune {:.0} cents   {}",
            self.controls.gain,
            if self.controls.gate { "on " } else { "off" },
            self.controls.detune_cents,
            self.status,
        ))
        .block(Block::default().title(" Patch ").borders(Borders::ALL));
        frame.render_widget(controls, chunks[0]);

        render_waveform(frame, chunks[1], &self.audio_buffer);
        render_spectrum(frame, chunks[2], &self.spectrum);

        let help = Paragraph::new(" [Q] Quit  [Up/Down] Gain  [Space] Gate  [Left/Right] Detune")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
