//! Scope - patch builder and audio runner

use std::sync::{Arc, Mutex};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;
use saavy_compose::{
    graph::primitives::{keyed_constant, phasor},
    helpers::{attenuate, clipped_hann, detuned_saw, grain_window, remap},
    Engine, EngineConfig, Signal, MAX_BLOCK_SIZE,
};
use tracing::{error, info};

use super::ui::{Controls, UiApp};

pub const GAIN_KEY: &str = "scope:gain";
pub const GATE_KEY: &str = "scope:gate";

/// Scope ring buffer capacity (~1 s at 48 kHz)
const SCOPE_CAPACITY: usize = 48_000;

/// Fixed shape of the demo patch; live values live in [`Controls`].
#[derive(Clone, Copy, Debug)]
pub struct Patch {
    pub frequency: f32,
    pub vibrato_rate: f32,
    pub vibrato_depth: f32,
    pub grain_seconds: f32,
}

impl Patch {
    /// Detuned saws with a slow Hann-shaped pitch swell, enveloped by a grain
    /// window on the gate, through a smoothed gain stage.
    pub fn build(&self, controls: &Controls) -> Signal {
        let swell = clipped_hann(phasor(self.vibrato_rate));
        let pitch = remap(
            swell,
            (0.0, 1.0),
            (self.frequency, self.frequency * (1.0 + self.vibrato_depth)),
        );
        let voice = detuned_saw(pitch, controls.detune_cents);
        let envelope = grain_window(
            keyed_constant(GATE_KEY, controls.gate_value()),
            self.grain_seconds,
        );

        attenuate(keyed_constant(GAIN_KEY, controls.gain), voice * envelope)
    }
}

/// Main application builder
pub struct Scope {
    patch: Patch,
    gain: f32,
    detune_cents: f32,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            patch: Patch {
                frequency: 110.0,
                vibrato_rate: 0.25,
                vibrato_depth: 0.02,
                grain_seconds: 2.0,
            },
            gain: 0.3,
            detune_cents: 12.0,
        }
    }

    pub fn frequency(mut self, hz: f32) -> Self {
        self.patch.frequency = hz;
        self
    }

    pub fn detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }

    pub fn gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    pub fn grain_seconds(mut self, seconds: f32) -> Self {
        self.patch.grain_seconds = seconds;
        self
    }

    /// Open the default output device, start the patch and run the UI until quit.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(sample_rate, channels, "opened output device");

        let engine_config = EngineConfig::default().with_sample_rate(sample_rate);
        let mut engine = Engine::new(engine_config).wrap_err("invalid engine config")?;

        let controls = Controls::new(self.gain, self.detune_cents);
        engine
            .render_graph(&self.patch.build(&controls))
            .wrap_err("failed to build patch")?;

        let engine = Arc::new(Mutex::new(engine));
        let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_CAPACITY);

        let audio_engine = engine.clone();
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let Ok(mut engine) = audio_engine.lock() else {
                    data.fill(0.0);
                    return;
                };

                for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let block = &mut render_buf[..frames.len() / channels];
                    engine.process(block);

                    // Mono to all channels
                    for (frame, &s) in frames.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(s);
                        // Scope drops samples when the UI falls behind
                        let _ = scope_tx.push(s);
                    }
                }
            },
            |err| error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(scope_rx, engine, self.patch, controls, sample_rate)
            .run(&mut terminal);
        ratatui::restore();
        result
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
