/// Render a few seconds of a helper-built patch to a 16-bit WAV file.
///
/// Run with: cargo run --example offline_bounce -- out.wav
use saavy_compose::{
    engine::render_offline,
    graph::primitives::{constant, phasor},
    helpers::{attenuate, detuned_saw, grain_window, remap},
    EngineConfig,
};

const SECONDS: f32 = 3.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "bounce.wav".to_string());

    let config = EngineConfig::default();
    let pitch = remap(phasor(1.0 / SECONDS), (0.0, 1.0), (110.0, 165.0));
    let patch = attenuate(
        0.5,
        detuned_saw(pitch, 15.0) * grain_window(constant(1.0), SECONDS),
    );

    let frames = (SECONDS * config.sample_rate) as usize;
    let samples = render_offline(&patch, config, frames)?;

    let wav_spec = hound::WavSpec {
        channels: 1,
        sample_rate: config.sample_rate as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, wav_spec)?;
    for s in samples {
        writer.write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    println!("Wrote {frames} frames to {path}");
    Ok(())
}
