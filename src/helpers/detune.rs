use crate::{
    error::Result,
    graph::{
        composite::{create_node, Props},
        primitives::saw,
        Signal,
    },
};

/*
Detuned Saw Pair
================

Two sawtooth oscillators a few cents apart beat against each other. The
phase relationship drifts at the difference frequency, so the combined
waveform keeps changing shape: the classic "thick" supersaw/reese sound.

    up   = freq · 2^(+cents / 1200)
    down = freq · 2^(−cents / 1200)
    out  = (saw(up) + saw(down)) / 2

100 cents = 1 semitone. Typical values:

    ±3–8 cents     subtle chorus-like width
    ±10–20 cents   obvious detune, trance leads
    ±25–50 cents   sour, "out of tune" on purpose

The pair is averaged rather than summed, so the output stays in [-1, 1].
*/

pub const NAME: &str = "saavy::detuned_saw";

fn render(props: &Props, children: &[Signal]) -> Result<Signal> {
    let cents = props.require(NAME, "cents")?;
    let ratio = 2.0_f32.powf(cents / 1200.0);
    let freq = &children[0];

    Ok((saw(freq * ratio) + saw(freq / ratio)) * 0.5)
}

/// Average of two band-limited saws detuned by ±`cents` around `freq`.
pub fn detuned_saw(freq: impl Into<Signal>, cents: f32) -> Signal {
    create_node(
        NAME,
        Props::new().with("cents", cents),
        vec![freq.into()],
        render,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::render_offline, EngineConfig};

    #[test]
    fn stays_in_range() {
        let config = EngineConfig::default();
        let out = render_offline(&detuned_saw(220.0, 15.0), config, 9_600).unwrap();
        assert!(out.iter().all(|s| s.abs() <= 1.0 + 1e-4));
        assert!(out.iter().any(|s| s.abs() > 0.5));
    }

    #[test]
    fn zero_detune_is_a_single_saw() {
        let config = EngineConfig::default();
        let pair = render_offline(&detuned_saw(220.0, 0.0), config, 512).unwrap();
        let single = render_offline(&saw(220.0), config, 512).unwrap();
        for (a, b) in pair.iter().zip(&single) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn detune_beats() {
        // ±50 cents at 440 Hz beats at ~25 Hz: the pair's peak amplitude
        // dips well below a single saw's somewhere in a 100 ms window
        let config = EngineConfig::default();
        let out = render_offline(&detuned_saw(440.0, 50.0), config, 4_800).unwrap();
        let quietest_cycle = out
            .chunks_exact(109)
            .map(|cycle| cycle.iter().fold(0.0f32, |acc, s| acc.max(s.abs())))
            .fold(f32::MAX, f32::min);
        assert!(quietest_cycle < 0.8, "quietest cycle peak {quietest_cycle}");
    }

    #[test]
    fn equal_arguments_share_identity() {
        assert_eq!(detuned_saw(110.0, 7.0), detuned_saw(110.0, 7.0));
        assert_ne!(detuned_saw(110.0, 7.0), detuned_saw(110.0, 8.0));
    }
}
