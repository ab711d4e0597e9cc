use std::f32::consts::TAU;

use crate::{
    error::Result,
    graph::{
        composite::{create_node, Props},
        primitives::{clamp, cos},
        Signal,
    },
    helpers::progress::progress,
};

/*
Clipped Hann Window
===================

    hann(t) = 0.5 − 0.5 · cos(2π · t),   t ∈ [0, 1]

      1.0 |        ****
          |      **    **
      0.5 |    **        **
          |  **            **
      0.0 |**________________**____
          0      0.5       1

The raw formula is periodic: feed it t = 1.5 and it rises again. Clamping
`t` to [0, 1] first means the window opens once and then stays shut, which is
what a one-shot grain envelope driven by a progress ramp needs. Anything at
or beyond either end reads 0.
*/

pub const NAME: &str = "saavy::clipped_hann";
pub const GRAIN_NAME: &str = "saavy::grain_window";

fn render(_props: &Props, children: &[Signal]) -> Result<Signal> {
    let t = clamp(&children[0], 0.0, 1.0);
    Ok(0.5 - 0.5 * cos(TAU * t))
}

/// Hann window of `t` with `t` clamped to [0, 1].
pub fn clipped_hann(t: impl Into<Signal>) -> Signal {
    create_node(NAME, Props::new(), vec![t.into()], render)
}

fn render_grain(props: &Props, children: &[Signal]) -> Result<Signal> {
    let seconds = props.require(GRAIN_NAME, "seconds")?;
    Ok(clipped_hann(progress(&children[0], seconds)))
}

/// One Hann-shaped swell lasting `seconds` each time `gate` goes high.
pub fn grain_window(gate: impl Into<Signal>, seconds: f32) -> Signal {
    create_node(
        GRAIN_NAME,
        Props::new().with("seconds", seconds),
        vec![gate.into()],
        render_grain,
    )
}
