use crate::{
    error::{GraphError, Result},
    graph::{
        composite::{create_node, Props},
        primitives::{counter, min, sample_rate},
        Signal,
    },
};

/*
Progress Ramp
=============

    progress = min(1, counter(gate) / (seconds · sr))

While the gate is held the counter climbs one step per sample, so the ratio
rises linearly from 0 and reaches 1 after `seconds`. It then holds at 1 until
the gate falls, which resets the counter and the ramp to 0.

This is the time base for one-shot shapes: feed it to a window, a lookup, or
a remap to get an envelope that lasts exactly `seconds` regardless of the
sample rate.
*/

pub const NAME: &str = "saavy::progress";

fn render(props: &Props, children: &[Signal]) -> Result<Signal> {
    let seconds = props.require(NAME, "seconds")?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(GraphError::InvalidProp {
            node: NAME,
            prop: "seconds",
            value: seconds,
        });
    }

    let samples = seconds * sample_rate();
    Ok(min(1.0, counter(&children[0]) / samples))
}

/// 0 → 1 ramp over `seconds` while `gate` is high; 0 while it is low.
pub fn progress(gate: impl Into<Signal>, seconds: f32) -> Signal {
    create_node(
        NAME,
        Props::new().with("seconds", seconds),
        vec![gate.into()],
        render,
    )
}
