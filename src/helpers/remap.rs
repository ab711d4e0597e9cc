use crate::{
    error::{GraphError, Result},
    graph::{
        composite::{create_node, Props},
        Signal,
    },
};

pub const NAME: &str = "saavy::remap";

fn render(props: &Props, children: &[Signal]) -> Result<Signal> {
    let in_lo = props.require(NAME, "in_lo")?;
    let in_hi = props.require(NAME, "in_hi")?;
    let out_lo = props.require(NAME, "out_lo")?;
    let out_hi = props.require(NAME, "out_hi")?;

    let span = in_hi - in_lo;
    if span == 0.0 || !span.is_finite() {
        return Err(GraphError::DegenerateRange {
            lo: in_lo,
            hi: in_hi,
        });
    }

    let scale = (out_hi - out_lo) / span;
    Ok((&children[0] - in_lo) * scale + out_lo)
}

/// Linearly map `x` from `from` onto `to`, without clamping.
///
/// Reversed ranges are fine: `remap(x, (0.0, 1.0), (1.0, 0.0))` inverts a
/// unipolar signal. An empty input range fails at resolve time.
pub fn remap(x: impl Into<Signal>, from: (f32, f32), to: (f32, f32)) -> Signal {
    create_node(
        NAME,
        Props::new()
            .with("in_lo", from.0)
            .with("in_hi", from.1)
            .with("out_lo", to.0)
            .with("out_hi", to.1),
        vec![x.into()],
        render,
    )
}
