use crate::{
    error::Result,
    graph::{
        composite::{create_node, Props},
        primitives::sm,
        Signal,
    },
};

pub const NAME: &str = "saavy::attenuate";

fn render(_props: &Props, children: &[Signal]) -> Result<Signal> {
    let (gain, input) = (&children[0], &children[1]);
    Ok(input * sm(gain))
}

/// Scale `input` by `gain`, smoothed over 20 ms so steps in the gain (for
/// instance a keyed constant updated from a UI) do not click.
pub fn attenuate(gain: impl Into<Signal>, input: impl Into<Signal>) -> Signal {
    create_node(NAME, Props::new(), vec![gain.into(), input.into()], render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::Engine,
        graph::primitives::{constant, keyed_constant},
        EngineConfig,
    };

    #[test]
    fn converges_to_gain_times_input() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine
            .render_graph(&attenuate(0.25, constant(2.0)))
            .unwrap();

        let mut out = vec![0.0f32; 9_600];
        engine.process(&mut out);
        // smoother starts at rest, so the gain fades in
        assert!(out[0] < 0.01);
        assert!((out[9_599] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn gain_change_is_click_free() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine
            .render_graph(&attenuate(keyed_constant("vol", 1.0), constant(1.0)))
            .unwrap();

        let mut out = vec![0.0f32; 9_600];
        engine.process(&mut out);
        assert!(engine.set_const("vol", 0.0));
        engine.process(&mut out);

        let max_step = out
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(0.0f32, f32::max);
        assert!(max_step < 0.01, "max step {max_step}");
        assert!(out[9_599] < 0.01);
    }

    #[test]
    fn resolves_to_primitives() {
        let resolved = crate::graph::resolve(&attenuate(0.5, constant(1.0))).unwrap();
        assert!(resolved.is_resolved());
        assert_eq!(resolved, constant(1.0) * sm(0.5));
    }
}
