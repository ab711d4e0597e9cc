//! Renders signal graphs.
//!
//! The [`Engine`] owns a persistent [`Resolver`] and the currently installed
//! [`Program`]. Installing a new graph resolves it, compiles it, and carries
//! running state over from the previous program for every node that survived
//! the rebuild, so replacing a patch does not restart its oscillators.
//!
//! ```
//! use saavy_compose::{engine::Engine, graph::primitives::saw, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default())?;
//! engine.render_graph(&(saw(220.0) * 0.5))?;
//!
//! let mut block = [0.0f32; 256];
//! engine.process(&mut block);
//! assert!(block.iter().all(|s| s.abs() <= 0.5 + 1e-4));
//! # Ok::<(), saavy_compose::GraphError>(())
//! ```

mod program;

pub use program::Program;

use tracing::{debug, warn};

use crate::{
    config::EngineConfig,
    error::Result,
    graph::{
        resolve::{ResolveStats, Resolver},
        Signal,
    },
};

pub struct Engine {
    config: EngineConfig,
    resolver: Resolver,
    program: Option<Program>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            resolver: Resolver::new(),
            program: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve, compile and install `root` as the engine's output.
    ///
    /// On error the previously installed graph keeps playing.
    pub fn render_graph(&mut self, root: &Signal) -> Result<()> {
        let resolved = self.resolver.resolve(root)?;
        let collected = self.resolver.collect_garbage();

        let mut program = Program::compile(&resolved, &self.config)?;
        let adopted = match &self.program {
            Some(previous) => program.adopt_state(previous),
            None => 0,
        };

        debug!(
            ops = program.op_count(),
            stateful = program.stateful_op_count(),
            adopted,
            memo = self.resolver.memo_len(),
            collected,
            "installed graph"
        );

        self.program = Some(program);
        Ok(())
    }

    /// Fill `out` with the next frames of the installed graph, or silence.
    pub fn process(&mut self, out: &mut [f32]) {
        match &mut self.program {
            Some(program) => program.process(out),
            None => out.fill(0.0),
        }
    }

    /// Change a keyed constant without rebuilding the graph.
    pub fn set_const(&mut self, key: &str, value: f32) -> bool {
        let found = self
            .program
            .as_mut()
            .is_some_and(|program| program.set_const(key, value));
        if !found {
            warn!(key, "no keyed constant to update");
        }
        found
    }

    /// Zero the state of every op (phases, smoothers, counters).
    pub fn reset(&mut self) {
        if let Some(program) = &mut self.program {
            program.reset();
        }
    }

    /// Drop the installed graph; the engine outputs silence afterwards.
    pub fn clear(&mut self) {
        self.program = None;
        self.resolver.clear();
    }

    pub fn has_graph(&self) -> bool {
        self.program.is_some()
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn resolver_stats(&self) -> ResolveStats {
        self.resolver.stats()
    }
}

/// Render `frames` samples of `root` from a fresh engine.
pub fn render_offline(root: &Signal, config: EngineConfig, frames: usize) -> Result<Vec<f32>> {
    let mut engine = Engine::new(config)?;
    engine.render_graph(root)?;
    let mut out = vec![0.0; frames];
    engine.process(&mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GraphError,
        graph::primitives::{counter, keyed_constant, phasor, saw, sm},
    };

    #[test]
    fn silent_without_graph() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut out = [1.0f32; 64];
        engine.process(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert!(!engine.has_graph());
        assert!(!engine.set_const("anything", 1.0));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EngineConfig::default().with_sample_rate(0.0);
        assert!(matches!(
            Engine::new(config),
            Err(GraphError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rebuild_preserves_counter_state() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.render_graph(&counter(1.0)).unwrap();
        let mut out = [0.0f32; 100];
        engine.process(&mut out);

        engine.render_graph(&(counter(1.0) * 2.0)).unwrap();
        let mut next = [0.0f32; 1];
        engine.process(&mut next);
        assert_eq!(next[0], 200.0);
    }

    #[test]
    fn unrelated_rebuild_starts_fresh() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.render_graph(&counter(1.0)).unwrap();
        let mut out = [0.0f32; 100];
        engine.process(&mut out);

        engine.render_graph(&counter(0.9)).unwrap();
        let mut next = [0.0f32; 1];
        engine.process(&mut next);
        assert_eq!(next[0], 0.0);
    }

    #[test]
    fn keyed_constant_glides_through_smoother() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.render_graph(&sm(keyed_constant("level", 0.0))).unwrap();

        let mut out = vec![0.0f32; 4800];
        engine.process(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));

        assert!(engine.set_const("level", 1.0));
        engine.process(&mut out);
        // no jump on the first sample, close to the target after 5 tau
        assert!(out[0] < 0.01);
        assert!(out[4799] > 0.99);
        assert!(out.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn failed_rebuild_keeps_previous_graph() {
        use crate::graph::composite::{create_node, Props};
        fn broken(props: &Props, _: &[Signal]) -> Result<Signal> {
            props.require("broken", "missing").map(Signal::from)
        }

        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.render_graph(&phasor(1_000.0)).unwrap();
        let bad = create_node("broken", Props::new(), vec![], broken);
        assert!(engine.render_graph(&bad).is_err());
        assert!(engine.has_graph());

        let mut out = [0.0f32; 8];
        engine.process(&mut out);
        assert!(out.iter().any(|&s| s > 0.0));
    }

    #[test]
    fn render_offline_matches_engine() {
        let config = EngineConfig::default();
        let a = render_offline(&saw(330.0), config, 300).unwrap();
        let mut engine = Engine::new(config).unwrap();
        engine.render_graph(&saw(330.0)).unwrap();
        let mut b = vec![0.0; 300];
        engine.process(&mut b);
        assert_eq!(a, b);
    }
}
