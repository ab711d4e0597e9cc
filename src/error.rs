//! Error type shared by graph construction, resolution and rendering.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("composite `{node}` is missing prop `{prop}`")]
    MissingProp { node: &'static str, prop: String },

    #[error("composite `{node}` has invalid prop `{prop}` = {value}")]
    InvalidProp {
        node: &'static str,
        prop: &'static str,
        value: f32,
    },

    #[error("cannot remap from a degenerate range [{lo}, {hi}]")]
    DegenerateRange { lo: f32, hi: f32 },

    #[error("composite `{name}` exceeded the resolve depth limit of {limit}")]
    RecursionLimit { name: &'static str, limit: usize },

    #[error("composite `{name}` reached the engine unresolved")]
    UnresolvedComposite { name: &'static str },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
