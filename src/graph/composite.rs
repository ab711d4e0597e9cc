//! Named, memoized subgraphs.
//!
//! A composite node records *how* to build a piece of graph (a render
//! function, its props and its children) without building it. The resolver
//! later calls the render function once per distinct composite and caches
//! the result by the composite's structural id.

use std::{collections::BTreeMap, fmt, hash::Hash, sync::Arc};

use rustc_hash::FxHasher;

use crate::{
    error::{GraphError, Result},
    graph::signal::{hash_f32, NodeKind, Signal},
};

/// Expands a composite into a graph, given its props and resolved children.
pub type RenderFn = fn(&Props, &[Signal]) -> Result<Signal>;

/// Numeric properties of a composite node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    values: BTreeMap<&'static str, f32>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: f32) -> Self {
        self.values.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// Fetch a prop, naming the owning node in the error.
    pub fn require(&self, node: &'static str, name: &str) -> Result<f32> {
        self.get(name).ok_or_else(|| GraphError::MissingProp {
            node,
            prop: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Clone)]
pub struct Composite {
    name: &'static str,
    key: Option<Arc<str>>,
    props: Props,
    render: RenderFn,
}

impl Composite {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn render(&self, children: &[Signal]) -> Result<Signal> {
        (self.render)(&self.props, children)
    }

    pub(crate) fn hash_into(&self, h: &mut FxHasher) {
        self.name.hash(h);
        self.key.hash(h);
        self.props.len().hash(h);
        for (name, value) in self.props.iter() {
            name.hash(h);
            hash_f32(value, h);
        }
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// Build a composite node.
///
/// `render` runs at resolve time with `props` and the resolved `children`.
/// Composites with equal name, props and children share one expansion.
///
/// # Example
/// ```
/// use saavy_compose::graph::{composite::{create_node, Props}, primitives::phasor, Signal};
/// use saavy_compose::Result;
///
/// fn double(_props: &Props, children: &[Signal]) -> Result<Signal> {
///     Ok(&children[0] * 2.0)
/// }
///
/// let twice = create_node("double", Props::new(), vec![phasor(1.0)], double);
/// assert!(!twice.is_resolved());
/// ```
pub fn create_node(
    name: &'static str,
    props: Props,
    children: Vec<Signal>,
    render: RenderFn,
) -> Signal {
    build(name, None, props, children, render)
}

/// Like [`create_node`], with an explicit key folded into the node's identity.
pub fn create_keyed_node(
    name: &'static str,
    key: impl Into<Arc<str>>,
    props: Props,
    children: Vec<Signal>,
    render: RenderFn,
) -> Signal {
    build(name, Some(key.into()), props, children, render)
}

fn build(
    name: &'static str,
    key: Option<Arc<str>>,
    props: Props,
    children: Vec<Signal>,
    render: RenderFn,
) -> Signal {
    Signal::from_parts(
        NodeKind::Composite(Composite {
            name,
            key,
            props,
            render,
        }),
        children,
    )
}
