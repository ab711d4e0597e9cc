//! Signal graph construction.
//!
//! Graphs are built from immutable, structurally hashed [`Signal`] handles.
//! `primitives` holds the node kinds the engine renders directly;
//! `composite` wraps a render function into a named node that `resolve`
//! expands (once per distinct node) into primitives.

/// Named, memoized subgraphs.
pub mod composite;
/// Fluent combinators (`.amplify()`, `.clamp()`, `.sm()`).
pub mod extensions;
/// Constructors for primitive nodes.
pub mod primitives;
/// Composite expansion with memoization.
pub mod resolve;
/// Signal handles and node kinds.
pub mod signal;

pub use composite::{create_keyed_node, create_node, Props};
pub use extensions::SignalExt;
pub use resolve::{resolve, Resolver};
pub use signal::{BinaryOp, NodeId, NodeKind, Signal, UnaryOp};
