use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    error::{GraphError, Result},
    graph::signal::{NodeId, NodeKind, Signal},
};

/*
Resolving Composites
====================

Resolution turns a graph that still contains composite nodes into one made
only of primitives the engine knows how to render.

For each composite, bottom-up:

  1. resolve its children
  2. call its render function with the props and resolved children
  3. resolve whatever the render function returned (composites may build
     other composites)

The result is memoized by the composite's id together with its content
hash. The same helper used twice with the same arguments, whether inside one
graph or across successive rebuilds of a patch, expands once. Rebuilding it
over a keyed constant with a new value keeps the id but changes the content
hash, so the helper expands again and the new value reaches the engine.

Memo entries carry the generation of the last `resolve` call that used
them. `collect_garbage` drops entries the latest call did not touch, so a
long-running engine that keeps rebuilding with new parameters does not
accumulate expansions for values it will never see again.

Primitives are rebuilt only when one of their children actually changed;
an already-resolved subtree is returned as the same `Arc`.
*/

/// Maximum nesting of composites inside composites.
pub const MAX_RESOLVE_DEPTH: usize = 64;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    /// Composites served from the memo.
    pub hits: u64,
    /// Composites whose render function ran.
    pub misses: u64,
}

/// Id plus content hash of an unresolved node.
type MemoKey = (NodeId, u64);

#[derive(Debug)]
struct MemoEntry {
    signal: Signal,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Resolver {
    memo: FxHashMap<MemoKey, MemoEntry>,
    /// Unresolved primitives rebuilt during the current call.
    rebuilt: FxHashMap<MemoKey, Signal>,
    generation: u64,
    stats: ResolveStats,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand every composite under `signal` into primitives.
    pub fn resolve(&mut self, signal: &Signal) -> Result<Signal> {
        self.generation += 1;
        self.rebuilt.clear();
        let result = self.resolve_at(signal, 0);
        self.rebuilt.clear();
        result
    }

    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    /// Number of memoized composite expansions.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Drop memo entries not used by the most recent `resolve`.
    pub fn collect_garbage(&mut self) -> usize {
        let before = self.memo.len();
        let generation = self.generation;
        self.memo.retain(|_, entry| entry.generation == generation);
        before - self.memo.len()
    }

    pub fn clear(&mut self) {
        self.memo.clear();
        self.stats = ResolveStats::default();
    }

    fn resolve_at(&mut self, signal: &Signal, depth: usize) -> Result<Signal> {
        if signal.is_resolved() {
            return Ok(signal.clone());
        }

        let id = signal.id();
        let key = (id, signal.content_hash());
        match signal.kind() {
            NodeKind::Composite(composite) => {
                if let Some(entry) = self.memo.get_mut(&key) {
                    entry.generation = self.generation;
                    self.stats.hits += 1;
                    trace!(name = composite.name(), %id, "composite memo hit");
                    return Ok(entry.signal.clone());
                }

                if depth >= MAX_RESOLVE_DEPTH {
                    return Err(GraphError::RecursionLimit {
                        name: composite.name(),
                        limit: MAX_RESOLVE_DEPTH,
                    });
                }

                let children = self.resolve_children(signal, depth + 1)?;
                let expanded = composite.render(&children)?;
                let resolved = self.resolve_at(&expanded, depth + 1)?;

                self.stats.misses += 1;
                trace!(name = composite.name(), %id, "composite expanded");
                self.memo.insert(
                    key,
                    MemoEntry {
                        signal: resolved.clone(),
                        generation: self.generation,
                    },
                );
                Ok(resolved)
            }
            kind => {
                if let Some(done) = self.rebuilt.get(&key) {
                    return Ok(done.clone());
                }

                let children = self.resolve_children(signal, depth)?;
                let rebuilt = Signal::from_parts(kind.clone(), children);
                self.rebuilt.insert(key, rebuilt.clone());
                Ok(rebuilt)
            }
        }
    }

    fn resolve_children(&mut self, signal: &Signal, depth: usize) -> Result<Vec<Signal>> {
        signal
            .children()
            .iter()
            .map(|child| self.resolve_at(child, depth))
            .collect()
    }
}

/// Resolve with a throwaway [`Resolver`].
pub fn resolve(signal: &Signal) -> Result<Signal> {
    Resolver::new().resolve(signal)
}
