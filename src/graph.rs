//! Arena of composites that may be shared or form cycles.
//!
//! Owned [`Value`] trees can never refer to themselves, so they are always
//! safe to dump. When a structure needs sharing, build it in a [`Graph`]
//! instead: every composite lives in a slot and is addressed by a [`Handle`],
//! and a sequence or mapping may hold any handle, including its own.
//!
//! Rendering a graph pushes each composite's slot on an in-progress stack, so
//! a composite reachable from itself is reported as [`Error::Cycle`] instead
//! of recursing forever. Shared subtrees that do not loop are fine.
//!
//! ```rust
//! use scdil::{DumpOptions, Error, Graph};
//!
//! let mut graph = Graph::new();
//! let list = graph.sequence();
//! let one = graph.insert(1.into());
//! graph.push(list, one).unwrap();
//! assert_eq!(graph.dump(list, &DumpOptions::machine()).unwrap(), "[1]");
//!
//! graph.push(list, list).unwrap();
//! assert_eq!(graph.dump(list, &DumpOptions::machine()), Err(Error::Cycle));
//! ```

use crate::dump::{self, DumpNode, Shape};
use crate::options::DEFAULT_MAX_DEPTH;
use crate::{DumpOptions, Error, Key, Mapping, Result, Value};
use indexmap::IndexMap;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_GRAPH_ID: AtomicUsize = AtomicUsize::new(0);

/// Reference to a node stored in a [`Graph`].
///
/// Handles are only valid for the graph that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    graph: usize,
    index: usize,
}

impl Handle {
    /// Position of the node in its graph's arena.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Scalar(Value),
    Sequence(Vec<Handle>),
    Mapping(IndexMap<Key, Handle>),
}

/// Arena of nodes addressed by [`Handle`].
#[derive(Debug)]
pub struct Graph {
    id: usize,
    slots: Vec<Slot>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Graph {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
        }
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn alloc(&mut self, slot: Slot) -> Handle {
        self.slots.push(slot);
        Handle {
            graph: self.id,
            index: self.slots.len() - 1,
        }
    }

    /// Copies an owned value into the arena.
    ///
    /// Composites are split into one node per sequence and mapping, so the
    /// returned handle and all its children can be shared afterwards.
    pub fn insert(&mut self, value: Value) -> Handle {
        match value {
            Value::Sequence(items) => {
                let handles = items.into_iter().map(|item| self.insert(item)).collect();
                self.alloc(Slot::Sequence(handles))
            }
            Value::Mapping(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, value)| (key, self.insert(value)))
                    .collect();
                self.alloc(Slot::Mapping(entries))
            }
            scalar => self.alloc(Slot::Scalar(scalar)),
        }
    }

    /// Adds an empty sequence node.
    pub fn sequence(&mut self) -> Handle {
        self.alloc(Slot::Sequence(Vec::new()))
    }

    /// Adds an empty mapping node.
    pub fn mapping(&mut self) -> Handle {
        self.alloc(Slot::Mapping(IndexMap::new()))
    }

    fn slot(&self, handle: Handle) -> Result<&Slot> {
        if handle.graph != self.id {
            return Err(Error::invalid_handle("handle belongs to another graph"));
        }
        self.slots
            .get(handle.index)
            .ok_or_else(|| Error::invalid_handle(format!("no node at index {}", handle.index)))
    }

    fn slot_mut(&mut self, handle: Handle) -> Result<&mut Slot> {
        self.slot(handle)?;
        Ok(&mut self.slots[handle.index])
    }

    /// Appends `item` to the sequence at `seq`.
    pub fn push(&mut self, seq: Handle, item: Handle) -> Result<()> {
        self.slot(item)?;
        match self.slot_mut(seq)? {
            Slot::Sequence(items) => {
                items.push(item);
                Ok(())
            }
            _ => Err(Error::invalid_handle("push target is not a sequence")),
        }
    }

    /// Sets `key` to `value` in the mapping at `map`, returning the previous
    /// handle for that key.
    pub fn insert_entry(
        &mut self,
        map: Handle,
        key: impl Into<Key>,
        value: Handle,
    ) -> Result<Option<Handle>> {
        self.slot(value)?;
        match self.slot_mut(map)? {
            Slot::Mapping(entries) => Ok(entries.insert(key.into(), value)),
            _ => Err(Error::invalid_handle("insert target is not a mapping")),
        }
    }

    /// Rebuilds an owned value from the node at `handle`.
    ///
    /// Shared nodes are copied once per reference. Cycles fail with
    /// [`Error::Cycle`]; nesting beyond the default depth limit fails with
    /// [`Error::DepthLimit`].
    pub fn to_value(&self, handle: Handle) -> Result<Value> {
        let mut stack = Vec::new();
        self.build(handle, &mut stack)
    }

    fn build(&self, handle: Handle, stack: &mut Vec<usize>) -> Result<Value> {
        let value = match self.slot(handle)? {
            Slot::Scalar(value) => return Ok(value.clone()),
            Slot::Sequence(items) => {
                enter(handle, stack)?;
                Value::Sequence(
                    items
                        .iter()
                        .map(|item| self.build(*item, stack))
                        .collect::<Result<_>>()?,
                )
            }
            Slot::Mapping(entries) => {
                enter(handle, stack)?;
                let mut map = Mapping::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), self.build(*value, stack)?);
                }
                Value::Mapping(map)
            }
        };
        stack.pop();
        Ok(value)
    }

    /// Renders the node at `handle` without copying it out of the arena.
    pub fn dump(&self, handle: Handle, options: &DumpOptions) -> Result<String> {
        debug!("dumping graph node {} in {:?} mode", handle.index, options.mode);
        self.slot(handle)?;
        dump::to_string(GraphNode { graph: self, handle }, options)
    }
}

fn enter(handle: Handle, stack: &mut Vec<usize>) -> Result<()> {
    if stack.contains(&handle.index) {
        return Err(Error::Cycle);
    }
    if stack.len() >= DEFAULT_MAX_DEPTH {
        return Err(Error::DepthLimit(DEFAULT_MAX_DEPTH));
    }
    stack.push(handle.index);
    Ok(())
}

#[derive(Clone, Copy)]
struct GraphNode<'a> {
    graph: &'a Graph,
    handle: Handle,
}

impl<'a> GraphNode<'a> {
    fn child(self, handle: Handle) -> Self {
        GraphNode {
            graph: self.graph,
            handle,
        }
    }
}

impl<'a> DumpNode<'a> for GraphNode<'a> {
    fn shape(self) -> Result<Shape<'a, Self>> {
        match self.graph.slot(self.handle)? {
            Slot::Scalar(value) => Shape::of_scalar(value)
                .ok_or_else(|| Error::invalid_handle("scalar slot holds a composite")),
            Slot::Sequence(items) => Ok(Shape::Sequence(
                items.iter().map(|item| self.child(*item)).collect(),
            )),
            Slot::Mapping(entries) => Ok(Shape::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (key, self.child(*value)))
                    .collect(),
            )),
        }
    }

    fn identity(self) -> Option<usize> {
        match self.graph.slots.get(self.handle.index) {
            Some(Slot::Sequence(_)) | Some(Slot::Mapping(_)) => Some(self.handle.index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_round_trips() {
        let value = crate::scdil!({"a": [1, 2], "b": {"c": null}});
        let mut graph = Graph::new();
        let handle = graph.insert(value.clone());
        assert_eq!(graph.to_value(handle).unwrap(), value);
        assert_eq!(graph.len(), 6);
    }

    #[test]
    fn test_shared_node_is_not_a_cycle() {
        let mut graph = Graph::new();
        let shared = graph.insert(crate::scdil!([1]));
        let root = graph.sequence();
        graph.push(root, shared).unwrap();
        graph.push(root, shared).unwrap();

        let options = DumpOptions::machine();
        assert_eq!(graph.dump(root, &options).unwrap(), "[[1],[1]]");
        assert_eq!(graph.to_value(root).unwrap(), crate::scdil!([[1], [1]]));
    }

    #[test]
    fn test_indirect_cycle() {
        let mut graph = Graph::new();
        let outer = graph.mapping();
        let inner = graph.sequence();
        graph.insert_entry(outer, "items", inner).unwrap();
        graph.push(inner, outer).unwrap();

        assert_eq!(graph.dump(outer, &DumpOptions::human()), Err(Error::Cycle));
        assert_eq!(graph.to_value(outer), Err(Error::Cycle));
        assert_eq!(Error::Cycle.category(), crate::Category::Dump);
    }

    #[test]
    fn test_insert_entry_replaces() {
        let mut graph = Graph::new();
        let map = graph.mapping();
        let first = graph.insert(Value::from(1));
        let second = graph.insert(Value::from(2));
        assert_eq!(graph.insert_entry(map, "k", first).unwrap(), None);
        assert_eq!(graph.insert_entry(map, "k", second).unwrap(), Some(first));
        assert_eq!(graph.dump(map, &DumpOptions::human()).unwrap(), "k: 2\n");
    }

    #[test]
    fn test_invalid_handles() {
        let mut graph = Graph::new();
        let scalar = graph.insert(Value::Null);
        let seq = graph.sequence();
        assert!(matches!(graph.push(scalar, seq), Err(Error::InvalidHandle(_))));
        assert!(matches!(
            graph.insert_entry(seq, "k", scalar),
            Err(Error::InvalidHandle(_))
        ));

        let other = Graph::new().sequence();
        assert!(matches!(graph.push(seq, other), Err(Error::InvalidHandle(_))));
        assert!(matches!(graph.to_value(other), Err(Error::InvalidHandle(_))));
    }

    #[test]
    fn test_deep_chain_hits_depth_limit() {
        let mut graph = Graph::new();
        let root = graph.sequence();
        let mut current = root;
        for _ in 0..DEFAULT_MAX_DEPTH {
            let next = graph.sequence();
            graph.push(current, next).unwrap();
            current = next;
        }
        assert_eq!(
            graph.to_value(root),
            Err(Error::DepthLimit(DEFAULT_MAX_DEPTH))
        );
    }
}
