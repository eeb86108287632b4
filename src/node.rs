//! Typed views over a shared [`RawValue`] tree.
//!
//! A [`Node`] is classified from the shape of the value it wraps: scalar
//! leaves, ordered mappings, and ordered sequences each get their own view
//! type with its own traversal and mutation rules. [`Node::wrap`] is the one
//! construction entry point; recursive traversal re-wraps children through
//! it, so no other code decides what kind of node a value becomes.
//!
//! Nodes never copy the data they wrap. `delete` and `append` mutate the
//! underlying value in place, and the change is visible through every other
//! node or [`RawRef`] over the same subtree.

use std::cell::{Ref, RefMut};
use std::rc::Rc;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::errors::NodeError;
use crate::path::PathSegment;
use crate::value::{RawRef, RawValue};

#[derive(Debug, Clone)]
pub enum Node {
    Scalar(ScalarNode),
    Mapping(MappingNode),
    Sequence(SequenceNode),
}

impl Node {
    /// Wraps a raw value, a shared handle, a JSON document, or an existing
    /// node. An existing node passes through unchanged.
    pub fn wrap(value: impl Into<Node>) -> Node {
        value.into()
    }

    /// The live underlying value. Cloning the handle bumps a reference
    /// count; the data itself is never copied.
    pub fn raw(&self) -> RawRef {
        match self {
            Node::Scalar(node) => node.raw(),
            Node::Mapping(node) => node.raw(),
            Node::Sequence(node) => node.raw(),
        }
    }

    /// Serializes the current state of the underlying value.
    pub fn to_json(&self) -> serde_json::Value {
        self.raw().borrow().to_json()
    }

    /// Resolves a deterministic single-target path. `Ok(None)` is the
    /// documented "not found" outcome; fan-out segments are an error here,
    /// use [`Node::all`] for those.
    pub fn find(&self, path: &[PathSegment]) -> Result<Option<Node>, NodeError> {
        match self {
            Node::Scalar(node) => node.find(path),
            Node::Mapping(node) => node.find(path),
            Node::Sequence(node) => node.find(path),
        }
    }

    /// Collects every node the path reaches, in encounter order.
    pub fn all(&self, path: &[PathSegment]) -> Result<Vec<Node>, NodeError> {
        match self {
            Node::Scalar(node) => node.all(path),
            Node::Mapping(node) => node.all(path),
            Node::Sequence(node) => node.all(path),
        }
    }

    /// Removes the targeted child in place and returns a node over the
    /// removed value. The target must exist.
    pub fn delete(&self, target: impl Into<PathSegment>) -> Result<Node, NodeError> {
        let target = target.into();
        match self {
            Node::Scalar(node) => node.delete(&target),
            Node::Mapping(node) => node.delete(&target),
            Node::Sequence(node) => node.delete(&target),
        }
    }

    /// Adds `value` to the wrapped container in place and returns a node
    /// over the whole container after mutation.
    pub fn append(&self, value: impl Into<RawValue>) -> Result<Node, NodeError> {
        let value = value.into();
        match self {
            Node::Scalar(node) => node.append(value),
            Node::Mapping(node) => node.append(value),
            Node::Sequence(node) => node.append(value),
        }
    }
}

impl From<RawRef> for Node {
    fn from(raw: RawRef) -> Node {
        let node = match &*raw.borrow() {
            RawValue::Mapping(_) => Node::Mapping(MappingNode {
                raw: Rc::clone(&raw),
            }),
            RawValue::Sequence(_) => Node::Sequence(SequenceNode {
                raw: Rc::clone(&raw),
            }),
            RawValue::Scalar(_) => Node::Scalar(ScalarNode {
                raw: Rc::clone(&raw),
            }),
        };
        node
    }
}

impl From<RawValue> for Node {
    fn from(value: RawValue) -> Node {
        Node::from(value.shared())
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Node {
        Node::from(RawValue::from_json(value))
    }
}

/// A leaf. Terminal values have no children to traverse into and cannot be
/// mutated through a node.
#[derive(Debug, Clone)]
pub struct ScalarNode {
    raw: RawRef,
}

impl ScalarNode {
    pub fn raw(&self) -> RawRef {
        Rc::clone(&self.raw)
    }

    pub fn find(&self, path: &[PathSegment]) -> Result<Option<Node>, NodeError> {
        match path.first() {
            None => Ok(Some(Node::Scalar(self.clone()))),
            Some(segment) => Err(NodeError::unsupported(format!(
                "cannot traverse into a scalar value with segment {segment}"
            ))),
        }
    }

    pub fn all(&self, path: &[PathSegment]) -> Result<Vec<Node>, NodeError> {
        match path.first() {
            None => Ok(vec![Node::Scalar(self.clone())]),
            Some(segment) => Err(NodeError::unsupported(format!(
                "cannot traverse into a scalar value with segment {segment}"
            ))),
        }
    }

    pub fn delete(&self, target: &PathSegment) -> Result<Node, NodeError> {
        Err(NodeError::unsupported(format!(
            "cannot delete {target} from a scalar value"
        )))
    }

    pub fn append(&self, _value: RawValue) -> Result<Node, NodeError> {
        Err(NodeError::unsupported(
            "cannot append to a scalar value".to_string(),
        ))
    }
}

/// A view over an ordered string-keyed mapping.
#[derive(Debug, Clone)]
pub struct MappingNode {
    raw: RawRef,
}

impl MappingNode {
    pub fn raw(&self) -> RawRef {
        Rc::clone(&self.raw)
    }

    // Constructed only by the factory over a mapping value.
    fn entries(&self) -> Ref<'_, IndexMap<String, RawRef>> {
        Ref::map(self.raw.borrow(), |raw| match raw {
            RawValue::Mapping(entries) => entries,
            _ => unreachable!("mapping node wraps a mapping value"),
        })
    }

    fn entries_mut(&self) -> RefMut<'_, IndexMap<String, RawRef>> {
        RefMut::map(self.raw.borrow_mut(), |raw| match raw {
            RawValue::Mapping(entries) => entries,
            _ => unreachable!("mapping node wraps a mapping value"),
        })
    }

    pub fn find(&self, path: &[PathSegment]) -> Result<Option<Node>, NodeError> {
        let Some((segment, rest)) = path.split_first() else {
            return Ok(Some(Node::Mapping(self.clone())));
        };

        match segment {
            PathSegment::Key(key) => {
                let child = self.entries().get(key).map(Rc::clone);
                match child {
                    Some(child) => Node::wrap(child).find(rest),
                    None => Ok(None),
                }
            }
            // find resolves deterministic single-target paths only
            _ => Err(NodeError::unsupported(format!(
                "segment {segment} does not identify a single entry of a mapping"
            ))),
        }
    }

    pub fn all(&self, path: &[PathSegment]) -> Result<Vec<Node>, NodeError> {
        let Some((segment, rest)) = path.split_first() else {
            return Ok(vec![Node::Mapping(self.clone())]);
        };

        match segment {
            PathSegment::Key(key) => {
                let child = self.entries().get(key).map(Rc::clone);
                match child {
                    Some(child) => Node::wrap(child).all(rest),
                    None => Ok(Vec::new()),
                }
            }
            PathSegment::Wildcard => {
                let children: Vec<RawRef> = self.entries().values().map(Rc::clone).collect();
                children
                    .into_iter()
                    .map(|child| Node::wrap(child).all(rest))
                    .flatten_ok()
                    .collect()
            }
            PathSegment::Match(_) => Err(NodeError::unsupported(format!(
                "attribute matcher {segment} selects sequence elements, not mapping entries"
            ))),
        }
    }

    /// Removes the entry for the given key and returns a node over the
    /// removed value. The order of the remaining entries is preserved.
    pub fn delete(&self, target: &PathSegment) -> Result<Node, NodeError> {
        let PathSegment::Key(key) = target else {
            return Err(NodeError::unsupported(format!(
                "mapping entries are deleted by key, not {target}"
            )));
        };

        let removed = self.entries_mut().shift_remove(key);
        match removed {
            Some(child) => Ok(Node::wrap(child)),
            None => Err(NodeError::missing(format!("no entry for key '{key}'"))),
        }
    }

    /// Merges a single-entry mapping into the wrapped mapping: a new key is
    /// appended at the end, an existing key is overwritten in place.
    pub fn append(&self, value: RawValue) -> Result<Node, NodeError> {
        let RawValue::Mapping(mut pairs) = value else {
            return Err(NodeError::invalid(
                "mapping append expects a single-entry mapping".to_string(),
            ));
        };

        let (key, child) = match pairs.pop() {
            Some(entry) if pairs.is_empty() => entry,
            _ => {
                return Err(NodeError::invalid(
                    "mapping append expects exactly one key/value entry".to_string(),
                ))
            }
        };

        self.entries_mut().insert(key, child);
        Ok(Node::Mapping(self.clone()))
    }
}

/// A view over an ordered sequence. Elements are reached index-free, by
/// wildcard or by attribute matching.
#[derive(Debug, Clone)]
pub struct SequenceNode {
    raw: RawRef,
}

impl SequenceNode {
    pub fn raw(&self) -> RawRef {
        Rc::clone(&self.raw)
    }

    // Constructed only by the factory over a sequence value.
    fn elements(&self) -> Ref<'_, Vec<RawRef>> {
        Ref::map(self.raw.borrow(), |raw| match raw {
            RawValue::Sequence(elements) => elements,
            _ => unreachable!("sequence node wraps a sequence value"),
        })
    }

    fn elements_mut(&self) -> RefMut<'_, Vec<RawRef>> {
        RefMut::map(self.raw.borrow_mut(), |raw| match raw {
            RawValue::Sequence(elements) => elements,
            _ => unreachable!("sequence node wraps a sequence value"),
        })
    }

    pub fn find(&self, path: &[PathSegment]) -> Result<Option<Node>, NodeError> {
        let Some((segment, rest)) = path.split_first() else {
            return Ok(Some(Node::Sequence(self.clone())));
        };

        match segment {
            PathSegment::Match(attrs) => {
                let matched = self
                    .elements()
                    .iter()
                    .find(|element| element.borrow().matches(attrs))
                    .map(Rc::clone);
                match matched {
                    Some(element) => Node::wrap(element).find(rest),
                    None => Ok(None),
                }
            }
            _ => Err(NodeError::unsupported(format!(
                "segment {segment} does not identify a single element of a sequence"
            ))),
        }
    }

    pub fn all(&self, path: &[PathSegment]) -> Result<Vec<Node>, NodeError> {
        let Some((segment, rest)) = path.split_first() else {
            return Ok(vec![Node::Sequence(self.clone())]);
        };

        match segment {
            PathSegment::Wildcard => {
                let elements: Vec<RawRef> = self.elements().iter().map(Rc::clone).collect();
                elements
                    .into_iter()
                    .map(|element| Node::wrap(element).all(rest))
                    .flatten_ok()
                    .collect()
            }
            PathSegment::Match(attrs) => {
                // with an empty rest this is terminal filtering
                let matched: Vec<RawRef> = self
                    .elements()
                    .iter()
                    .filter(|element| element.borrow().matches(attrs))
                    .map(Rc::clone)
                    .collect();
                matched
                    .into_iter()
                    .map(|element| Node::wrap(element).all(rest))
                    .flatten_ok()
                    .collect()
            }
            PathSegment::Key(_) => Err(NodeError::unsupported(format!(
                "sequence elements are selected by wildcard or attribute matcher, not {segment}"
            ))),
        }
    }

    /// Removes the first element matching the attribute matcher and returns
    /// a node over it.
    pub fn delete(&self, target: &PathSegment) -> Result<Node, NodeError> {
        let PathSegment::Match(attrs) = target else {
            return Err(NodeError::unsupported(format!(
                "sequence elements are deleted by attribute matcher, not {target}"
            )));
        };

        let mut elements = self.elements_mut();
        let position = elements
            .iter()
            .position(|element| element.borrow().matches(attrs));
        match position {
            Some(index) => Ok(Node::wrap(elements.remove(index))),
            None => Err(NodeError::missing(format!("no element matching {target}"))),
        }
    }

    /// Pushes a new element onto the tail of the sequence.
    pub fn append(&self, value: RawValue) -> Result<Node, NodeError> {
        self.elements_mut().push(value.shared());
        Ok(Node::Sequence(self.clone()))
    }
}
