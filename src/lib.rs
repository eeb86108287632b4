//! A path-query engine over nested, JSON-shaped values: scalars, ordered
//! key/value mappings, and ordered sequences.
//!
//! A [`Node`] is a transient typed view over a shared [`RawValue`]. Obtain
//! one with [`Node::wrap`], then navigate with a pre-built ordered sequence
//! of [`PathSegment`]s: exact keys for mappings, `*` wildcards for fan-out,
//! and attribute matchers that select sequence elements whose mapping value
//! is a superset of the matcher. There is no textual path syntax here;
//! parsing the raw data and serializing it back out are likewise left to
//! external collaborators, which speak `serde_json::Value` at the boundary.
//!
//! ## Finding a single value
//!
//! [`Node::find`] resolves deterministic single-target paths. A missing key
//! or matcher is an `Ok(None)` absence, not an error.
//!
//! ```
//! use serde_json::json;
//! use treepath::{Node, NodeError};
//!
//! fn main() -> Result<(), NodeError> {
//!     let node = Node::wrap(json!({"key1": {"key2": "value"}}));
//!
//!     let found = node.find(&["key1".into(), "key2".into()])?;
//!     assert_eq!(found.map(|n| n.to_json()), Some(json!("value")));
//!
//!     assert!(node.find(&["not_there".into()])?.is_none());
//!     Ok(())
//! }
//! ```
//!
//! ## Enumerating, filtering, and mutating
//!
//! [`Node::all`] fans out over wildcards and attribute matchers, flattening
//! results in encounter order. [`Node::delete`] and [`Node::append`] mutate
//! the wrapped structure in place; nodes are views, not snapshots, so the
//! change is visible through every other node over the same subtree.
//!
//! ```
//! use serde_json::json;
//! use treepath::{Node, NodeError, PathSegment};
//!
//! fn main() -> Result<(), NodeError> {
//!     let node = Node::wrap(json!([
//!         {"name": "web", "port": 80},
//!         {"name": "db", "port": 5432}
//!     ]));
//!
//!     let names = node.all(&["*".into(), "name".into()])?;
//!     assert_eq!(
//!         names.iter().map(Node::to_json).collect::<Vec<_>>(),
//!         vec![json!("web"), json!("db")]
//!     );
//!
//!     let removed = node.delete(PathSegment::matching([("name", "db")]))?;
//!     assert_eq!(removed.to_json(), json!({"name": "db", "port": 5432}));
//!     assert_eq!(node.to_json(), json!([{"name": "web", "port": 80}]));
//!     Ok(())
//! }
//! ```
//!
//! Malformed paths surface loudly: traversing into a scalar, handing a
//! fan-out segment to `find`, or deleting a target that does not exist all
//! return a [`NodeError`] rather than degrading silently.

pub mod errors;
pub mod node;
pub mod path;
pub mod value;

pub use errors::NodeError;
pub use errors::NodeErrorType;
pub use node::{MappingNode, Node, ScalarNode, SequenceNode};
pub use path::{Attributes, Path, PathSegment};
pub use value::{RawRef, RawValue, Scalar};
