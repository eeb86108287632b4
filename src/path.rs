//! Path segments used to navigate a [`RawValue`](crate::value::RawValue)
//! tree. Paths arrive pre-built as ordered segment sequences; there is no
//! textual syntax to parse. An empty path always means "this node".

use std::fmt::{self, Write};

use indexmap::IndexMap;

use crate::value::Scalar;

/// Attribute pairs of a matcher segment, in declaration order.
pub type Attributes = IndexMap<String, Scalar>;

/// An ordered sequence of segments.
pub type Path = Vec<PathSegment>;

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Exact lookup of one mapping entry.
    Key(String),
    /// Every entry of a mapping or every element of a sequence.
    Wildcard,
    /// Sequence elements whose mapping value is a superset of these pairs.
    Match(Attributes),
}

impl PathSegment {
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Builds an attribute matcher from key/scalar pairs.
    pub fn matching<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        PathSegment::Match(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for PathSegment {
    /// `"*"` is the wildcard token; any other string is an exact key.
    fn from(s: &str) -> Self {
        if s == "*" {
            PathSegment::Wildcard
        } else {
            PathSegment::Key(s.to_string())
        }
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::from(s.as_str())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "'{name}'"),
            PathSegment::Wildcard => f.write_char('*'),
            PathSegment::Match(attrs) => {
                write!(
                    f,
                    "{{{}}}",
                    attrs
                        .iter()
                        .map(|(k, v)| format!("'{k}': {v}"))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_token_becomes_wildcard() {
        assert_eq!(PathSegment::from("*"), PathSegment::Wildcard);
        assert_eq!(PathSegment::from("key"), PathSegment::key("key"));
    }

    #[test]
    fn segments_display_for_error_messages() {
        assert_eq!(PathSegment::key("name").to_string(), "'name'");
        assert_eq!(PathSegment::Wildcard.to_string(), "*");
        assert_eq!(
            PathSegment::matching([("name", "object1")]).to_string(),
            "{'name': 'object1'}"
        );
    }
}
