use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NodeErrorType {
    /// The operation or path segment is not defined for this node kind.
    Unsupported,
    /// A `delete` target that the caller promised exists was not found.
    MissingTarget,
    /// A value handed to `append` has the wrong shape.
    InvalidValue,
}

#[derive(Debug)]
pub struct NodeError {
    pub kind: NodeErrorType,
    pub msg: String,
}

impl NodeError {
    pub fn new(kind: NodeErrorType, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn unsupported(msg: String) -> Self {
        Self {
            kind: NodeErrorType::Unsupported,
            msg,
        }
    }

    pub fn missing(msg: String) -> Self {
        Self {
            kind: NodeErrorType::MissingTarget,
            msg,
        }
    }

    pub fn invalid(msg: String) -> Self {
        Self {
            kind: NodeErrorType::InvalidValue,
            msg,
        }
    }
}

impl std::error::Error for NodeError {}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeErrorType::Unsupported => {
                write!(f, "unsupported operation: {}", self.msg)
            }
            NodeErrorType::MissingTarget => {
                write!(f, "missing target: {}", self.msg)
            }
            NodeErrorType::InvalidValue => {
                write!(f, "invalid value: {}", self.msg)
            }
        }
    }
}
