//! Drop-target container addressing.
//!
//! A relocation destination is a container plus a zero-based index. The
//! drag layer hands containers over as tokens: the literal `root`, or
//! `children-of:<node id>`.

use crate::model::priority::PriorityId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Token addressing the root-level sequence.
pub const ROOT_CONTAINER_TOKEN: &str = "root";
/// Prefix of tokens addressing one node's child list.
pub const CHILDREN_OF_PREFIX: &str = "children-of:";

/// One ordered list that can receive a relocated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// The root-level sequence of the tree.
    Root,
    /// The `children` list of the node with this id.
    ChildrenOf(PriorityId),
}

impl Container {
    /// Returns the owning node id, or `None` for the root container.
    pub fn parent_id(self) -> Option<PriorityId> {
        match self {
            Self::Root => None,
            Self::ChildrenOf(id) => Some(id),
        }
    }
}

impl From<Option<PriorityId>> for Container {
    fn from(value: Option<PriorityId>) -> Self {
        match value {
            Some(id) => Self::ChildrenOf(id),
            None => Self::Root,
        }
    }
}

impl Display for Container {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_CONTAINER_TOKEN),
            Self::ChildrenOf(id) => write!(f, "{CHILDREN_OF_PREFIX}{id}"),
        }
    }
}

/// Errors from parsing a container token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerTokenError {
    /// Token is blank.
    Empty,
    /// Token is neither `root` nor `children-of:<id>`.
    UnknownToken(String),
    /// Token has the children prefix but the id part is not a valid id.
    InvalidNodeId(String),
}

impl Display for ContainerTokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "container token must not be blank"),
            Self::UnknownToken(value) => write!(f, "unknown container token: {value}"),
            Self::InvalidNodeId(value) => {
                write!(f, "container token has invalid node id: {value}")
            }
        }
    }
}

impl Error for ContainerTokenError {}

impl FromStr for Container {
    type Err = ContainerTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContainerTokenError::Empty);
        }
        if trimmed == ROOT_CONTAINER_TOKEN {
            return Ok(Self::Root);
        }
        let Some(raw_id) = trimmed.strip_prefix(CHILDREN_OF_PREFIX) else {
            return Err(ContainerTokenError::UnknownToken(trimmed.to_string()));
        };
        Uuid::parse_str(raw_id.trim())
            .map(Self::ChildrenOf)
            .map_err(|_| ContainerTokenError::InvalidNodeId(raw_id.to_string()))
    }
}
