//! Priority node domain model.
//!
//! # Responsibility
//! - Define the owned snapshot shape of one priority and its subtree.
//! - Provide id generation and content normalization helpers.
//!
//! # Invariants
//! - `id` is stable for the node lifetime and never reassigned.
//! - `content` is never blank once a node is committed to a tree.
//! - `children` order is placement order; nothing sorts it implicitly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one priority node.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PriorityId = Uuid;

/// Label used when a new top-level priority is created without content.
pub const DEFAULT_PRIORITY_CONTENT: &str = "New Priority";
/// Label used when a new sub-priority is created without content.
pub const DEFAULT_SUB_PRIORITY_CONTENT: &str = "New Sub-Priority";

/// Generates a fresh, practically collision-free priority id.
pub fn new_priority_id() -> PriorityId {
    Uuid::new_v4()
}

/// Normalizes user-entered content.
///
/// Trims the value and folds line breaks into single spaces, since one
/// priority is exactly one outline line. Returns `None` when nothing is
/// left, so callers can keep the previous value instead of blanking a node.
pub fn normalize_content(value: &str) -> Option<String> {
    let folded = value
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if folded.is_empty() {
        return None;
    }
    Some(folded)
}

/// Owned snapshot of one priority and its entire subtree.
///
/// Used for detached subtrees, parser output and read-only snapshots handed
/// to the rendering layer. The live hierarchy is kept in
/// [`crate::tree::PriorityTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityNode {
    pub id: PriorityId,
    pub content: String,
    #[serde(default)]
    pub children: Vec<PriorityNode>,
}

impl PriorityNode {
    /// Creates a leaf node with a freshly generated id.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(new_priority_id(), content)
    }

    /// Creates a leaf node with a caller-provided id.
    pub fn with_id(id: PriorityId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends one child.
    pub fn with_child(mut self, child: PriorityNode) -> Self {
        self.children.push(child);
        self
    }

    /// Pre-order iterator over this node and its whole subtree.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Returns whether `candidate` is this node's id or any id in its subtree.
    ///
    /// A node counts as containing itself, which is what the relocation
    /// cycle guard needs.
    pub fn contains(&self, candidate: PriorityId) -> bool {
        self.iter().any(|node| node.id == candidate)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        self.iter().count()
    }

    /// Collects every id of this subtree in pre-order.
    pub fn collect_ids(&self, out: &mut Vec<PriorityId>) {
        out.extend(self.iter().map(|node| node.id));
    }
}

// Drops children through a work list so deep chains never recurse.
impl Drop for PriorityNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator returned by [`PriorityNode::iter`].
pub struct Preorder<'a> {
    stack: Vec<&'a PriorityNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a PriorityNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Rebuilds a forest from pre-order entries.
///
/// Each entry is a childless node plus the position of its parent entry,
/// which must come earlier in `entries`. Entries without a parent become
/// roots, in input order.
pub(crate) fn assemble_preorder(
    entries: Vec<(PriorityNode, Option<usize>)>,
) -> Vec<PriorityNode> {
    let mut parents = Vec::with_capacity(entries.len());
    let mut nodes = Vec::with_capacity(entries.len());
    for (node, parent) in entries {
        nodes.push(Some(node));
        parents.push(parent);
    }

    // Walking backwards completes every child before its parent is taken.
    let mut roots = Vec::new();
    for idx in (0..nodes.len()).rev() {
        let Some(mut node) = nodes[idx].take() else {
            continue;
        };
        node.children.reverse();
        let parent = parents[idx]
            .filter(|&parent| parent < idx)
            .and_then(|parent| nodes.get_mut(parent))
            .and_then(Option::as_mut);
        match parent {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();
    roots
}
