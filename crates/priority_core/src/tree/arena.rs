//! Arena-backed priority hierarchy.
//!
//! # Responsibility
//! - Own every live node in one slot arena addressed by stable indices.
//! - Locate, detach, validate and re-insert subtrees in place.
//!
//! # Invariants
//! - `index` maps every live id to exactly one occupied slot.
//! - Every occupied slot is listed exactly once, either in `roots` or in
//!   its parent's `children`.
//! - No node is its own descendant.
//! - Operations that report "unchanged" never leave partial edits behind.

use crate::model::container::Container;
use crate::model::priority::{assemble_preorder, normalize_content, PriorityId, PriorityNode};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from structural tree inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Target container node does not exist.
    ContainerNotFound(PriorityId),
    /// Inserted subtree carries an id that is already present.
    DuplicateId(PriorityId),
    /// Inserted subtree carries a node whose content is blank.
    BlankContent(PriorityId),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContainerNotFound(id) => write!(f, "container node not found: {id}"),
            Self::DuplicateId(id) => write!(f, "priority id already present: {id}"),
            Self::BlankContent(id) => write!(f, "priority content is blank: {id}"),
        }
    }
}

impl Error for TreeError {}

/// Result of one relocation request.
///
/// Every variant except `Moved` means the tree was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocateOutcome {
    /// Node and subtree now live at the requested position.
    Moved,
    /// Drop resolved to the position the node already occupies.
    SamePosition,
    /// No node with the source id exists.
    SourceNotFound,
    /// Destination container node does not exist.
    DestinationNotFound,
    /// Destination is the source itself or one of its descendants.
    CycleRejected,
}

impl RelocateOutcome {
    /// Returns whether the tree changed.
    pub fn is_moved(self) -> bool {
        matches!(self, Self::Moved)
    }

    /// Stable short label for log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moved => "moved",
            Self::SamePosition => "same_position",
            Self::SourceNotFound => "source_not_found",
            Self::DestinationNotFound => "destination_not_found",
            Self::CycleRejected => "cycle_rejected",
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    id: PriorityId,
    content: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Live priority hierarchy, mutated in place under single-owner discipline.
#[derive(Debug, Clone, Default)]
pub struct PriorityTree {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    index: HashMap<PriorityId, usize>,
    roots: Vec<usize>,
}

impl PriorityTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from an ordered root sequence.
    ///
    /// # Errors
    /// - Returns `TreeError::DuplicateId` when two nodes share an id.
    pub fn from_nodes(nodes: Vec<PriorityNode>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for node in nodes {
            tree.insert(Container::Root, i64::MAX, node)?;
        }
        Ok(tree)
    }

    /// Number of live nodes at all depths.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns whether a node with this id exists anywhere in the tree.
    pub fn contains(&self, id: PriorityId) -> bool {
        self.index.contains_key(&id)
    }

    /// Root-level ids in display order.
    pub fn root_ids(&self) -> Vec<PriorityId> {
        self.ids_of(&self.roots)
    }

    /// Child ids of one node in display order, or `None` when it is missing.
    pub fn child_ids(&self, id: PriorityId) -> Option<Vec<PriorityId>> {
        let slot = self.slot(*self.index.get(&id)?)?;
        Some(self.ids_of(&slot.children))
    }

    /// Content of one node.
    pub fn content(&self, id: PriorityId) -> Option<&str> {
        let slot = self.slot(*self.index.get(&id)?)?;
        Some(slot.content.as_str())
    }

    /// Nesting depth of one node; root-level nodes have depth 1.
    pub fn depth(&self, id: PriorityId) -> Option<usize> {
        let mut cursor = self.slot(*self.index.get(&id)?)?.parent;
        let mut depth = 1;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.slot(parent)?.parent;
        }
        Some(depth)
    }

    /// Container and position currently holding one node.
    pub fn location(&self, id: PriorityId) -> Option<(Container, usize)> {
        let slot_idx = *self.index.get(&id)?;
        let parent = self.slot(slot_idx)?.parent;
        let position = self.position_in(parent, slot_idx)?;
        let container = match parent {
            None => Container::Root,
            Some(parent_idx) => Container::ChildrenOf(self.slot(parent_idx)?.id),
        };
        Some((container, position))
    }

    /// Owned snapshot of one node and its subtree.
    pub fn get(&self, id: PriorityId) -> Option<PriorityNode> {
        self.snapshot_slot(*self.index.get(&id)?)
    }

    /// Owned snapshot of the whole forest in display order.
    pub fn snapshot(&self) -> Vec<PriorityNode> {
        self.roots
            .iter()
            .filter_map(|&slot_idx| self.snapshot_slot(slot_idx))
            .collect()
    }

    /// Inserts a detached subtree into `container` at `index`.
    ///
    /// The index is clamped into `[0, len]`; negative values insert first.
    /// Content is stored normalized, the same way `rename` stores it.
    ///
    /// # Errors
    /// - Returns `TreeError::ContainerNotFound` when the container node is missing.
    /// - Returns `TreeError::DuplicateId` when any id of `node` is already
    ///   present or repeats inside `node`.
    /// - Returns `TreeError::BlankContent` when any node of `node` has blank
    ///   content.
    pub fn insert(
        &mut self,
        container: Container,
        index: i64,
        node: PriorityNode,
    ) -> Result<PriorityId, TreeError> {
        let parent = match container {
            Container::Root => None,
            Container::ChildrenOf(parent_id) => Some(
                *self
                    .index
                    .get(&parent_id)
                    .ok_or(TreeError::ContainerNotFound(parent_id))?,
            ),
        };

        let mut seen = HashSet::new();
        for entry in node.iter() {
            if self.index.contains_key(&entry.id) || !seen.insert(entry.id) {
                return Err(TreeError::DuplicateId(entry.id));
            }
            if normalize_content(&entry.content).is_none() {
                return Err(TreeError::BlankContent(entry.id));
            }
        }

        let id = node.id;
        let slot_idx = self.attach_subtree(node, parent);
        if let Some(list) = self.list_mut(parent) {
            let at = clamp_index(index, list.len());
            list.insert(at, slot_idx);
        }
        Ok(id)
    }

    /// Detaches one node and its subtree.
    ///
    /// Returns `None` when no node has this id; callers treat that as a no-op.
    pub fn remove(&mut self, id: PriorityId) -> Option<PriorityNode> {
        let slot_idx = *self.index.get(&id)?;
        let parent = self.slot(slot_idx)?.parent;
        let position = self.position_in(parent, slot_idx)?;
        if let Some(list) = self.list_mut(parent) {
            list.remove(position);
        }
        self.take_subtree(slot_idx)
    }

    /// Returns whether `candidate` is `node_id` itself or any node below it.
    ///
    /// Returns `false` when either id does not exist.
    pub fn is_descendant(&self, node_id: PriorityId, candidate: PriorityId) -> bool {
        match (self.index.get(&node_id), self.index.get(&candidate)) {
            (Some(&node_slot), Some(&candidate_slot)) => {
                self.has_ancestor(candidate_slot, node_slot)
            }
            _ => false,
        }
    }

    /// Replaces one node's content.
    ///
    /// Blank content is discarded and the prior value kept. Returns whether
    /// the content changed.
    pub fn rename(&mut self, id: PriorityId, content: &str) -> bool {
        let Some(normalized) = normalize_content(content) else {
            return false;
        };
        let Some(&slot_idx) = self.index.get(&id) else {
            return false;
        };
        match self.slots.get_mut(slot_idx).and_then(Option::as_mut) {
            Some(slot) if slot.content != normalized => {
                slot.content = normalized;
                true
            }
            _ => false,
        }
    }

    /// Moves one node, with its subtree, into `destination` at `index`.
    ///
    /// The index is interpreted after the node has left its current list and
    /// is clamped into range. All checks run before anything is detached, so
    /// every non-`Moved` outcome leaves the tree exactly as it was.
    pub fn relocate(
        &mut self,
        source: PriorityId,
        destination: Container,
        index: i64,
    ) -> RelocateOutcome {
        let Some(&source_slot) = self.index.get(&source) else {
            return RelocateOutcome::SourceNotFound;
        };

        let destination_parent = match destination {
            Container::Root => None,
            Container::ChildrenOf(parent_id) => {
                let Some(&parent_slot) = self.index.get(&parent_id) else {
                    return RelocateOutcome::DestinationNotFound;
                };
                if self.has_ancestor(parent_slot, source_slot) {
                    return RelocateOutcome::CycleRejected;
                }
                Some(parent_slot)
            }
        };

        let Some(current_parent) = self.slot(source_slot).map(|slot| slot.parent) else {
            return RelocateOutcome::SourceNotFound;
        };
        let Some(current_position) = self.position_in(current_parent, source_slot) else {
            return RelocateOutcome::SourceNotFound;
        };

        if current_parent == destination_parent {
            let remaining = self
                .list(current_parent)
                .map_or(0, |list| list.len().saturating_sub(1));
            if clamp_index(index, remaining) == current_position {
                return RelocateOutcome::SamePosition;
            }
        }

        if let Some(list) = self.list_mut(current_parent) {
            list.remove(current_position);
        }
        if let Some(list) = self.list_mut(destination_parent) {
            let at = clamp_index(index, list.len());
            list.insert(at, source_slot);
        }
        if let Some(slot) = self.slots.get_mut(source_slot).and_then(Option::as_mut) {
            slot.parent = destination_parent;
        }
        RelocateOutcome::Moved
    }

    fn slot(&self, slot_idx: usize) -> Option<&Slot> {
        self.slots.get(slot_idx).and_then(Option::as_ref)
    }

    fn list(&self, parent: Option<usize>) -> Option<&Vec<usize>> {
        match parent {
            None => Some(&self.roots),
            Some(parent_idx) => self.slot(parent_idx).map(|slot| &slot.children),
        }
    }

    fn list_mut(&mut self, parent: Option<usize>) -> Option<&mut Vec<usize>> {
        match parent {
            None => Some(&mut self.roots),
            Some(parent_idx) => self
                .slots
                .get_mut(parent_idx)
                .and_then(Option::as_mut)
                .map(|slot| &mut slot.children),
        }
    }

    fn position_in(&self, parent: Option<usize>, slot_idx: usize) -> Option<usize> {
        self.list(parent)?.iter().position(|&entry| entry == slot_idx)
    }

    fn ids_of(&self, slots: &[usize]) -> Vec<PriorityId> {
        slots
            .iter()
            .filter_map(|&slot_idx| self.slot(slot_idx).map(|slot| slot.id))
            .collect()
    }

    /// Walks parent pointers up from `slot_idx`; a slot is its own ancestor.
    fn has_ancestor(&self, slot_idx: usize, ancestor: usize) -> bool {
        let mut cursor = Some(slot_idx);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.slot(current).and_then(|slot| slot.parent);
        }
        false
    }

    /// Pre-order slots of one subtree, each with the position of its parent entry.
    fn preorder(&self, root: usize) -> Vec<(usize, Option<usize>)> {
        let mut order = Vec::new();
        let mut stack = vec![(root, None)];
        while let Some((slot_idx, parent_pos)) = stack.pop() {
            let Some(slot) = self.slot(slot_idx) else {
                continue;
            };
            let pos = order.len();
            order.push((slot_idx, parent_pos));
            stack.extend(slot.children.iter().rev().map(|&child| (child, Some(pos))));
        }
        order
    }

    fn snapshot_slot(&self, slot_idx: usize) -> Option<PriorityNode> {
        let entries = self
            .preorder(slot_idx)
            .into_iter()
            .filter_map(|(idx, parent_pos)| {
                let slot = self.slot(idx)?;
                Some((PriorityNode::with_id(slot.id, slot.content.clone()), parent_pos))
            })
            .collect();
        assemble_preorder(entries).pop()
    }

    fn alloc(&mut self, slot: Slot) -> usize {
        match self.free.pop() {
            Some(slot_idx) => {
                self.slots[slot_idx] = Some(slot);
                slot_idx
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }

    fn attach_subtree(&mut self, mut node: PriorityNode, parent: Option<usize>) -> usize {
        let mut pending = Vec::new();
        let top = self.alloc_node(&mut node, parent, &mut pending);
        while let Some((mut child, parent_idx)) = pending.pop() {
            let slot_idx = self.alloc_node(&mut child, Some(parent_idx), &mut pending);
            if let Some(list) = self.list_mut(Some(parent_idx)) {
                list.push(slot_idx);
            }
        }
        top
    }

    /// Allocates one node's slot and queues its children, first child on top.
    fn alloc_node(
        &mut self,
        node: &mut PriorityNode,
        parent: Option<usize>,
        pending: &mut Vec<(PriorityNode, usize)>,
    ) -> usize {
        let raw = std::mem::take(&mut node.content);
        let content = normalize_content(&raw).unwrap_or(raw);
        let children = std::mem::take(&mut node.children);
        let slot_idx = self.alloc(Slot {
            id: node.id,
            content,
            parent,
            children: Vec::with_capacity(children.len()),
        });
        self.index.insert(node.id, slot_idx);
        pending.extend(children.into_iter().rev().map(|child| (child, slot_idx)));
        slot_idx
    }

    fn take_subtree(&mut self, slot_idx: usize) -> Option<PriorityNode> {
        let order = self.preorder(slot_idx);
        let mut entries = Vec::with_capacity(order.len());
        for (idx, parent_pos) in order {
            let Some(slot) = self.slots.get_mut(idx).and_then(Option::take) else {
                continue;
            };
            self.index.remove(&slot.id);
            self.free.push(idx);
            entries.push((PriorityNode::with_id(slot.id, slot.content), parent_pos));
        }
        assemble_preorder(entries).pop()
    }
}

fn clamp_index(index: i64, len: usize) -> usize {
    usize::try_from(index).map_or(0, |value| value.min(len))
}
