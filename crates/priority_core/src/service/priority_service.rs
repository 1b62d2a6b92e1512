//! Priority hierarchy use-case service.
//!
//! # Responsibility
//! - Own the session's priority tree and expose its only write surface.
//! - Bridge drop-target triples and outline text into tree operations.
//!
//! # Invariants
//! - Missing ids and rejected moves leave the tree unchanged and are not errors.
//! - Import replaces the whole tree only after the text parsed completely.
//! - Log lines carry ids and counts only, never priority content.

use crate::model::container::Container;
use crate::model::priority::{
    normalize_content, PriorityId, PriorityNode, DEFAULT_PRIORITY_CONTENT,
    DEFAULT_SUB_PRIORITY_CONTENT,
};
use crate::outline::{self, OutlineConfig, OutlineError};
use crate::tree::{PriorityTree, RelocateOutcome};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Errors from importing outline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Input is empty or whitespace-only.
    Empty,
    /// Input has lines that do not follow the outline grammar.
    Malformed { lines: Vec<usize> },
    /// Parsed forest could not be committed.
    Internal(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "please paste some priority text to import"),
            Self::Malformed { lines } => outline::write_malformed(f, lines),
            Self::Internal(message) => write!(
                f,
                "failed to process the imported text, please check the format: {message}"
            ),
        }
    }
}

impl Error for ImportError {}

impl From<OutlineError> for ImportError {
    fn from(value: OutlineError) -> Self {
        match value {
            OutlineError::Empty => Self::Empty,
            OutlineError::Malformed { lines } => Self::Malformed { lines },
        }
    }
}

impl ImportError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "import_empty",
            Self::Malformed { .. } => "import_malformed",
            Self::Internal(_) => "import_internal",
        }
    }
}

/// Initial hierarchy shown to a fresh session.
pub fn sample_priorities() -> Vec<PriorityNode> {
    vec![
        PriorityNode::new("Wake up"),
        PriorityNode::new("Go to work")
            .with_child(PriorityNode::new("Take the bus"))
            .with_child(PriorityNode::new("Get some work done!")),
        PriorityNode::new("Sleep"),
    ]
}

/// Session store for one priority hierarchy.
#[derive(Debug, Clone, Default)]
pub struct PriorityService {
    tree: PriorityTree,
    config: OutlineConfig,
}

impl PriorityService {
    /// Creates an empty store with the default outline format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with a custom outline format.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            tree: PriorityTree::new(),
            config,
        }
    }

    /// Creates a store seeded with [`sample_priorities`].
    ///
    /// Falls back to an empty tree if the sample cannot be committed.
    pub fn with_sample() -> Self {
        let tree = PriorityTree::from_nodes(sample_priorities()).unwrap_or_else(|err| {
            warn!("event=priority_seed module=service status=error error={err}");
            PriorityTree::new()
        });
        Self {
            tree,
            config: OutlineConfig::default(),
        }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Read-only view of the live tree.
    pub fn tree(&self) -> &PriorityTree {
        &self.tree
    }

    /// Owned snapshot for the rendering layer.
    pub fn snapshot(&self) -> Vec<PriorityNode> {
        self.tree.snapshot()
    }

    pub fn get(&self, id: PriorityId) -> Option<PriorityNode> {
        self.tree.get(id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Appends a new root-level priority and returns its id.
    ///
    /// Blank content falls back to the default top-level label.
    pub fn add_top_level(&mut self, content: &str) -> PriorityId {
        let content =
            normalize_content(content).unwrap_or_else(|| DEFAULT_PRIORITY_CONTENT.to_string());
        let node = PriorityNode::new(content);
        let id = node.id;
        // Root insert only fails on an id collision, which v4 ids rule out.
        if let Err(err) = self.tree.insert(Container::Root, i64::MAX, node) {
            warn!("event=priority_add module=service status=error parent=root error={err}");
        } else {
            debug!("event=priority_add module=service status=ok parent=root id={id}");
        }
        id
    }

    /// Appends a new child under `parent_id`.
    ///
    /// Returns `None` and leaves the tree unchanged when the parent is missing.
    pub fn add_child(&mut self, parent_id: PriorityId, content: &str) -> Option<PriorityId> {
        let content = normalize_content(content)
            .unwrap_or_else(|| DEFAULT_SUB_PRIORITY_CONTENT.to_string());
        match self.tree.insert(
            Container::ChildrenOf(parent_id),
            i64::MAX,
            PriorityNode::new(content),
        ) {
            Ok(id) => {
                debug!(
                    "event=priority_add module=service status=ok parent={parent_id} id={id}"
                );
                Some(id)
            }
            Err(err) => {
                debug!(
                    "event=priority_add module=service status=noop parent={parent_id} reason={err}"
                );
                None
            }
        }
    }

    /// Replaces one priority's content.
    ///
    /// Blank content is discarded and the previous value kept. Returns whether
    /// the tree changed.
    pub fn rename(&mut self, id: PriorityId, content: &str) -> bool {
        let changed = self.tree.rename(id, content);
        debug!(
            "event=priority_rename module=service status={} id={id}",
            if changed { "ok" } else { "noop" }
        );
        changed
    }

    /// Deletes one priority together with its whole subtree.
    ///
    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: PriorityId) -> bool {
        match self.tree.remove(id) {
            Some(removed) => {
                debug!(
                    "event=priority_delete module=service status=ok id={id} removed={}",
                    removed.subtree_len()
                );
                true
            }
            None => {
                debug!("event=priority_delete module=service status=noop id={id}");
                false
            }
        }
    }

    /// Moves one priority, with its subtree, to `destination` at `index`.
    pub fn relocate(
        &mut self,
        source: PriorityId,
        destination: Container,
        index: i64,
    ) -> RelocateOutcome {
        let outcome = self.tree.relocate(source, destination, index);
        match outcome {
            RelocateOutcome::Moved => debug!(
                "event=priority_move module=service status=ok id={source} destination={destination} index={index}"
            ),
            RelocateOutcome::CycleRejected => info!(
                "event=priority_move module=service status=rejected id={source} destination={destination} reason={}",
                outcome.as_str()
            ),
            _ => debug!(
                "event=priority_move module=service status=noop id={source} destination={destination} reason={}",
                outcome.as_str()
            ),
        }
        outcome
    }

    /// Applies a drop triple exactly as the drag layer reports it.
    ///
    /// An unparsable source id counts as a missing source, and an unparsable
    /// container token as a missing destination.
    pub fn relocate_by_token(
        &mut self,
        source: &str,
        container_token: &str,
        index: i64,
    ) -> RelocateOutcome {
        let Ok(source_id) = Uuid::parse_str(source.trim()) else {
            debug!("event=priority_move module=service status=noop reason=invalid_source_id");
            return RelocateOutcome::SourceNotFound;
        };
        match container_token.parse::<Container>() {
            Ok(destination) => self.relocate(source_id, destination, index),
            Err(err) => {
                debug!(
                    "event=priority_move module=service status=noop id={source_id} reason=invalid_container error={err}"
                );
                RelocateOutcome::DestinationNotFound
            }
        }
    }

    /// Serializes the whole tree into outline text.
    pub fn export(&self) -> String {
        let text = outline::serialize(&self.tree.snapshot(), &self.config);
        info!(
            "event=priority_export module=service status=ok nodes={} bytes={}",
            self.tree.len(),
            text.len()
        );
        text
    }

    /// Replaces the whole tree with the forest parsed from `text`.
    ///
    /// Returns the number of imported nodes.
    ///
    /// # Errors
    /// - `ImportError::Empty` when `text` is blank.
    /// - `ImportError::Malformed` when any line breaks the outline grammar.
    /// - `ImportError::Internal` when the parsed forest cannot be committed.
    ///
    /// On every error the current tree is left untouched.
    pub fn import(&mut self, text: &str) -> Result<usize, ImportError> {
        let result = outline::parse(text, &self.config)
            .map_err(ImportError::from)
            .and_then(|roots| {
                PriorityTree::from_nodes(roots).map_err(|err| ImportError::Internal(err.to_string()))
            });

        match result {
            Ok(tree) => {
                self.tree = tree;
                info!(
                    "event=priority_import module=service status=ok nodes={} roots={}",
                    self.tree.len(),
                    self.tree.root_ids().len()
                );
                Ok(self.tree.len())
            }
            Err(err) => {
                warn!(
                    "event=priority_import module=service status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImportError, PriorityService};
    use crate::outline::OutlineError;
    use crate::model::priority::{DEFAULT_PRIORITY_CONTENT, DEFAULT_SUB_PRIORITY_CONTENT};

    #[test]
    fn blank_content_on_create_uses_default_labels() {
        let mut service = PriorityService::new();
        let root = service.add_top_level("   ");
        let child = service.add_child(root, "").unwrap();

        assert_eq!(service.tree().content(root), Some(DEFAULT_PRIORITY_CONTENT));
        assert_eq!(
            service.tree().content(child),
            Some(DEFAULT_SUB_PRIORITY_CONTENT)
        );
    }

    #[test]
    fn import_error_messages_are_user_facing() {
        assert_eq!(
            ImportError::Empty.to_string(),
            "please paste some priority text to import"
        );
        let malformed = ImportError::Malformed { lines: vec![3] }.to_string();
        assert!(malformed.starts_with("invalid format"));
        assert!(malformed.contains("lines 3"));
    }

    #[test]
    fn malformed_message_matches_outline_error() {
        for lines in [vec![1], vec![2, 4, 9], Vec::new()] {
            assert_eq!(
                ImportError::Malformed {
                    lines: lines.clone()
                }
                .to_string(),
                OutlineError::Malformed { lines }.to_string()
            );
        }
    }

    #[test]
    fn sample_store_has_expected_shape() {
        let service = PriorityService::with_sample();
        let snapshot = service.snapshot();

        assert_eq!(service.len(), 5);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[1].content, "Go to work");
        assert_eq!(snapshot[1].children.len(), 2);
        assert_eq!(
            service.export(),
            "- Wake up\n- Go to work\n-- Take the bus\n-- Get some work done!\n- Sleep\n"
        );
    }
}
