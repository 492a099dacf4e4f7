//! Branching move history.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; a detached node
//! leaves a `None` slot so ids are never reused within one tree. The root
//! carries no record and stands for the starting position.
//!
//! Two cursors track play: `latest` is the tip of forward play and `current`
//! is the node on display. Undoing one's own latest move retires it: the node
//! stays attached, `latest` steps back, and the node waits on the retired
//! stack as the redo candidate. A different move played from its parent
//! detaches every retired node together with its subtree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::move_record::MoveRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct HistoryNode {
    pub id: NodeId,
    pub record: Option<MoveRecord>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub created_at: DateTime<Utc>,
}

/// Result of [`HistoryTree::record_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    pub node: NodeId,
    /// The move matched the redo candidate, which was re-entered.
    pub reentered: bool,
}

/// Result of [`HistoryTree::undo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoStep {
    /// The node now on display.
    pub node: NodeId,
    /// The node retired as redo candidate, if any.
    pub retired: Option<NodeId>,
}

/// Result of [`HistoryTree::redo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedoStep {
    pub node: NodeId,
    /// A retired node came back as `latest`.
    pub reentered: bool,
}

#[derive(Debug, Clone)]
pub struct HistoryTree {
    nodes: Vec<Option<HistoryNode>>,
    root: NodeId,
    latest: NodeId,
    current: NodeId,
    retired: Vec<NodeId>,
}

impl Default for HistoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTree {
    pub fn new() -> Self {
        let root = NodeId(0);
        Self {
            nodes: vec![Some(HistoryNode {
                id: root,
                record: None,
                parent: None,
                children: Vec::new(),
                created_at: Utc::now(),
            })],
            root,
            latest: root,
            current: root,
            retired: Vec::new(),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn latest(&self) -> NodeId {
        self.latest
    }

    #[inline]
    pub fn current(&self) -> NodeId {
        self.current
    }

    #[inline]
    pub fn is_reviewing(&self) -> bool {
        self.current != self.latest
    }

    pub fn node(&self, id: NodeId) -> Option<&HistoryNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn record(&self, id: NodeId) -> Option<&MoveRecord> {
        self.node(id).and_then(|n| n.record.as_ref())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// The node an exact redo would re-enter.
    pub fn redo_candidate(&self) -> Option<NodeId> {
        self.retired.last().copied()
    }

    pub fn is_retired(&self, id: NodeId) -> bool {
        self.retired.contains(&id)
    }

    pub fn can_redo(&self) -> bool {
        self.redo_target().is_some()
    }

    /// Live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Ids from the root down to `id`, both included. Empty for unknown ids.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.node(id).map(|n| n.id);
        while let Some(node_id) = cursor {
            path.push(node_id);
            cursor = self.parent(node_id);
        }
        path.reverse();
        path
    }

    /// Records from the first move to `latest`.
    pub fn main_line(&self) -> Vec<&MoveRecord> {
        self.path_to(self.latest)
            .into_iter()
            .filter_map(|id| self.record(id))
            .collect()
    }

    /// Append a locally played move under `current`.
    pub fn record_move(&mut self, record: MoveRecord) -> RecordOutcome {
        if let Some(candidate) = self.redo_candidate() {
            let matches = self.parent(candidate) == Some(self.current)
                && self.record(candidate).is_some_and(|r| r.same_move(&record));
            if matches {
                self.retired.pop();
                self.latest = candidate;
                self.current = candidate;
                debug!(node = candidate.0, "re-entered redo candidate");
                return RecordOutcome {
                    node: candidate,
                    reentered: true,
                };
            }
        }

        self.discard_retired();
        let node = self.attach(self.current, record);
        self.latest = node;
        self.current = node;
        RecordOutcome {
            node,
            reentered: false,
        }
    }

    /// Step `current` back one node.
    ///
    /// When the node left is `latest` and `may_retire` accepts its record, it
    /// becomes the redo candidate and `latest` follows `current`. Otherwise
    /// only the view moves.
    pub fn undo(&mut self, may_retire: impl FnOnce(&MoveRecord) -> bool) -> Option<UndoStep> {
        let leaving = self.current;
        let parent = self.parent(leaving)?;
        let record = self.record(leaving)?;

        let retire = leaving == self.latest && may_retire(record);
        self.current = parent;

        if retire {
            self.latest = parent;
            self.retired.push(leaving);
            debug!(node = leaving.0, "retired node as redo candidate");
        }

        Some(UndoStep {
            node: parent,
            retired: retire.then_some(leaving),
        })
    }

    /// Step `current` forward: re-enter the redo candidate when it hangs off
    /// `current`, otherwise follow the path towards `latest`.
    pub fn redo(&mut self) -> Option<RedoStep> {
        let (node, reentered) = self.redo_target()?;
        if reentered {
            self.retired.pop();
            self.latest = node;
        }
        self.current = node;
        Some(RedoStep { node, reentered })
    }

    fn redo_target(&self) -> Option<(NodeId, bool)> {
        if let Some(candidate) = self.redo_candidate() {
            if self.parent(candidate) == Some(self.current) {
                return Some((candidate, true));
            }
        }

        let path = self.path_to(self.latest);
        if let Some(idx) = path.iter().position(|&id| id == self.current) {
            return path.get(idx + 1).map(|&id| (id, false));
        }

        self.children(self.current)
            .iter()
            .find(|&&id| !self.is_retired(id))
            .map(|&id| (id, false))
    }

    /// Show any existing node. Returns `false` for unknown ids.
    pub fn jump_to(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        self.current = id;
        true
    }

    /// Append a peer's move under `latest` and show it.
    pub fn remote_apply(&mut self, record: MoveRecord) -> NodeId {
        self.discard_retired();
        let node = self.attach(self.latest, record);
        self.latest = node;
        self.current = node;
        node
    }

    /// Drop `latest` as the peer took it back. Both cursors land on its
    /// parent. Returns the removed record.
    pub fn remote_undo(&mut self) -> Option<MoveRecord> {
        let removed = self.latest;
        let parent = self.parent(removed)?;
        let record = self.record(removed).cloned();

        self.detach(removed);
        self.retired.retain(|&id| self.nodes.get(id.0).is_some_and(Option::is_some));
        self.latest = parent;
        self.current = parent;
        record
    }

    /// Start over with a fresh root.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn attach(&mut self, parent: NodeId, record: MoveRecord) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(HistoryNode {
            id,
            record: Some(record),
            parent: Some(parent),
            children: Vec::new(),
            created_at: Utc::now(),
        }));
        if let Some(Some(parent_node)) = self.nodes.get_mut(parent.0) {
            parent_node.children.push(id);
        }
        id
    }

    fn discard_retired(&mut self) {
        for id in std::mem::take(&mut self.retired) {
            debug!(node = id.0, "detached superseded redo candidate");
            self.detach(id);
        }
    }

    /// Remove `id` and its whole subtree.
    fn detach(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        if let Some(parent) = node.parent {
            if let Some(Some(parent_node)) = self.nodes.get_mut(parent.0) {
                parent_node.children.retain(|&child| child != id);
            }
        }

        let mut stack = node.children;
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.get_mut(child.0).and_then(Option::take) {
                stack.extend(removed.children);
            }
        }
    }
}
