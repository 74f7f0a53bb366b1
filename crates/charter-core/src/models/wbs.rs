//! Work breakdown structure: an ordered forest of phases and tasks.
//!
//! Every traversal in this module walks an explicit stack so that trees of
//! arbitrary depth never exhaust the call stack. That includes `Clone`,
//! `PartialEq` and `Drop` on [`WbsNode`], and the serialized form of
//! [`WbsTree`], which is a flat list of [`WbsRow`]s in pre-order.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::error::{DraftError, Result};

/// A single phase or task in the work breakdown structure.
pub struct WbsNode {
    /// Identifier, unique across the whole forest
    pub id: u64,

    /// Display name of the phase or task
    pub name: String,

    /// Optional WBS code such as `1.2.3`
    pub code: Option<String>,

    /// Estimated effort in hours (never negative)
    pub estimate_hours: f64,

    /// Ordered child nodes
    pub children: Vec<WbsNode>,
}

/// One WBS node flattened into a row.
///
/// Rows listed in pre-order carry enough to rebuild the forest: every parent
/// precedes its children and siblings keep their relative order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WbsRow {
    pub id: u64,
    pub parent_id: Option<u64>,
    /// Zero for roots
    #[serde(default)]
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub estimate_hours: f64,
}

/// Links detached nodes into a forest.
///
/// `parents[i]` indexes into `nodes` and must be smaller than `i`. Nodes are
/// attached last to first, so each node's children are complete by the time
/// it is moved into its own parent.
fn assemble(mut nodes: Vec<WbsNode>, parents: &[Option<usize>]) -> Vec<WbsNode> {
    let mut roots = Vec::new();
    for idx in (0..nodes.len()).rev() {
        let mut node = std::mem::replace(&mut nodes[idx], WbsNode::new(0, String::new()));
        node.children.reverse();
        match parents[idx] {
            Some(parent) => nodes[parent].children.push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();
    roots
}

impl Clone for WbsNode {
    fn clone(&self) -> Self {
        let mut sources: Vec<(Option<usize>, &WbsNode)> = vec![(None, self)];
        let mut idx = 0;
        while idx < sources.len() {
            let node = sources[idx].1;
            sources.extend(node.children.iter().map(|child| (Some(idx), child)));
            idx += 1;
        }

        let parents: Vec<Option<usize>> = sources.iter().map(|(parent, _)| *parent).collect();
        let detached = sources.iter().map(|(_, node)| node.detached()).collect();
        assemble(detached, &parents)
            .pop()
            .unwrap_or_else(|| self.detached())
    }
}

impl PartialEq for WbsNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.id != b.id
                || a.name != b.name
                || a.code != b.code
                || a.estimate_hours != b.estimate_hours
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Drop for WbsNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl fmt::Debug for WbsNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WbsNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("code", &self.code)
            .field("estimate_hours", &self.estimate_hours)
            .field(
                "children",
                &self.children.iter().map(|c| c.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl WbsNode {
    fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            code: None,
            estimate_hours: 0.0,
            children: Vec::new(),
        }
    }

    /// Copy of this node without its children.
    fn detached(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            code: self.code.clone(),
            estimate_hours: self.estimate_hours,
            children: Vec::new(),
        }
    }

    /// Sum of `estimate_hours` over this node and every descendant.
    pub fn subtree_hours(&self) -> f64 {
        let mut total = 0.0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += node.estimate_hours;
            stack.extend(&node.children);
        }
        total
    }

    /// Number of nodes in this subtree, including the node itself.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}

/// Ordered forest of [`WbsNode`]s with forest-wide unique ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(into = "FlatWbs", try_from = "FlatWbs")]
pub struct WbsTree {
    roots: Vec<WbsNode>,

    /// Next id to hand out; ids are never reused after removal
    next_id: u64,
}

/// Serialized form of a [`WbsTree`].
#[derive(Serialize, Deserialize)]
struct FlatWbs {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    nodes: Vec<WbsRow>,
}

impl From<WbsTree> for FlatWbs {
    fn from(tree: WbsTree) -> Self {
        Self {
            next_id: tree.next_id,
            nodes: tree.rows(),
        }
    }
}

impl TryFrom<FlatWbs> for WbsTree {
    type Error = DraftError;

    fn try_from(flat: FlatWbs) -> Result<Self> {
        WbsTree::from_rows(flat.nodes, flat.next_id)
    }
}

impl WbsTree {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &[WbsNode] {
        &self.roots
    }

    /// Returns true when the forest has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order iterator over every node in the forest.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Pre-order iterator that also yields each node's depth (roots are 0).
    pub fn iter_with_depth(&self) -> NodesWithDepth<'_> {
        NodesWithDepth {
            stack: self.roots.iter().rev().map(|n| (0, n)).collect(),
        }
    }

    /// Flattens the forest into pre-order rows.
    pub fn rows(&self) -> Vec<WbsRow> {
        let mut rows = Vec::with_capacity(self.len());
        let mut stack: Vec<_> = self.roots.iter().rev().map(|n| (None, 0, n)).collect();

        while let Some((parent_id, depth, node)) = stack.pop() {
            rows.push(WbsRow {
                id: node.id,
                parent_id,
                depth,
                code: node.code.clone(),
                name: node.name.clone(),
                estimate_hours: node.estimate_hours,
            });
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|child| (Some(node.id), depth + 1, child)),
            );
        }
        rows
    }

    /// Rebuilds a forest from rows in which every parent precedes its
    /// children. Sibling order follows row order; `depth` is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a duplicate id or a row whose parent has
    /// not appeared yet.
    pub fn from_rows(rows: Vec<WbsRow>, next_id: u64) -> Result<Self> {
        let mut positions = HashMap::with_capacity(rows.len());
        let mut parents = Vec::with_capacity(rows.len());
        let mut nodes = Vec::with_capacity(rows.len());

        for row in rows {
            let parent = match row.parent_id {
                Some(parent_id) => Some(*positions.get(&parent_id).ok_or_else(|| {
                    DraftError::invalid_argument("parent_id").with_reason(format!(
                        "node {} refers to unknown parent {parent_id}",
                        row.id
                    ))
                })?),
                None => None,
            };
            if positions.insert(row.id, nodes.len()).is_some() {
                return Err(DraftError::invalid_argument("id")
                    .with_reason(format!("duplicate WBS node id {}", row.id)));
            }
            parents.push(parent);
            nodes.push(WbsNode {
                id: row.id,
                name: row.name,
                code: row.code,
                estimate_hours: row.estimate_hours,
                children: Vec::new(),
            });
        }

        let highest = positions.keys().copied().max().unwrap_or(0);
        Ok(Self {
            roots: assemble(nodes, &parents),
            next_id: next_id.max(highest + 1),
        })
    }

    /// Next id the tree will hand out.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Looks up a node anywhere in the forest.
    pub fn find(&self, id: u64) -> Option<&WbsNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Returns true when a node with the given id exists.
    pub fn contains(&self, id: u64) -> bool {
        self.find(id).is_some()
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut WbsNode> {
        let mut stack: Vec<&mut WbsNode> = self.roots.iter_mut().collect();
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter_mut());
        }
        None
    }

    fn require_mut(&mut self, id: u64) -> Result<&mut WbsNode> {
        self.find_mut(id).ok_or(DraftError::NodeNotFound { id })
    }

    /// Allocates an id greater than every id ever handed out or present.
    ///
    /// Trees deserialized from older documents may lack `next_id`, so the
    /// counter is reconciled against the ids actually in the forest.
    fn allocate_id(&mut self) -> u64 {
        let highest = self.iter().map(|n| n.id).max().unwrap_or(0);
        let id = self.next_id.max(highest + 1).max(1);
        self.next_id = id + 1;
        id
    }

    /// Appends a new root node and returns its id.
    pub fn add_root(&mut self, name: impl Into<String>) -> u64 {
        let id = self.allocate_id();
        self.roots.push(WbsNode::new(id, name.into()));
        id
    }

    /// Appends a new child under `parent_id` and returns its id.
    pub fn add_child(&mut self, parent_id: u64, name: impl Into<String>) -> Result<u64> {
        if !self.contains(parent_id) {
            return Err(DraftError::NodeNotFound { id: parent_id });
        }
        let id = self.allocate_id();
        self.require_mut(parent_id)?
            .children
            .push(WbsNode::new(id, name.into()));
        Ok(id)
    }

    /// Renames a node.
    pub fn rename(&mut self, id: u64, name: impl Into<String>) -> Result<()> {
        self.require_mut(id)?.name = name.into();
        Ok(())
    }

    /// Sets or clears a node's WBS code.
    pub fn set_code(&mut self, id: u64, code: Option<String>) -> Result<()> {
        self.require_mut(id)?.code = code.filter(|c| !c.trim().is_empty());
        Ok(())
    }

    /// Sets a node's estimate. Negative or non-finite hours are rejected.
    pub fn set_estimate_hours(&mut self, id: u64, hours: f64) -> Result<()> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(DraftError::invalid_argument("estimate_hours")
                .with_reason(format!("hours must be a finite, non-negative number (got {hours})")));
        }
        self.require_mut(id)?.estimate_hours = hours;
        Ok(())
    }

    /// Removes the node and its whole subtree, returning it.
    ///
    /// Removing an id that does not exist is a no-op and yields `None`.
    pub fn remove(&mut self, id: u64) -> Option<WbsNode> {
        let mut stack: Vec<&mut Vec<WbsNode>> = vec![&mut self.roots];
        while let Some(level) = stack.pop() {
            if let Some(pos) = level.iter().position(|n| n.id == id) {
                return Some(level.remove(pos));
            }
            stack.extend(level.iter_mut().map(|n| &mut n.children));
        }
        None
    }

    /// Sum of `estimate_hours` over every node, interior phases included.
    pub fn total_hours(&self) -> f64 {
        self.iter().map(|node| node.estimate_hours).sum()
    }

    /// Sum of hours over leaf nodes only.
    pub fn leaf_hours(&self) -> f64 {
        self.iter()
            .filter(|node| node.children.is_empty())
            .map(|node| node.estimate_hours)
            .sum()
    }
}

/// Pre-order iterator over a [`WbsTree`].
pub struct Nodes<'a> {
    stack: Vec<&'a WbsNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a WbsNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order iterator yielding `(depth, node)` pairs.
pub struct NodesWithDepth<'a> {
    stack: Vec<(usize, &'a WbsNode)>,
}

impl<'a> Iterator for NodesWithDepth<'a> {
    type Item = (usize, &'a WbsNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_and_task_hours() {
        let mut tree = WbsTree::new();
        let phase = tree.add_root("Phase 1");
        let task_a = tree.add_child(phase, "Task A").unwrap();
        tree.set_estimate_hours(task_a, 40.0).unwrap();
        assert_eq!(tree.total_hours(), 40.0);

        let task_b = tree.add_child(phase, "Task B").unwrap();
        tree.set_estimate_hours(task_b, 10.0).unwrap();
        assert_eq!(tree.total_hours(), 50.0);
    }

    #[test]
    fn test_interior_nodes_count_towards_total() {
        let mut tree = WbsTree::new();
        let phase = tree.add_root("Design");
        let task = tree.add_child(phase, "Wireframes").unwrap();
        tree.set_estimate_hours(phase, 8.0).unwrap();
        tree.set_estimate_hours(task, 16.0).unwrap();

        assert_eq!(tree.total_hours(), 24.0);
        assert_eq!(tree.leaf_hours(), 16.0);
    }

    #[test]
    fn test_ids_unique_across_forest() {
        let mut tree = WbsTree::new();
        let a = tree.add_root("A");
        let b = tree.add_root("B");
        let a1 = tree.add_child(a, "A1").unwrap();
        let b1 = tree.add_child(b, "B1").unwrap();
        let b1x = tree.add_child(b1, "B1x").unwrap();

        let mut ids: Vec<u64> = tree.iter().map(|n| n.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!([a, b, a1, b1, b1x].iter().all(|id| tree.contains(*id)));
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut tree = WbsTree::new();
        let a = tree.add_root("A");
        let b = tree.add_root("B");
        tree.remove(b);
        let c = tree.add_root("C");
        assert_ne!(b, c);
        assert!(c > a);
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut tree = WbsTree::new();
        tree.add_root("A");
        let err = tree.add_child(99, "orphan").unwrap_err();
        assert!(matches!(err, DraftError::NodeNotFound { id: 99 }));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_rename_and_code() {
        let mut tree = WbsTree::new();
        let a = tree.add_root("A");
        let child = tree.add_child(a, "child").unwrap();
        tree.rename(child, "Build").unwrap();
        tree.set_code(child, Some("1.1".to_string())).unwrap();

        let node = tree.find(child).unwrap();
        assert_eq!(node.name, "Build");
        assert_eq!(node.code.as_deref(), Some("1.1"));

        tree.set_code(child, Some("  ".to_string())).unwrap();
        assert_eq!(tree.find(child).unwrap().code, None);

        assert!(matches!(
            tree.rename(404, "x"),
            Err(DraftError::NodeNotFound { id: 404 })
        ));
    }

    #[test]
    fn test_negative_hours_rejected() {
        let mut tree = WbsTree::new();
        let a = tree.add_root("A");
        tree.set_estimate_hours(a, 5.0).unwrap();

        let err = tree.set_estimate_hours(a, -1.0).unwrap_err();
        assert!(matches!(err, DraftError::InvalidArgument { .. }));
        assert!(tree.set_estimate_hours(a, f64::NAN).is_err());
        assert_eq!(tree.find(a).unwrap().estimate_hours, 5.0);
    }

    #[test]
    fn test_remove_subtree_updates_total() {
        let mut tree = WbsTree::new();
        let p1 = tree.add_root("Phase 1");
        let p2 = tree.add_root("Phase 2");
        let t1 = tree.add_child(p1, "T1").unwrap();
        let t2 = tree.add_child(t1, "T2").unwrap();
        let t3 = tree.add_child(p2, "T3").unwrap();
        tree.set_estimate_hours(p1, 2.0).unwrap();
        tree.set_estimate_hours(t1, 3.0).unwrap();
        tree.set_estimate_hours(t2, 5.0).unwrap();
        tree.set_estimate_hours(t3, 7.0).unwrap();

        let before = tree.total_hours();
        let removed = tree.remove(t1).expect("node should be removed");
        assert_eq!(removed.subtree_hours(), 8.0);
        assert_eq!(removed.subtree_len(), 2);
        assert_eq!(tree.total_hours(), before - 8.0);
        assert!(!tree.contains(t1));
        assert!(!tree.contains(t2));
        assert!(tree.contains(p1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut tree = WbsTree::new();
        tree.add_root("A");
        let snapshot = tree.clone();
        assert!(tree.remove(1234).is_none());
        assert_eq!(tree, snapshot);
    }

    #[test]
    fn test_preorder_with_depth() {
        let mut tree = WbsTree::new();
        let a = tree.add_root("A");
        let a1 = tree.add_child(a, "A1").unwrap();
        tree.add_child(a1, "A1a").unwrap();
        tree.add_child(a, "A2").unwrap();
        tree.add_root("B");

        let visited: Vec<(usize, &str)> = tree
            .iter_with_depth()
            .map(|(depth, node)| (depth, node.name.as_str()))
            .collect();
        assert_eq!(
            visited,
            vec![(0, "A"), (1, "A1"), (2, "A1a"), (1, "A2"), (0, "B")]
        );
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut tree = WbsTree::new();
        let mut parent = tree.add_root("root");
        for i in 0..10_000 {
            parent = tree.add_child(parent, format!("level {i}")).unwrap();
            if i % 1000 == 0 {
                tree.set_estimate_hours(parent, 1.0).unwrap();
            }
        }
        assert_eq!(tree.len(), 10_001);
        assert_eq!(tree.total_hours(), 10.0);
        assert!(tree.find(parent).is_some());

        let root_id = tree.roots()[0].id;
        let removed = tree.remove(root_id).unwrap();
        assert!(tree.is_empty());
        assert_eq!(removed.subtree_len(), 10_001);
        drop(removed);
    }

    #[test]
    fn test_rows_roundtrip_keeps_order() {
        let mut tree = WbsTree::new();
        let a = tree.add_root("A");
        let a1 = tree.add_child(a, "A1").unwrap();
        tree.add_child(a1, "A1a").unwrap();
        tree.add_child(a, "A2").unwrap();
        let b = tree.add_root("B");
        tree.set_code(b, Some("2".to_string())).unwrap();
        tree.remove(b);

        let rebuilt = WbsTree::from_rows(tree.rows(), tree.next_id()).unwrap();
        assert_eq!(rebuilt, tree);
        assert_eq!(rebuilt.clone().add_root("C"), 6);
    }

    #[test]
    fn test_from_rows_rejects_orphans_and_duplicates() {
        let row = |id, parent_id| WbsRow {
            id,
            parent_id,
            depth: 0,
            code: None,
            name: format!("node {id}"),
            estimate_hours: 0.0,
        };

        let err = WbsTree::from_rows(vec![row(2, Some(1)), row(1, None)], 0).unwrap_err();
        assert!(matches!(err, DraftError::InvalidArgument { .. }));

        let err = WbsTree::from_rows(vec![row(1, None), row(1, None)], 0).unwrap_err();
        assert!(matches!(err, DraftError::InvalidArgument { .. }));
    }

    #[test]
    fn test_serialized_form_is_flat() {
        let mut tree = WbsTree::new();
        let phase = tree.add_root("Phase 1");
        tree.add_child(phase, "Task A").unwrap();

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["next_id"], 3);
        assert_eq!(value["nodes"][1]["parent_id"], 1);
        assert!(value["nodes"][0].get("children").is_none());

        let json = r#"{"nodes":[{"id":7,"parent_id":null,"name":"Legacy"},{"id":9,"parent_id":7,"name":"Child"}]}"#;
        let mut restored: WbsTree = serde_json::from_str(json).unwrap();
        assert_eq!(restored.find(7).unwrap().children[0].id, 9);
        assert_eq!(restored.add_root("Fresh"), 10);
    }

    #[test]
    fn test_deep_tree_clone_compare_and_serde() {
        let mut tree = WbsTree::new();
        let mut parent = tree.add_root("root");
        for i in 0..5_000 {
            parent = tree.add_child(parent, format!("level {i}")).unwrap();
        }

        let copy = tree.clone();
        assert_eq!(copy, tree);

        let json = serde_json::to_string(&tree).unwrap();
        let restored: WbsTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 5_001);
        assert_eq!(restored.iter_with_depth().last().map(|(d, _)| d), Some(5_000));
    }
}
