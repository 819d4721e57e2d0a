//! Attack tree data shapes.
//!
//! Wire format:
//! - reference: `{ "ref": "<threat id>" }`
//! - gate: `{ "logic": "AND" | "OR", "children": [ ... ] }`
//! - top-level tree: a gate or reference plus an optional display `root` label.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_TREE_LABEL;
use crate::errors::TreeError;

/// Boolean combinator of a gate node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum GateLogic {
    And,
    #[default]
    Or,
    /// A logic string that is neither AND nor OR, kept verbatim so the
    /// evaluator's policy decides how to treat it.
    Unrecognized(String),
}

impl GateLogic {
    /// Parse a raw logic string, case-insensitively. Absent means OR.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Or,
            Some(s) => match s.trim().to_ascii_uppercase().as_str() {
                "AND" => Self::And,
                "OR" => Self::Or,
                _ => Self::Unrecognized(s.to_string()),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for GateLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a logical attack tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTreeNode", into = "RawTreeNode")]
pub enum AttackTreeNode {
    /// Leaf pointing at a threat id.
    Reference { threat_ref: String },
    /// Internal AND/OR gate over ordered children.
    Gate {
        logic: GateLogic,
        children: Vec<AttackTreeNode>,
    },
}

impl AttackTreeNode {
    pub fn reference(threat_ref: impl Into<String>) -> Self {
        Self::Reference {
            threat_ref: threat_ref.into(),
        }
    }

    pub fn gate(logic: GateLogic, children: Vec<AttackTreeNode>) -> Self {
        Self::Gate { logic, children }
    }

    pub fn and(children: Vec<AttackTreeNode>) -> Self {
        Self::gate(GateLogic::And, children)
    }

    pub fn or(children: Vec<AttackTreeNode>) -> Self {
        Self::gate(GateLogic::Or, children)
    }

    /// Children of a gate; empty for a reference.
    pub fn children(&self) -> &[AttackTreeNode] {
        match self {
            Self::Reference { .. } => &[],
            Self::Gate { children, .. } => children,
        }
    }

    /// Every threat id referenced in this subtree, in pre-order.
    pub fn referenced_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_refs(&mut ids);
        ids
    }

    fn collect_refs<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            Self::Reference { threat_ref } => ids.push(threat_ref),
            Self::Gate { children, .. } => {
                for child in children {
                    child.collect_refs(ids);
                }
            }
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }
}

/// Wire shape of an attack tree node before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTreeNode {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawTreeNode>>,
}

impl TryFrom<RawTreeNode> for AttackTreeNode {
    type Error = TreeError;

    fn try_from(raw: RawTreeNode) -> Result<Self, Self::Error> {
        match (raw.reference, raw.children) {
            (Some(threat_ref), children) => {
                if children.is_some_and(|c| !c.is_empty()) {
                    return Err(TreeError::ReferenceWithChildren { threat_ref });
                }
                Ok(Self::Reference { threat_ref })
            }
            (None, Some(children)) => {
                let children = children
                    .into_iter()
                    .map(AttackTreeNode::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Gate {
                    logic: GateLogic::parse(raw.logic.as_deref()),
                    children,
                })
            }
            (None, None) => Err(TreeError::MissingRefAndChildren),
        }
    }
}

impl From<AttackTreeNode> for RawTreeNode {
    fn from(node: AttackTreeNode) -> Self {
        match node {
            AttackTreeNode::Reference { threat_ref } => Self {
                reference: Some(threat_ref),
                ..Self::default()
            },
            AttackTreeNode::Gate { logic, children } => Self {
                reference: None,
                logic: Some(logic.as_str().to_string()),
                children: Some(children.into_iter().map(RawTreeNode::from).collect()),
            },
        }
    }
}

/// A complete attack tree: a display label plus its root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttackTree", into = "RawAttackTree")]
pub struct AttackTree {
    /// Display-only label; not used in probability computation.
    pub root: Option<String>,
    pub node: AttackTreeNode,
}

impl AttackTree {
    pub fn new(root: Option<String>, node: AttackTreeNode) -> Self {
        Self { root, node }
    }

    /// The `root` label, or `"root"` when absent.
    pub fn label(&self) -> &str {
        self.root.as_deref().unwrap_or(DEFAULT_TREE_LABEL)
    }
}

/// Wire shape of a top-level attack tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAttackTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(flatten)]
    pub node: RawTreeNode,
}

impl TryFrom<RawAttackTree> for AttackTree {
    type Error = TreeError;

    fn try_from(raw: RawAttackTree) -> Result<Self, Self::Error> {
        Ok(Self {
            root: raw.root,
            node: AttackTreeNode::try_from(raw.node)?,
        })
    }
}

impl From<AttackTree> for RawAttackTree {
    fn from(tree: AttackTree) -> Self {
        Self {
            root: tree.root,
            node: tree.node.into(),
        }
    }
}

/// Validate a raw attack tree value, keeping typed errors.
pub fn parse_tree(value: Value) -> Result<AttackTree, TreeError> {
    let raw: RawAttackTree = serde_json::from_value(value).map_err(|e| TreeError::Malformed {
        message: e.to_string(),
    })?;
    AttackTree::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_logic_parse_case_insensitive() {
        assert_eq!(GateLogic::parse(Some("and")), GateLogic::And);
        assert_eq!(GateLogic::parse(Some(" Or ")), GateLogic::Or);
        assert_eq!(GateLogic::parse(None), GateLogic::Or);
        assert_eq!(
            GateLogic::parse(Some("XOR")),
            GateLogic::Unrecognized("XOR".to_string())
        );
    }

    #[test]
    fn test_node_without_ref_or_children_rejected() {
        let err = parse_tree(json!({ "logic": "AND" })).unwrap_err();
        assert_eq!(err, TreeError::MissingRefAndChildren);
    }

    #[test]
    fn test_reference_with_children_rejected() {
        let err = parse_tree(json!({ "ref": "T1", "children": [{ "ref": "T2" }] })).unwrap_err();
        assert!(matches!(err, TreeError::ReferenceWithChildren { .. }));
    }

    #[test]
    fn test_nested_error_surfaces() {
        let err = parse_tree(json!({
            "root": "Compromise",
            "logic": "OR",
            "children": [{ "ref": "T1" }, { "children": [{}] }]
        }))
        .unwrap_err();
        assert_eq!(err, TreeError::MissingRefAndChildren);
    }

    #[test]
    fn test_referenced_ids_preorder() {
        let tree = AttackTreeNode::or(vec![
            AttackTreeNode::reference("T1"),
            AttackTreeNode::and(vec![
                AttackTreeNode::reference("T2"),
                AttackTreeNode::reference("T3"),
            ]),
        ]);
        assert_eq!(tree.referenced_ids(), vec!["T1", "T2", "T3"]);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_label_defaults_to_root() {
        let tree = parse_tree(json!({ "children": [] })).unwrap();
        assert_eq!(tree.label(), "root");
    }
}
