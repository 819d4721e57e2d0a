//! Per-node evaluation breakdown.

use serde::Serialize;

/// What an evaluated node was.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Threat reference; `resolved` is false when the id is unknown or the
    /// threat carries no probability.
    Reference { threat_ref: String, resolved: bool },
    /// Gate with the logic actually applied (AND or OR).
    Gate { logic: String },
}

/// Probability of one node plus the breakdown of its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEvaluation {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub probability: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeEvaluation>,
}

impl NodeEvaluation {
    /// Short display label: the threat id or the gate logic.
    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Reference { threat_ref, .. } => threat_ref,
            NodeKind::Gate { logic } => logic,
        }
    }

    /// Threat ids referenced in this subtree that did not resolve.
    pub fn unresolved_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_unresolved(&mut out);
        out
    }

    fn collect_unresolved<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let NodeKind::Reference {
            threat_ref,
            resolved: false,
        } = &self.kind
        {
            out.push(threat_ref);
        }
        for child in &self.children {
            child.collect_unresolved(out);
        }
    }
}
