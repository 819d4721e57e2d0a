//! Recursive AND/OR probability folding.

use threatrisk_core::config::LogicPolicy;
use threatrisk_core::errors::TreeError;
use threatrisk_core::types::{AttackTree, AttackTreeNode, GateLogic, ThreatIndex};

use super::types::{NodeEvaluation, NodeKind};

/// Probability that every child succeeds, assuming independence.
/// Zero children yields 0.0: an empty gate cannot succeed.
pub fn combine_and(probabilities: &[f64]) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    probabilities.iter().product()
}

/// Probability that at least one child succeeds, assuming independence.
/// Zero children yields 0.0.
pub fn combine_or(probabilities: &[f64]) -> f64 {
    if probabilities.is_empty() {
        return 0.0;
    }
    1.0 - probabilities.iter().map(|p| 1.0 - p).product::<f64>()
}

/// Evaluates attack trees against a threat index.
///
/// Pure: neither the tree nor the index is modified. Children are visited in
/// declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackTreeEvaluator {
    policy: LogicPolicy,
}

/// Gate logic after the unrecognized-logic policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

impl AttackTreeEvaluator {
    pub fn new(policy: LogicPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LogicPolicy {
        self.policy
    }

    /// Success probability of `node`.
    ///
    /// - absent node: 0.0
    /// - reference: the threat's probability, or 0.0 when the id does not
    ///   resolve or the threat has no probability (an inactive branch, not
    ///   an error)
    /// - gate: AND / OR fold of its children, 0.0 when it has none
    ///
    /// Children are treated as independent events.
    pub fn evaluate(
        &self,
        node: Option<&AttackTreeNode>,
        index: &ThreatIndex,
    ) -> Result<f64, TreeError> {
        match node {
            None => Ok(0.0),
            Some(node) => self.fold(node, index),
        }
    }

    /// Success probability of a whole tree. The `root` label is display only.
    pub fn evaluate_tree(&self, tree: &AttackTree, index: &ThreatIndex) -> Result<f64, TreeError> {
        let probability = self.fold(&tree.node, index)?;
        tracing::debug!(
            tree = tree.label(),
            tree_probability = probability,
            "attack tree evaluated"
        );
        Ok(probability)
    }

    /// Like [`evaluate`](Self::evaluate) but returns the probability of
    /// every node, for reports and tree renderers.
    pub fn explain(
        &self,
        node: &AttackTreeNode,
        index: &ThreatIndex,
    ) -> Result<NodeEvaluation, TreeError> {
        match node {
            AttackTreeNode::Reference { threat_ref } => {
                let resolved = index.resolve(threat_ref);
                Ok(NodeEvaluation {
                    kind: NodeKind::Reference {
                        threat_ref: threat_ref.clone(),
                        resolved: resolved.is_some(),
                    },
                    probability: resolved.unwrap_or(0.0),
                    children: Vec::new(),
                })
            }
            AttackTreeNode::Gate { logic, children } => {
                let combinator = self.combinator(logic)?;
                let children = children
                    .iter()
                    .map(|child| self.explain(child, index))
                    .collect::<Result<Vec<_>, _>>()?;
                let probabilities: Vec<f64> = children.iter().map(|c| c.probability).collect();
                let (logic, probability) = match combinator {
                    Combinator::And => ("AND", combine_and(&probabilities)),
                    Combinator::Or => ("OR", combine_or(&probabilities)),
                };
                Ok(NodeEvaluation {
                    kind: NodeKind::Gate {
                        logic: logic.to_string(),
                    },
                    probability,
                    children,
                })
            }
        }
    }

    fn fold(&self, node: &AttackTreeNode, index: &ThreatIndex) -> Result<f64, TreeError> {
        match node {
            AttackTreeNode::Reference { threat_ref } => {
                let resolved = index.resolve(threat_ref);
                if resolved.is_none() {
                    tracing::debug!(
                        threat_ref = %threat_ref,
                        "unresolved reference contributes 0.0"
                    );
                }
                Ok(resolved.unwrap_or(0.0))
            }
            AttackTreeNode::Gate { logic, children } => {
                let combinator = self.combinator(logic)?;
                let probabilities = children
                    .iter()
                    .map(|child| self.fold(child, index))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match combinator {
                    Combinator::And => combine_and(&probabilities),
                    Combinator::Or => combine_or(&probabilities),
                })
            }
        }
    }

    fn combinator(&self, logic: &GateLogic) -> Result<Combinator, TreeError> {
        match logic {
            GateLogic::And => Ok(Combinator::And),
            GateLogic::Or => Ok(Combinator::Or),
            GateLogic::Unrecognized(raw) => match self.policy {
                LogicPolicy::Lenient => {
                    tracing::warn!(logic = %raw, "unrecognized gate logic, treating as OR");
                    Ok(Combinator::Or)
                }
                LogicPolicy::Strict => Err(TreeError::UnrecognizedLogic { logic: raw.clone() }),
            },
        }
    }
}
