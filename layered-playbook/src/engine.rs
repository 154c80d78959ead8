use layered_contract_tree::{ClauseNode, ContractTree};
use serde::{Deserialize, Serialize};

use crate::builtins::run_builtin;
use crate::rule::{Finding, Playbook, Rule, RuleResult};

/// Outcome of a semantic policy check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticResult {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SemanticResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Judges a clause against a rule's policy text.
///
/// Implementations own their failure handling: an unreachable backend is
/// reported as a message, not an error.
pub trait SemanticEvaluator {
    fn evaluate(&mut self, clause: &ClauseNode, rule: &Rule) -> SemanticResult;
}

/// Used when no semantic backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEvaluator;

impl SemanticEvaluator for UnavailableEvaluator {
    fn evaluate(&mut self, _clause: &ClauseNode, rule: &Rule) -> SemanticResult {
        SemanticResult::new(format!(
            "Semantic evaluation is not configured; rule '{}' was not checked.",
            rule.id
        ))
    }
}

impl<F> SemanticEvaluator for F
where
    F: FnMut(&ClauseNode, &Rule) -> SemanticResult,
{
    fn evaluate(&mut self, clause: &ClauseNode, rule: &Rule) -> SemanticResult {
        self(clause, rule)
    }
}

/// Evaluate every rule of `playbook`, returning one result per rule in order.
///
/// Semantic rules are sent to `evaluator` with the first clause whose text
/// contains the rule's `clause` string (no string matches the first clause);
/// everything else goes to the builtin checks.
pub fn run_playbook(
    playbook: &Playbook,
    tree: &ContractTree,
    evaluator: &mut dyn SemanticEvaluator,
) -> Vec<RuleResult> {
    playbook
        .rules
        .iter()
        .map(|rule| {
            if rule.semantic_policy {
                run_semantic(rule, tree, evaluator)
            } else {
                run_builtin(rule, tree)
            }
        })
        .collect()
}

fn run_semantic(
    rule: &Rule,
    tree: &ContractTree,
    evaluator: &mut dyn SemanticEvaluator,
) -> RuleResult {
    let needle = rule.clause.as_deref().unwrap_or("");
    let clause = match tree.clauses().find(|clause| clause.text.contains(needle)) {
        Some(clause) => clause,
        None => {
            log::debug!("rule {:?}: no clause contains {:?}", rule.id, needle);
            return RuleResult::default();
        }
    };

    let result = evaluator.evaluate(clause, rule);
    let finding = Finding {
        suggestion: result.suggestion,
        ..Finding::new(rule, result.message).with_clause(clause)
    };
    vec![finding].into()
}
