//! Playbook data types.

use std::fmt;

use layered_contract_tree::ClauseNode;
use serde::{Deserialize, Serialize};

use crate::error::PlaybookResult;

/// Which builtin check a rule runs.
///
/// Unrecognized `type` strings deserialize to [`RuleKind::Unknown`] and
/// produce no findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    MustHaveClause,
    ForbiddenPhrase,
    NumericLimit,
    PreferredWording,
    CheckDefinedTerms,
    CheckCrossReferences,
    CheckNumbering,
    CheckPartyNames,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleKind::MustHaveClause => "must_have_clause",
            RuleKind::ForbiddenPhrase => "forbidden_phrase",
            RuleKind::NumericLimit => "numeric_limit",
            RuleKind::PreferredWording => "preferred_wording",
            RuleKind::CheckDefinedTerms => "check_defined_terms",
            RuleKind::CheckCrossReferences => "check_cross_references",
            RuleKind::CheckNumbering => "check_numbering",
            RuleKind::CheckPartyNames => "check_party_names",
            RuleKind::Unknown => "unknown",
        })
    }
}

/// A single playbook rule.
///
/// Field names follow the persisted JSON layout (`clauseName`, `policyText`,
/// `semantic_policy`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// `must_have_clause`: the clause that must be present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_name: Option<String>,
    /// `forbidden_phrase`: the phrase to flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Semantic rules: substring selecting the clause to evaluate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
    /// Semantic rules: the policy the clause is checked against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_text: Option<String>,
    #[serde(rename = "semantic_policy", default)]
    pub semantic_policy: bool,
}

impl Rule {
    pub fn new(id: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: id.into(),
            kind,
            clause_name: None,
            phrase: None,
            text: None,
            clause: None,
            policy_text: None,
            semantic_policy: false,
        }
    }

    pub fn must_have_clause(id: impl Into<String>, clause_name: impl Into<String>) -> Self {
        Self {
            clause_name: Some(clause_name.into()),
            ..Self::new(id, RuleKind::MustHaveClause)
        }
    }

    pub fn forbidden_phrase(id: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            phrase: Some(phrase.into()),
            ..Self::new(id, RuleKind::ForbiddenPhrase)
        }
    }

    /// A rule handed to a [`SemanticEvaluator`](crate::SemanticEvaluator).
    pub fn semantic(
        id: impl Into<String>,
        clause: impl Into<String>,
        policy_text: impl Into<String>,
    ) -> Self {
        Self {
            clause: Some(clause.into()),
            policy_text: Some(policy_text.into()),
            semantic_policy: true,
            ..Self::new(id, RuleKind::Unknown)
        }
    }
}

/// A named, ordered set of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playbook {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl Playbook {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn from_json(json: &str) -> PlaybookResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> PlaybookResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One problem a rule found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: Rule,
    pub message: String,
    /// The clause the finding is about, when it is about one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause: Option<ClauseNode>,
    /// Replacement wording proposed by a semantic evaluator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(rule: &Rule, message: impl Into<String>) -> Self {
        Self {
            rule: rule.clone(),
            message: message.into(),
            clause: None,
            suggestion: None,
        }
    }

    pub fn with_clause(mut self, clause: &ClauseNode) -> Self {
        self.clause = Some(clause.clone());
        self
    }
}

/// Findings of one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub findings: Vec<Finding>,
}

impl RuleResult {
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Finding messages, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.findings.iter().map(|f| f.message.as_str()).collect()
    }
}

impl From<Vec<Finding>> for RuleResult {
    fn from(findings: Vec<Finding>) -> Self {
        Self { findings }
    }
}
