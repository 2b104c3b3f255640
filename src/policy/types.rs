//! Policy containers and service-facing option types.
//!
//! A [`Policy`] is an immutable value object from the engine's perspective:
//! built by the caller, passed through the transformers, never mutated in
//! place. Updates produce a new `Policy`.

use serde::{Deserialize, Serialize};

use crate::policy::rules::Rule;

/// Whether a policy applies to the whole project or a single account.
///
/// The remote service enforces that at most one project-scoped policy
/// exists at any time; this crate does not check that locally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyScope {
    Project,
    Account,
}

/// A named, scoped, ordered collection of rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier assigned by the service.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scope: PolicyScope,
    pub rules: Vec<Rule>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 timestamp of the last update.
    pub updated_at: String,
}

/// One page of policies returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPoliciesResult {
    pub policies: Vec<Policy>,
    /// Opaque pagination cursor. `None` means there are no further pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Options for creating a policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatePolicyOptions {
    pub scope: PolicyScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rules: Vec<Rule>,
}

/// Options for updating an existing policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdatePolicyOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rules: Vec<Rule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::criteria::{Criterion, EthValueCriterion, ValueOperator};
    use crate::policy::rules::{Action, Operation, Rule};

    fn sample_policy() -> Policy {
        let criterion = Criterion::EthValue(
            EthValueCriterion::new("1000000000000000000", ValueOperator::GreaterThan).unwrap(),
        );
        Policy {
            id: "policy-1".to_owned(),
            description: Some("reject large sends".to_owned()),
            scope: PolicyScope::Account,
            rules: vec![
                Rule::new(Action::Reject, Operation::SendEvmTransaction, vec![criterion]).unwrap(),
            ],
            created_at: "2025-01-01T00:00:00Z".to_owned(),
            updated_at: "2025-01-02T00:00:00Z".to_owned(),
        }
    }

    #[test]
    fn policy_serde_round_trip() {
        let policy = sample_policy();
        let json = serde_json::to_string(&policy).unwrap();
        let back: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }

    #[test]
    fn list_result_token_absence_means_last_page() {
        let result: ListPoliciesResult =
            serde_json::from_str(r#"{"policies":[]}"#).unwrap();
        assert!(result.next_page_token.is_none());

        let result: ListPoliciesResult =
            serde_json::from_str(r#"{"policies":[],"next_page_token":"abc"}"#).unwrap();
        assert_eq!(result.next_page_token.as_deref(), Some("abc"));
    }
}
