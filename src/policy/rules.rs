//! Rules bind an action to criteria for one operation.
//!
//! Each operation admits a fixed set of criterion types; [`Rule::new`]
//! enforces that table at construction and the transformers re-check it at
//! dispatch, so an illegal pairing never reaches the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, Result};
use crate::policy::criteria::Criterion;

/// Whether matching a rule accepts or rejects the gated operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Accept,
    Reject,
}

/// The kind of blockchain action a rule gates.
///
/// Unrecognized tags survive deserialization as [`Operation::Other`] and are
/// rejected at transformer dispatch with
/// [`PolicyError::UnknownOperation`], not at parse time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    SendEvmTransaction,
    SignEvmTransaction,
    SignEvmHash,
    SignEvmMessage,
    SignEvmTypedData,
    SignSolTransaction,
    /// An operation tag this crate does not recognize.
    Other(String),
}

impl Operation {
    pub fn as_str(&self) -> &str {
        match self {
            Operation::SendEvmTransaction => "sendEvmTransaction",
            Operation::SignEvmTransaction => "signEvmTransaction",
            Operation::SignEvmHash => "signEvmHash",
            Operation::SignEvmMessage => "signEvmMessage",
            Operation::SignEvmTypedData => "signEvmTypedData",
            Operation::SignSolTransaction => "signSolTransaction",
            Operation::Other(tag) => tag,
        }
    }
}

impl From<String> for Operation {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "sendEvmTransaction" => Operation::SendEvmTransaction,
            "signEvmTransaction" => Operation::SignEvmTransaction,
            "signEvmHash" => Operation::SignEvmHash,
            "signEvmMessage" => Operation::SignEvmMessage,
            "signEvmTypedData" => Operation::SignEvmTypedData,
            "signSolTransaction" => Operation::SignSolTransaction,
            _ => Operation::Other(tag),
        }
    }
}

impl From<Operation> for String {
    fn from(operation: Operation) -> Self {
        operation.as_str().to_owned()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criterion `type` tags legal for an operation, or `None` for an
/// unrecognized operation.
pub(crate) fn allowed_criteria(operation: &Operation) -> Option<&'static [&'static str]> {
    match operation {
        Operation::SendEvmTransaction => {
            Some(&["ethValue", "evmAddress", "evmNetwork", "evmData"])
        }
        Operation::SignEvmTransaction => Some(&["ethValue", "evmAddress", "evmData"]),
        Operation::SignEvmHash => Some(&[]),
        Operation::SignEvmMessage => Some(&["evmMessage"]),
        Operation::SignEvmTypedData => {
            Some(&["evmTypedDataField", "evmTypedDataVerifyingContract"])
        }
        Operation::SignSolTransaction => Some(&["solAddress"]),
        Operation::Other(_) => None,
    }
}

/// An (action, operation, criteria) triple describing when to accept or
/// reject an operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub action: Action,
    pub operation: Operation,
    /// Criteria that must all match for the rule to apply. Always empty for
    /// `signEvmHash`; empty on other operations means the rule always
    /// matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,
}

impl Rule {
    /// Build a rule, enforcing the operation's criterion legality table.
    ///
    /// Criteria validate their own fields at their construction; no
    /// cross-criterion checks happen here.
    pub fn new(action: Action, operation: Operation, criteria: Vec<Criterion>) -> Result<Self> {
        let allowed = allowed_criteria(&operation).ok_or_else(|| PolicyError::UnknownOperation {
            operation: operation.to_string(),
        })?;
        for criterion in &criteria {
            if !allowed.contains(&criterion.kind()) {
                return Err(PolicyError::UnknownCriterionType {
                    operation: operation.to_string(),
                    criterion_type: criterion.kind().to_owned(),
                });
            }
        }
        Ok(Self {
            action,
            operation,
            criteria,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::criteria::{
        EvmMessageCriterion, EvmNetworkCriterion, MembershipOperator, Network,
    };

    fn network_criterion() -> Criterion {
        Criterion::EvmNetwork(EvmNetworkCriterion {
            networks: vec![Network::Base],
            operator: MembershipOperator::In,
        })
    }

    #[test]
    fn operation_tags_round_trip() {
        for tag in [
            "sendEvmTransaction",
            "signEvmTransaction",
            "signEvmHash",
            "signEvmMessage",
            "signEvmTypedData",
            "signSolTransaction",
        ] {
            let operation = Operation::from(tag.to_owned());
            assert!(!matches!(operation, Operation::Other(_)));
            assert_eq!(operation.as_str(), tag);
        }

        let unknown = Operation::from("mintNft".to_owned());
        assert_eq!(unknown, Operation::Other("mintNft".to_owned()));
    }

    #[test]
    fn rule_construction_enforces_legality() {
        // evmNetwork is legal for sendEvmTransaction only
        assert!(Rule::new(
            Action::Accept,
            Operation::SendEvmTransaction,
            vec![network_criterion()],
        )
        .is_ok());

        let err = Rule::new(
            Action::Accept,
            Operation::SignEvmTransaction,
            vec![network_criterion()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            PolicyError::UnknownCriterionType {
                operation: "signEvmTransaction".to_owned(),
                criterion_type: "evmNetwork".to_owned(),
            }
        );
    }

    #[test]
    fn sign_evm_hash_admits_no_criteria() {
        assert!(Rule::new(Action::Reject, Operation::SignEvmHash, Vec::new()).is_ok());

        let criterion = Criterion::EvmMessage(EvmMessageCriterion {
            pattern: ".*".to_owned(),
        });
        assert!(Rule::new(Action::Reject, Operation::SignEvmHash, vec![criterion]).is_err());
    }

    #[test]
    fn unknown_operation_fails_construction() {
        let err = Rule::new(
            Action::Accept,
            Operation::Other("unknownOp".to_owned()),
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PolicyError::UnknownOperation {
                operation: "unknownOp".to_owned(),
            }
        );
    }

    #[test]
    fn hash_rule_serializes_without_criteria_field() {
        let rule = Rule::new(Action::Accept, Operation::SignEvmHash, Vec::new()).unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["operation"], "signEvmHash");
        assert!(json.get("criteria").is_none());
    }
}
