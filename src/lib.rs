//! # Policy-Gate
//!
//! Bidirectional policy rule transformation and validation for onchain
//! operation gating.
//!
//! This crate maps a user-facing policy grammar — rules that accept or
//! reject blockchain operations such as sending a transaction, signing a
//! hash, or signing EIP-712 typed data — to and from the wire format
//! consumed by a remote authorization service, and back, losslessly.
//!
//! ## Features
//!
//! - **Validated construction**: no criterion instance exists in an
//!   invalid state; address formats, numeric encodings, and cardinality
//!   limits are checked before anything reaches the wire
//! - **Typed discriminants**: operations and criterion types are tagged
//!   unions, so dispatch is exhaustive and unknown tags fail as values,
//!   not as parse errors
//! - **Symmetric transformers**: `from_wire(to_wire(rules)) == rules` for
//!   every valid rule
//!
//! ## Quick Start
//!
//! ```rust
//! use policy_gate::{
//!     from_wire, to_wire, Action, Criterion, EthValueCriterion, Operation, Rule,
//!     ValueOperator,
//! };
//!
//! let criterion = Criterion::EthValue(
//!     EthValueCriterion::new("1000000000000000000", ValueOperator::GreaterThan).unwrap(),
//! );
//! let rule = Rule::new(Action::Reject, Operation::SendEvmTransaction, vec![criterion]).unwrap();
//!
//! let wire = to_wire(std::slice::from_ref(&rule)).unwrap();
//! let back = from_wire(&wire).unwrap();
//! assert_eq!(back, vec![rule]);
//! ```
//!
//! ## Concurrency
//!
//! The engine is purely computational: no I/O, no shared state. Both
//! transformers are reentrant and may be called from any number of threads
//! on independent inputs.

// Module declarations
pub mod error;
pub mod policy;
pub mod transform;
pub mod validation;
pub mod wire;

// Re-export core functionality
pub use transform::{from_wire, to_wire};

// Re-export types
pub use error::{PolicyError, Result};
pub use policy::{
    Abi, Action, CreatePolicyOptions, Criterion, EthValueCriterion, EvmAddressCriterion,
    EvmDataCondition, EvmDataConditionParam, EvmDataCriterion, EvmDataParameterCondition,
    EvmDataParameterConditionList, EvmMessageCriterion, EvmNetworkCriterion,
    EvmTypedAddressCondition, EvmTypedDataCondition, EvmTypedNumericalCondition,
    EvmTypedStringCondition, KnownAbiType, ListPoliciesResult, MembershipOperator, Network,
    Operation, OrderedOperator, Policy, PolicyScope, Rule, SignEvmTypedDataFieldCriterion,
    SignEvmTypedDataVerifyingContractCriterion, SolAddressCriterion, TypedDataFieldDef,
    TypedDataTypes, UpdatePolicyOptions, ValueOperator,
};
pub use wire::{WireCriterion, WireRule};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_full_flow() {
        let criteria = vec![
            Criterion::EthValue(
                EthValueCriterion::new("1000000000000000000", ValueOperator::GreaterThan).unwrap(),
            ),
            Criterion::EvmNetwork(EvmNetworkCriterion {
                networks: vec![Network::Base, Network::BaseSepolia],
                operator: MembershipOperator::In,
            }),
        ];
        let rules = vec![
            Rule::new(Action::Reject, Operation::SendEvmTransaction, criteria).unwrap(),
            Rule::new(Action::Accept, Operation::SignEvmHash, Vec::new()).unwrap(),
        ];

        let wire = to_wire(&rules).unwrap();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].operation, "sendEvmTransaction");
        assert!(wire[1].criteria.is_none());

        let back = from_wire(&wire).unwrap();
        assert_eq!(back, rules);
    }

    #[test]
    fn test_policy_container_round_trip() {
        let rule = Rule::new(Action::Accept, Operation::SignEvmHash, Vec::new()).unwrap();
        let policy = Policy {
            id: "9f32c1aa".to_owned(),
            description: None,
            scope: PolicyScope::Project,
            rules: vec![rule],
            created_at: "2025-03-01T10:00:00Z".to_owned(),
            updated_at: "2025-03-01T10:00:00Z".to_owned(),
        };

        let json = serde_json::to_string(&policy).unwrap();
        let back: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
