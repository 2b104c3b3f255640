//! User-facing policy model.
//!
//! Criteria validate themselves at construction, rules enforce which
//! criterion types their operation admits, and policies aggregate rules
//! with scope and lifecycle metadata.

pub mod criteria;
pub mod rules;
pub mod types;

pub use criteria::{
    Abi, Criterion, EthValueCriterion, EvmAddressCriterion, EvmDataCondition,
    EvmDataConditionParam, EvmDataCriterion, EvmDataParameterCondition,
    EvmDataParameterConditionList, EvmMessageCriterion, EvmNetworkCriterion,
    EvmTypedAddressCondition, EvmTypedDataCondition, EvmTypedNumericalCondition,
    EvmTypedStringCondition, KnownAbiType, MembershipOperator, Network, OrderedOperator,
    SignEvmTypedDataFieldCriterion, SignEvmTypedDataVerifyingContractCriterion,
    SolAddressCriterion, TypedDataFieldDef, TypedDataTypes, ValueOperator,
};
pub use rules::{Action, Operation, Rule};
pub use types::{
    CreatePolicyOptions, ListPoliciesResult, Policy, PolicyScope, UpdatePolicyOptions,
};
