//! User-facing criterion types.
//!
//! A criterion is a single predicate evaluated against an operation's
//! parameters to decide whether a rule applies. Each variant validates its
//! own fields eagerly: the `new` constructors run every structural check,
//! and `validate` can be re-run at any time (it never fails on a value a
//! constructor accepted).
//!
//! Field names serialize under the camelCase convention used by callers;
//! the wire-format counterparts in [`crate::wire`] use snake_case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation;

/// Comparison operators available to value criteria.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueOperator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

/// Ordered-comparison operators for single-value parameter conditions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderedOperator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "==")]
    Equal,
}

/// Membership operators for list-valued conditions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipOperator {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
}

/// EVM networks a network criterion may reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "base-sepolia")]
    BaseSepolia,
    #[serde(rename = "base")]
    Base,
}

/// Contract interfaces the authorization service resolves without an
/// explicit ABI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownAbiType {
    Erc20,
    Erc721,
    Erc1155,
}

/// The ABI of the contract being called: a known interface tag, or an
/// explicit (possibly partial) ABI fragment carried as opaque JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Abi {
    Known(KnownAbiType),
    Fragment(Vec<serde_json::Value>),
}

/// Compares a transaction's ETH value in wei against a threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthValueCriterion {
    /// The value to compare against, as a decimal string of wei.
    pub eth_value: String,
    pub operator: ValueOperator,
}

impl EthValueCriterion {
    pub fn new(eth_value: impl Into<String>, operator: ValueOperator) -> Result<Self> {
        let criterion = Self {
            eth_value: eth_value.into(),
            operator,
        };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_digits("ethValue", &self.eth_value)
    }
}

/// Tests a transaction's target address against an address list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmAddressCriterion {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
}

impl EvmAddressCriterion {
    pub fn new(addresses: Vec<String>, operator: MembershipOperator) -> Result<Self> {
        let criterion = Self { addresses, operator };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_evm_addresses("addresses", &self.addresses)
    }
}

/// Tests the network a transaction is sent on. Network membership is
/// enforced by the [`Network`] enum itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmNetworkCriterion {
    pub networks: Vec<Network>,
    pub operator: MembershipOperator,
}

/// Constrains a single function parameter to an ordered comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmDataParameterCondition {
    /// Parameter name, or a positional index for unnamed parameters.
    pub name: String,
    pub operator: OrderedOperator,
    pub value: String,
}

/// Constrains a single function parameter to list membership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmDataParameterConditionList {
    pub name: String,
    pub operator: MembershipOperator,
    pub values: Vec<String>,
}

/// A parameter condition is either a single-value comparison or a list
/// membership test. Serialized without a discriminant; the two shapes are
/// told apart by the `values` vs `value` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvmDataConditionParam {
    List(EvmDataParameterConditionList),
    Single(EvmDataParameterCondition),
}

/// Constrains a contract call in the transaction's `data` field to a
/// function and, optionally, per-parameter conditions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmDataCondition {
    /// The name of the contract function being called.
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<EvmDataConditionParam>>,
}

/// Matches a transaction's calldata against an ABI and function-level
/// conditions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvmDataCriterion {
    pub abi: Abi,
    pub conditions: Vec<EvmDataCondition>,
}

impl EvmDataCriterion {
    /// Parameter operators are constrained by their types; there is nothing
    /// further to check today.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Matches the message being signed against a regular expression.
///
/// The pattern is evaluated remotely as RE2; this crate carries it opaquely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmMessageCriterion {
    #[serde(rename = "match")]
    pub pattern: String,
}

/// Constrains an address-typed field inside EIP-712 typed data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmTypedAddressCondition {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
    /// Dot-notation path to the field, e.g. `order.buyer`.
    pub path: String,
}

impl EvmTypedAddressCondition {
    pub fn new(
        addresses: Vec<String>,
        operator: MembershipOperator,
        path: impl Into<String>,
    ) -> Result<Self> {
        let condition = Self {
            addresses,
            operator,
            path: path.into(),
        };
        condition.validate()?;
        Ok(condition)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_evm_addresses("addresses", &self.addresses)
    }
}

/// Constrains a numeric field inside EIP-712 typed data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmTypedNumericalCondition {
    /// The value to compare against, as a decimal string.
    pub value: String,
    pub operator: OrderedOperator,
    pub path: String,
}

impl EvmTypedNumericalCondition {
    pub fn new(
        value: impl Into<String>,
        operator: OrderedOperator,
        path: impl Into<String>,
    ) -> Result<Self> {
        let condition = Self {
            value: value.into(),
            operator,
            path: path.into(),
        };
        condition.validate()?;
        Ok(condition)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_digits("value", &self.value)
    }
}

/// Matches a string field inside EIP-712 typed data against a regular
/// expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvmTypedStringCondition {
    #[serde(rename = "match")]
    pub pattern: String,
    pub path: String,
}

/// A condition on a single EIP-712 field. Serialized without a
/// discriminant; the shapes are told apart by field presence in the order
/// `addresses`, `value`, `match`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvmTypedDataCondition {
    Address(EvmTypedAddressCondition),
    Numerical(EvmTypedNumericalCondition),
    String(EvmTypedStringCondition),
}

impl EvmTypedDataCondition {
    pub fn validate(&self) -> Result<()> {
        match self {
            EvmTypedDataCondition::Address(c) => c.validate(),
            EvmTypedDataCondition::Numerical(c) => c.validate(),
            EvmTypedDataCondition::String(_) => Ok(()),
        }
    }
}

/// A single EIP-712 field definition: a name and a Solidity type name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedDataFieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// EIP-712 type definitions: a map of model names to field definitions plus
/// the name of the root type being signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataTypes {
    pub types: BTreeMap<String, Vec<TypedDataFieldDef>>,
    pub primary_type: String,
}

/// Constrains individual fields of the typed data being signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignEvmTypedDataFieldCriterion {
    pub types: TypedDataTypes,
    pub conditions: Vec<EvmTypedDataCondition>,
}

impl SignEvmTypedDataFieldCriterion {
    pub fn new(types: TypedDataTypes, conditions: Vec<EvmTypedDataCondition>) -> Result<Self> {
        let criterion = Self { types, conditions };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn validate(&self) -> Result<()> {
        self.conditions.iter().try_for_each(|c| c.validate())
    }
}

/// Constrains the verifying contract of the typed data being signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignEvmTypedDataVerifyingContractCriterion {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
}

impl SignEvmTypedDataVerifyingContractCriterion {
    pub fn new(addresses: Vec<String>, operator: MembershipOperator) -> Result<Self> {
        let criterion = Self { addresses, operator };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_evm_addresses("addresses", &self.addresses)
    }
}

/// Tests a Solana transaction's addresses against an address list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolAddressCriterion {
    /// Base58-encoded Solana addresses, 32 to 44 characters each.
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
}

impl SolAddressCriterion {
    pub fn new(addresses: Vec<String>, operator: MembershipOperator) -> Result<Self> {
        let criterion = Self { addresses, operator };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_sol_addresses("addresses", &self.addresses)
    }
}

/// A single predicate evaluated against an operation's parameters,
/// discriminated by its `type` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Criterion {
    EthValue(EthValueCriterion),
    EvmAddress(EvmAddressCriterion),
    EvmNetwork(EvmNetworkCriterion),
    EvmData(EvmDataCriterion),
    EvmMessage(EvmMessageCriterion),
    EvmTypedDataField(SignEvmTypedDataFieldCriterion),
    EvmTypedDataVerifyingContract(SignEvmTypedDataVerifyingContractCriterion),
    SolAddress(SolAddressCriterion),
}

impl Criterion {
    /// The `type` tag this criterion carries in serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            Criterion::EthValue(_) => "ethValue",
            Criterion::EvmAddress(_) => "evmAddress",
            Criterion::EvmNetwork(_) => "evmNetwork",
            Criterion::EvmData(_) => "evmData",
            Criterion::EvmMessage(_) => "evmMessage",
            Criterion::EvmTypedDataField(_) => "evmTypedDataField",
            Criterion::EvmTypedDataVerifyingContract(_) => "evmTypedDataVerifyingContract",
            Criterion::SolAddress(_) => "solAddress",
        }
    }

    /// Re-run every structural check. Never fails on a criterion whose
    /// fields were accepted by a constructor.
    pub fn validate(&self) -> Result<()> {
        match self {
            Criterion::EthValue(c) => c.validate(),
            Criterion::EvmAddress(c) => c.validate(),
            Criterion::EvmNetwork(_) => Ok(()),
            Criterion::EvmData(c) => c.validate(),
            Criterion::EvmMessage(_) => Ok(()),
            Criterion::EvmTypedDataField(c) => c.validate(),
            Criterion::EvmTypedDataVerifyingContract(c) => c.validate(),
            Criterion::SolAddress(c) => c.validate(),
        }
    }
}
