//! Wire-format rule representation.
//!
//! These types mirror the remote authorization service's schema: the same
//! fields as the user-facing model under the service's snake_case naming
//! (`eth_value`, `primary_type`), with rules and criteria wrapped in
//! discriminated-union envelopes keyed by `operation` and `type` tags.
//!
//! The nested sub-unions (`WireEvmDataConditionParam`,
//! `WireTypedDataCondition`) carry no discriminant on the wire; they are
//! resolved by field presence in a fixed probe order, which is exactly what
//! the untagged variant order below encodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::policy::criteria::{
    Abi, MembershipOperator, Network, OrderedOperator, TypedDataFieldDef, ValueOperator,
};
use crate::policy::rules::Action;

/// Wire form of a value-threshold criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEthValueCriterion {
    pub eth_value: String,
    pub operator: ValueOperator,
}

/// Wire form of an EVM address-list criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmAddressCriterion {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
}

/// Wire form of a network-membership criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmNetworkCriterion {
    pub networks: Vec<Network>,
    pub operator: MembershipOperator,
}

/// Wire form of a single-value parameter condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmDataParameterCondition {
    pub name: String,
    pub operator: OrderedOperator,
    pub value: String,
}

/// Wire form of a list-membership parameter condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmDataParameterConditionList {
    pub name: String,
    pub operator: MembershipOperator,
    pub values: Vec<String>,
}

/// Undiscriminated parameter condition; `values` is probed before `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireEvmDataConditionParam {
    List(WireEvmDataParameterConditionList),
    Single(WireEvmDataParameterCondition),
}

/// Wire form of a function-call condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmDataCondition {
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<WireEvmDataConditionParam>>,
}

/// Wire form of a calldata criterion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireEvmDataCriterion {
    pub abi: Abi,
    pub conditions: Vec<WireEvmDataCondition>,
}

/// Wire form of a message-pattern criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmMessageCriterion {
    #[serde(rename = "match")]
    pub pattern: String,
}

/// Wire form of an address condition on a typed-data field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmTypedAddressCondition {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
    pub path: String,
}

/// Wire form of a numerical condition on a typed-data field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmTypedNumericalCondition {
    pub value: String,
    pub operator: OrderedOperator,
    pub path: String,
}

/// Wire form of a string condition on a typed-data field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmTypedStringCondition {
    #[serde(rename = "match")]
    pub pattern: String,
    pub path: String,
}

/// Undiscriminated typed-data field condition; probed in the order
/// `addresses`, `value`, `match`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTypedDataCondition {
    Address(WireEvmTypedAddressCondition),
    Numerical(WireEvmTypedNumericalCondition),
    String(WireEvmTypedStringCondition),
}

/// Wire form of the EIP-712 type definitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTypedDataTypes {
    pub types: BTreeMap<String, Vec<TypedDataFieldDef>>,
    pub primary_type: String,
}

/// Wire form of the typed-data field criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmTypedDataFieldCriterion {
    pub types: WireTypedDataTypes,
    pub conditions: Vec<WireTypedDataCondition>,
}

/// Wire form of the verifying-contract criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvmTypedDataVerifyingContractCriterion {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
}

/// Wire form of a Solana address-list criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSolAddressCriterion {
    pub addresses: Vec<String>,
    pub operator: MembershipOperator,
}

/// Criterion envelope: the `type` tag discriminates the payload.
///
/// Envelope resolution is explicit: deserialization probes the tag, known
/// tags parse into their concrete variant, and anything else lands in
/// [`WireCriterion::Unknown`] with the payload (tag included) intact, so
/// the response transformer can fail with the offending tag instead of a
/// parse error.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum WireCriterion {
    #[serde(rename = "ethValue")]
    EthValue(WireEthValueCriterion),
    #[serde(rename = "evmAddress")]
    EvmAddress(WireEvmAddressCriterion),
    #[serde(rename = "evmNetwork")]
    EvmNetwork(WireEvmNetworkCriterion),
    #[serde(rename = "evmData")]
    EvmData(WireEvmDataCriterion),
    #[serde(rename = "evmMessage")]
    EvmMessage(WireEvmMessageCriterion),
    #[serde(rename = "evmTypedDataField")]
    EvmTypedDataField(WireEvmTypedDataFieldCriterion),
    #[serde(rename = "evmTypedDataVerifyingContract")]
    EvmTypedDataVerifyingContract(WireEvmTypedDataVerifyingContractCriterion),
    #[serde(rename = "solAddress")]
    SolAddress(WireSolAddressCriterion),
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

impl<'de> Deserialize<'de> for WireCriterion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        let criterion = match tag.as_deref() {
            Some("ethValue") => WireCriterion::EthValue(parse_payload(value)?),
            Some("evmAddress") => WireCriterion::EvmAddress(parse_payload(value)?),
            Some("evmNetwork") => WireCriterion::EvmNetwork(parse_payload(value)?),
            Some("evmData") => WireCriterion::EvmData(parse_payload(value)?),
            Some("evmMessage") => WireCriterion::EvmMessage(parse_payload(value)?),
            Some("evmTypedDataField") => WireCriterion::EvmTypedDataField(parse_payload(value)?),
            Some("evmTypedDataVerifyingContract") => {
                WireCriterion::EvmTypedDataVerifyingContract(parse_payload(value)?)
            }
            Some("solAddress") => WireCriterion::SolAddress(parse_payload(value)?),
            _ => WireCriterion::Unknown(value),
        };
        Ok(criterion)
    }
}

fn parse_payload<T, E>(value: serde_json::Value) -> Result<T, E>
where
    T: serde::de::DeserializeOwned,
    E: serde::de::Error,
{
    serde_json::from_value(value).map_err(E::custom)
}

impl WireCriterion {
    /// The envelope's `type` tag; for [`WireCriterion::Unknown`] the tag is
    /// read out of the preserved payload.
    pub fn kind(&self) -> &str {
        match self {
            WireCriterion::EthValue(_) => "ethValue",
            WireCriterion::EvmAddress(_) => "evmAddress",
            WireCriterion::EvmNetwork(_) => "evmNetwork",
            WireCriterion::EvmData(_) => "evmData",
            WireCriterion::EvmMessage(_) => "evmMessage",
            WireCriterion::EvmTypedDataField(_) => "evmTypedDataField",
            WireCriterion::EvmTypedDataVerifyingContract(_) => "evmTypedDataVerifyingContract",
            WireCriterion::SolAddress(_) => "solAddress",
            WireCriterion::Unknown(payload) => payload
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown"),
        }
    }
}

/// Rule envelope: action and operation tag, plus criteria for the
/// operations that carry them. `signEvmHash` rules have no criteria field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireRule {
    pub action: Action,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<WireCriterion>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn criterion_envelope_keeps_tag_and_snake_case_fields() {
        let criterion = WireCriterion::EthValue(WireEthValueCriterion {
            eth_value: "1000".to_owned(),
            operator: ValueOperator::GreaterThanOrEqual,
        });
        let json = serde_json::to_value(&criterion).unwrap();
        assert_eq!(json["type"], "ethValue");
        assert_eq!(json["eth_value"], "1000");
        assert_eq!(json["operator"], ">=");
    }

    #[test]
    fn unrecognized_tag_lands_in_unknown() {
        let payload = json!({
            "type": "mintAddress",
            "addresses": ["HpabPRRCFbBKSuJr5PdkVvQc85FyxyTWkFM2obBRSvHT"],
            "operator": "in",
        });
        let criterion: WireCriterion = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(criterion, WireCriterion::Unknown(payload));
        assert_eq!(criterion.kind(), "mintAddress");
    }

    #[test]
    fn typed_condition_probe_order() {
        // addresses wins over path-only shapes
        let address: WireTypedDataCondition = serde_json::from_value(json!({
            "addresses": ["0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"],
            "operator": "in",
            "path": "to",
        }))
        .unwrap();
        assert!(matches!(address, WireTypedDataCondition::Address(_)));

        let numerical: WireTypedDataCondition = serde_json::from_value(json!({
            "value": "1000",
            "operator": "<",
            "path": "amount",
        }))
        .unwrap();
        assert!(matches!(numerical, WireTypedDataCondition::Numerical(_)));

        let string: WireTypedDataCondition = serde_json::from_value(json!({
            "match": "^order-.*$",
            "path": "id",
        }))
        .unwrap();
        assert!(matches!(string, WireTypedDataCondition::String(_)));
    }

    #[test]
    fn hash_rule_omits_criteria() {
        let rule = WireRule {
            action: Action::Accept,
            operation: "signEvmHash".to_owned(),
            criteria: None,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert!(json.get("criteria").is_none());
    }
}
