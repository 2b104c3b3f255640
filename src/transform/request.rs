//! Request transformer: user-facing rules into wire-format rules.
//!
//! Dispatch is a static match per operation, then per criterion type; the
//! two failure modes are [`PolicyError::UnknownOperation`] and
//! [`PolicyError::UnknownCriterionType`]. Every criterion is re-validated
//! before emission so malformed data never reaches the wire. The first
//! failure aborts the whole call with no partial output.

use log::debug;

use crate::error::{PolicyError, Result};
use crate::policy::criteria::{
    Criterion, EthValueCriterion, EvmAddressCriterion, EvmDataCondition, EvmDataConditionParam,
    EvmDataCriterion, EvmMessageCriterion, EvmNetworkCriterion, EvmTypedDataCondition,
    SignEvmTypedDataFieldCriterion, SignEvmTypedDataVerifyingContractCriterion,
    SolAddressCriterion,
};
use crate::policy::rules::{Operation, Rule};
use crate::wire::types::{
    WireCriterion, WireEthValueCriterion, WireEvmAddressCriterion, WireEvmDataCondition,
    WireEvmDataConditionParam, WireEvmDataCriterion, WireEvmDataParameterCondition,
    WireEvmDataParameterConditionList, WireEvmMessageCriterion, WireEvmNetworkCriterion,
    WireEvmTypedAddressCondition, WireEvmTypedDataFieldCriterion,
    WireEvmTypedDataVerifyingContractCriterion, WireEvmTypedNumericalCondition,
    WireEvmTypedStringCondition, WireRule, WireSolAddressCriterion, WireTypedDataCondition,
    WireTypedDataTypes,
};

/// Convert user-facing rules into the wire representation expected by the
/// remote authorization service.
pub fn to_wire(rules: &[Rule]) -> Result<Vec<WireRule>> {
    debug!("transforming {} rule(s) to wire format", rules.len());
    rules.iter().map(wire_rule).collect()
}

fn wire_rule(rule: &Rule) -> Result<WireRule> {
    let criteria = match &rule.operation {
        Operation::SendEvmTransaction => Some(wire_criteria(rule, send_transaction_criterion)?),
        Operation::SignEvmTransaction => Some(wire_criteria(rule, sign_transaction_criterion)?),
        Operation::SignEvmHash => {
            // Bare rule: the operation carries no criteria.
            if let Some(criterion) = rule.criteria.first() {
                return Err(unknown_criterion(&rule.operation, criterion.kind()));
            }
            None
        }
        Operation::SignEvmMessage => Some(wire_criteria(rule, sign_message_criterion)?),
        Operation::SignEvmTypedData => Some(wire_criteria(rule, sign_typed_data_criterion)?),
        Operation::SignSolTransaction => Some(wire_criteria(rule, sign_sol_transaction_criterion)?),
        Operation::Other(tag) => {
            return Err(PolicyError::UnknownOperation {
                operation: tag.clone(),
            })
        }
    };
    Ok(WireRule {
        action: rule.action,
        operation: rule.operation.as_str().to_owned(),
        criteria,
    })
}

fn wire_criteria(
    rule: &Rule,
    build: fn(&Criterion) -> Option<Result<WireCriterion>>,
) -> Result<Vec<WireCriterion>> {
    rule.criteria
        .iter()
        .map(|criterion| match build(criterion) {
            Some(result) => result,
            None => Err(unknown_criterion(&rule.operation, criterion.kind())),
        })
        .collect()
}

fn unknown_criterion(operation: &Operation, criterion_type: &str) -> PolicyError {
    PolicyError::UnknownCriterionType {
        operation: operation.to_string(),
        criterion_type: criterion_type.to_owned(),
    }
}

fn send_transaction_criterion(criterion: &Criterion) -> Option<Result<WireCriterion>> {
    match criterion {
        Criterion::EthValue(c) => Some(wire_eth_value(c)),
        Criterion::EvmAddress(c) => Some(wire_evm_address(c)),
        Criterion::EvmNetwork(c) => Some(wire_evm_network(c)),
        Criterion::EvmData(c) => Some(wire_evm_data(c)),
        _ => None,
    }
}

fn sign_transaction_criterion(criterion: &Criterion) -> Option<Result<WireCriterion>> {
    match criterion {
        Criterion::EthValue(c) => Some(wire_eth_value(c)),
        Criterion::EvmAddress(c) => Some(wire_evm_address(c)),
        Criterion::EvmData(c) => Some(wire_evm_data(c)),
        _ => None,
    }
}

fn sign_message_criterion(criterion: &Criterion) -> Option<Result<WireCriterion>> {
    match criterion {
        Criterion::EvmMessage(c) => Some(wire_evm_message(c)),
        _ => None,
    }
}

fn sign_typed_data_criterion(criterion: &Criterion) -> Option<Result<WireCriterion>> {
    match criterion {
        Criterion::EvmTypedDataField(c) => Some(wire_typed_data_field(c)),
        Criterion::EvmTypedDataVerifyingContract(c) => Some(wire_verifying_contract(c)),
        _ => None,
    }
}

fn sign_sol_transaction_criterion(criterion: &Criterion) -> Option<Result<WireCriterion>> {
    match criterion {
        Criterion::SolAddress(c) => Some(wire_sol_address(c)),
        _ => None,
    }
}

fn wire_eth_value(criterion: &EthValueCriterion) -> Result<WireCriterion> {
    criterion.validate()?;
    Ok(WireCriterion::EthValue(WireEthValueCriterion {
        eth_value: criterion.eth_value.clone(),
        operator: criterion.operator,
    }))
}

fn wire_evm_address(criterion: &EvmAddressCriterion) -> Result<WireCriterion> {
    criterion.validate()?;
    Ok(WireCriterion::EvmAddress(WireEvmAddressCriterion {
        addresses: criterion.addresses.clone(),
        operator: criterion.operator,
    }))
}

fn wire_evm_network(criterion: &EvmNetworkCriterion) -> Result<WireCriterion> {
    Ok(WireCriterion::EvmNetwork(WireEvmNetworkCriterion {
        networks: criterion.networks.clone(),
        operator: criterion.operator,
    }))
}

fn wire_evm_data(criterion: &EvmDataCriterion) -> Result<WireCriterion> {
    criterion.validate()?;
    Ok(WireCriterion::EvmData(WireEvmDataCriterion {
        abi: criterion.abi.clone(),
        conditions: criterion.conditions.iter().map(wire_data_condition).collect(),
    }))
}

fn wire_data_condition(condition: &EvmDataCondition) -> WireEvmDataCondition {
    WireEvmDataCondition {
        function: condition.function.clone(),
        params: condition
            .params
            .as_ref()
            .map(|params| params.iter().map(wire_data_param).collect()),
    }
}

fn wire_data_param(param: &EvmDataConditionParam) -> WireEvmDataConditionParam {
    match param {
        EvmDataConditionParam::List(p) => {
            WireEvmDataConditionParam::List(WireEvmDataParameterConditionList {
                name: p.name.clone(),
                operator: p.operator,
                values: p.values.clone(),
            })
        }
        EvmDataConditionParam::Single(p) => {
            WireEvmDataConditionParam::Single(WireEvmDataParameterCondition {
                name: p.name.clone(),
                operator: p.operator,
                value: p.value.clone(),
            })
        }
    }
}

fn wire_evm_message(criterion: &EvmMessageCriterion) -> Result<WireCriterion> {
    Ok(WireCriterion::EvmMessage(WireEvmMessageCriterion {
        pattern: criterion.pattern.clone(),
    }))
}

fn wire_typed_data_field(criterion: &SignEvmTypedDataFieldCriterion) -> Result<WireCriterion> {
    criterion.validate()?;
    Ok(WireCriterion::EvmTypedDataField(WireEvmTypedDataFieldCriterion {
        types: WireTypedDataTypes {
            types: criterion.types.types.clone(),
            primary_type: criterion.types.primary_type.clone(),
        },
        conditions: criterion
            .conditions
            .iter()
            .map(wire_typed_condition)
            .collect(),
    }))
}

fn wire_typed_condition(condition: &EvmTypedDataCondition) -> WireTypedDataCondition {
    match condition {
        EvmTypedDataCondition::Address(c) => {
            WireTypedDataCondition::Address(WireEvmTypedAddressCondition {
                addresses: c.addresses.clone(),
                operator: c.operator,
                path: c.path.clone(),
            })
        }
        EvmTypedDataCondition::Numerical(c) => {
            WireTypedDataCondition::Numerical(WireEvmTypedNumericalCondition {
                value: c.value.clone(),
                operator: c.operator,
                path: c.path.clone(),
            })
        }
        EvmTypedDataCondition::String(c) => {
            WireTypedDataCondition::String(WireEvmTypedStringCondition {
                pattern: c.pattern.clone(),
                path: c.path.clone(),
            })
        }
    }
}

fn wire_verifying_contract(
    criterion: &SignEvmTypedDataVerifyingContractCriterion,
) -> Result<WireCriterion> {
    criterion.validate()?;
    Ok(WireCriterion::EvmTypedDataVerifyingContract(
        WireEvmTypedDataVerifyingContractCriterion {
            addresses: criterion.addresses.clone(),
            operator: criterion.operator,
        },
    ))
}

fn wire_sol_address(criterion: &SolAddressCriterion) -> Result<WireCriterion> {
    criterion.validate()?;
    Ok(WireCriterion::SolAddress(WireSolAddressCriterion {
        addresses: criterion.addresses.clone(),
        operator: criterion.operator,
    }))
}
