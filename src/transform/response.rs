//! Response transformer: wire-format rules back into user-facing rules.
//!
//! The exact structural inverse of the request transformer: dispatch keys
//! and failure modes are identical, and `from_wire(to_wire(rules)) ==
//! rules` for any valid input. Wire data is taken as the service produced
//! it; only the dispatch tags are checked here.

use log::debug;

use crate::error::{PolicyError, Result};
use crate::policy::criteria::{
    Criterion, EthValueCriterion, EvmAddressCriterion, EvmDataCondition, EvmDataConditionParam,
    EvmDataCriterion, EvmDataParameterCondition, EvmDataParameterConditionList,
    EvmMessageCriterion, EvmNetworkCriterion, EvmTypedAddressCondition, EvmTypedDataCondition,
    EvmTypedNumericalCondition, EvmTypedStringCondition, SignEvmTypedDataFieldCriterion,
    SignEvmTypedDataVerifyingContractCriterion, SolAddressCriterion, TypedDataTypes,
};
use crate::policy::rules::{Operation, Rule};
use crate::wire::types::{
    WireCriterion, WireEthValueCriterion, WireEvmAddressCriterion, WireEvmDataCondition,
    WireEvmDataConditionParam, WireEvmDataCriterion, WireEvmNetworkCriterion, WireRule,
    WireTypedDataCondition,
};

/// Convert wire-format rules from the remote authorization service back
/// into the user-facing representation.
pub fn from_wire(rules: &[WireRule]) -> Result<Vec<Rule>> {
    debug!("transforming {} wire rule(s) to user format", rules.len());
    rules.iter().map(user_rule).collect()
}

fn user_rule(rule: &WireRule) -> Result<Rule> {
    let operation = Operation::from(rule.operation.clone());
    let criteria = match &operation {
        Operation::SendEvmTransaction => user_criteria(rule, &operation, send_transaction_criterion)?,
        Operation::SignEvmTransaction => user_criteria(rule, &operation, sign_transaction_criterion)?,
        // Bare rule: criteria are never present for this operation.
        Operation::SignEvmHash => Vec::new(),
        Operation::SignEvmMessage => user_criteria(rule, &operation, sign_message_criterion)?,
        Operation::SignEvmTypedData => user_criteria(rule, &operation, sign_typed_data_criterion)?,
        Operation::SignSolTransaction => {
            user_criteria(rule, &operation, sign_sol_transaction_criterion)?
        }
        Operation::Other(tag) => {
            return Err(PolicyError::UnknownOperation {
                operation: tag.clone(),
            })
        }
    };
    Ok(Rule {
        action: rule.action,
        operation,
        criteria,
    })
}

fn user_criteria(
    rule: &WireRule,
    operation: &Operation,
    build: fn(&WireCriterion) -> Option<Criterion>,
) -> Result<Vec<Criterion>> {
    rule.criteria
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|criterion| {
            build(criterion).ok_or_else(|| PolicyError::UnknownCriterionType {
                operation: operation.to_string(),
                criterion_type: criterion.kind().to_owned(),
            })
        })
        .collect()
}

fn send_transaction_criterion(criterion: &WireCriterion) -> Option<Criterion> {
    match criterion {
        WireCriterion::EthValue(c) => Some(user_eth_value(c)),
        WireCriterion::EvmAddress(c) => Some(user_evm_address(c)),
        WireCriterion::EvmNetwork(c) => Some(user_evm_network(c)),
        WireCriterion::EvmData(c) => Some(user_evm_data(c)),
        _ => None,
    }
}

fn sign_transaction_criterion(criterion: &WireCriterion) -> Option<Criterion> {
    match criterion {
        WireCriterion::EthValue(c) => Some(user_eth_value(c)),
        WireCriterion::EvmAddress(c) => Some(user_evm_address(c)),
        WireCriterion::EvmData(c) => Some(user_evm_data(c)),
        _ => None,
    }
}

fn sign_message_criterion(criterion: &WireCriterion) -> Option<Criterion> {
    match criterion {
        WireCriterion::EvmMessage(c) => Some(Criterion::EvmMessage(EvmMessageCriterion {
            pattern: c.pattern.clone(),
        })),
        _ => None,
    }
}

fn sign_typed_data_criterion(criterion: &WireCriterion) -> Option<Criterion> {
    match criterion {
        WireCriterion::EvmTypedDataField(c) => Some(Criterion::EvmTypedDataField(
            SignEvmTypedDataFieldCriterion {
                types: TypedDataTypes {
                    types: c.types.types.clone(),
                    primary_type: c.types.primary_type.clone(),
                },
                conditions: c.conditions.iter().map(user_typed_condition).collect(),
            },
        )),
        WireCriterion::EvmTypedDataVerifyingContract(c) => {
            Some(Criterion::EvmTypedDataVerifyingContract(
                SignEvmTypedDataVerifyingContractCriterion {
                    addresses: c.addresses.clone(),
                    operator: c.operator,
                },
            ))
        }
        _ => None,
    }
}

fn sign_sol_transaction_criterion(criterion: &WireCriterion) -> Option<Criterion> {
    match criterion {
        WireCriterion::SolAddress(c) => Some(Criterion::SolAddress(SolAddressCriterion {
            addresses: c.addresses.clone(),
            operator: c.operator,
        })),
        _ => None,
    }
}

fn user_eth_value(criterion: &WireEthValueCriterion) -> Criterion {
    Criterion::EthValue(EthValueCriterion {
        eth_value: criterion.eth_value.clone(),
        operator: criterion.operator,
    })
}

fn user_evm_address(criterion: &WireEvmAddressCriterion) -> Criterion {
    Criterion::EvmAddress(EvmAddressCriterion {
        addresses: criterion.addresses.clone(),
        operator: criterion.operator,
    })
}

fn user_evm_network(criterion: &WireEvmNetworkCriterion) -> Criterion {
    Criterion::EvmNetwork(EvmNetworkCriterion {
        networks: criterion.networks.clone(),
        operator: criterion.operator,
    })
}

fn user_evm_data(criterion: &WireEvmDataCriterion) -> Criterion {
    Criterion::EvmData(EvmDataCriterion {
        abi: criterion.abi.clone(),
        conditions: criterion.conditions.iter().map(user_data_condition).collect(),
    })
}

fn user_data_condition(condition: &WireEvmDataCondition) -> EvmDataCondition {
    EvmDataCondition {
        function: condition.function.clone(),
        params: condition
            .params
            .as_ref()
            .map(|params| params.iter().map(user_data_param).collect()),
    }
}

fn user_data_param(param: &WireEvmDataConditionParam) -> EvmDataConditionParam {
    match param {
        WireEvmDataConditionParam::List(p) => {
            EvmDataConditionParam::List(EvmDataParameterConditionList {
                name: p.name.clone(),
                operator: p.operator,
                values: p.values.clone(),
            })
        }
        WireEvmDataConditionParam::Single(p) => {
            EvmDataConditionParam::Single(EvmDataParameterCondition {
                name: p.name.clone(),
                operator: p.operator,
                value: p.value.clone(),
            })
        }
    }
}

fn user_typed_condition(condition: &WireTypedDataCondition) -> EvmTypedDataCondition {
    match condition {
        WireTypedDataCondition::Address(c) => {
            EvmTypedDataCondition::Address(EvmTypedAddressCondition {
                addresses: c.addresses.clone(),
                operator: c.operator,
                path: c.path.clone(),
            })
        }
        WireTypedDataCondition::Numerical(c) => {
            EvmTypedDataCondition::Numerical(EvmTypedNumericalCondition {
                value: c.value.clone(),
                operator: c.operator,
                path: c.path.clone(),
            })
        }
        WireTypedDataCondition::String(c) => {
            EvmTypedDataCondition::String(EvmTypedStringCondition {
                pattern: c.pattern.clone(),
                path: c.path.clone(),
            })
        }
    }
}
