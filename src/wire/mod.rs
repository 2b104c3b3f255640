//! Wire-format schema for the remote authorization service.

pub mod types;

pub use types::{
    WireCriterion, WireEthValueCriterion, WireEvmAddressCriterion, WireEvmDataCondition,
    WireEvmDataConditionParam, WireEvmDataCriterion, WireEvmDataParameterCondition,
    WireEvmDataParameterConditionList, WireEvmMessageCriterion, WireEvmNetworkCriterion,
    WireEvmTypedAddressCondition, WireEvmTypedDataFieldCriterion,
    WireEvmTypedDataVerifyingContractCriterion, WireEvmTypedNumericalCondition,
    WireEvmTypedStringCondition, WireRule, WireSolAddressCriterion, WireTypedDataCondition,
    WireTypedDataTypes,
};
