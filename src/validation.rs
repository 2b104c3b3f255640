//! Field-level structural checks shared by the criterion constructors.
//!
//! Every check runs eagerly at model construction and is re-run by the
//! request transformer before anything is emitted toward the wire.

use crate::error::{PolicyError, Result};

/// Maximum number of addresses accepted by any EVM address-list field.
pub const MAX_ADDRESSES: usize = 300;

/// Check that a numeric string contains only ASCII digits.
pub fn validate_digits(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PolicyError::Validation {
            field,
            reason: "must contain only digits".into(),
        });
    }
    Ok(())
}

/// Check an EVM address list: at most [`MAX_ADDRESSES`] entries, each a
/// 0x-prefixed 40-character hex string.
pub fn validate_evm_addresses(field: &'static str, addresses: &[String]) -> Result<()> {
    if addresses.len() > MAX_ADDRESSES {
        return Err(PolicyError::Validation {
            field,
            reason: format!("maximum of {MAX_ADDRESSES} addresses allowed"),
        });
    }
    for address in addresses {
        if !is_evm_address(address) {
            return Err(PolicyError::Validation {
                field,
                reason: format!("{address} is not a 0x-prefixed 40-character hex address"),
            });
        }
    }
    Ok(())
}

/// Check a Solana address list: each entry a Base58 string of 32 to 44
/// characters.
pub fn validate_sol_addresses(field: &'static str, addresses: &[String]) -> Result<()> {
    for address in addresses {
        if !is_sol_address(address) {
            return Err(PolicyError::Validation {
                field,
                reason: format!("invalid address format: {address}"),
            });
        }
    }
    Ok(())
}

fn is_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(body) => body.len() == 40 && hex::decode(body).is_ok(),
        None => false,
    }
}

fn is_sol_address(address: &str) -> bool {
    (32..=44).contains(&address.len()) && bs58::decode(address).into_vec().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evm_address(fill: char) -> String {
        format!("0x{}", std::iter::repeat(fill).take(40).collect::<String>())
    }

    #[test]
    fn digits_accepts_zero() {
        assert!(validate_digits("ethValue", "0").is_ok());
        assert!(validate_digits("ethValue", "1000000000000000000").is_ok());
    }

    #[test]
    fn digits_rejects_mixed_input() {
        assert!(validate_digits("ethValue", "12a").is_err());
        assert!(validate_digits("ethValue", "").is_err());
        assert!(validate_digits("ethValue", "-5").is_err());
    }

    #[test]
    fn evm_address_format() {
        assert!(validate_evm_addresses("addresses", &[evm_address('a')]).is_ok());
        // 41 hex chars
        assert!(validate_evm_addresses("addresses", &[format!("{}a", evm_address('a'))]).is_err());
        // missing prefix
        let bare = evm_address('b').trim_start_matches("0x").to_owned();
        assert!(validate_evm_addresses("addresses", &[bare]).is_err());
        // non-hex body
        assert!(validate_evm_addresses("addresses", &[evm_address('g')]).is_err());
    }

    #[test]
    fn evm_address_list_cap() {
        let list: Vec<String> = (0..=MAX_ADDRESSES).map(|_| evm_address('c')).collect();
        let err = validate_evm_addresses("addresses", &list).unwrap_err();
        assert!(matches!(err, PolicyError::Validation { field: "addresses", .. }));
        assert!(validate_evm_addresses("addresses", &list[..MAX_ADDRESSES]).is_ok());
    }

    #[test]
    fn sol_address_format() {
        let valid = "HpabPRRCFbBKSuJr5PdkVvQc85FyxyTWkFM2obBRSvHT".to_owned();
        assert!(validate_sol_addresses("addresses", &[valid]).is_ok());
        // 'l' and '0' are outside the Base58 alphabet
        assert!(validate_sol_addresses("addresses", &["l0l0l0l0l0l0l0l0l0l0l0l0l0l0l0l0".to_owned()]).is_err());
        // too short
        assert!(validate_sol_addresses("addresses", &["abc".to_owned()]).is_err());
    }
}
