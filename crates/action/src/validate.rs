//! Input validation for token operations.
//!
//! Rules run in a fixed order and the first failure wins: required fields,
//! then address syntax, then amount parsing, then the burn balance check.
//! Nothing here issues a network call.

use crate::{Request, ValidationError};
use alloy_primitives::{Address, U256};
use token::{units::parse_amount, writer::TokenCall};

/// Validate raw inputs and convert the amount to base units.
///
/// `balance` is the caller's current balance, consulted only for burns.
pub fn validate(
    request: &Request,
    decimals: u8,
    balance: U256,
) -> Result<TokenCall, ValidationError> {
    check_required(request)?;

    match request {
        Request::Transfer { to, amount } => {
            let to = parse_address("to", to)?;
            let amount = parse_op_amount(amount, decimals)?;
            Ok(TokenCall::Transfer { to, amount })
        }
        Request::Approve { spender, amount } => {
            let spender = parse_address("spender", spender)?;
            let amount = parse_op_amount(amount, decimals)?;
            Ok(TokenCall::Approve { spender, amount })
        }
        Request::TransferFrom { from, to, amount } => {
            let from = parse_address("from", from)?;
            let to = parse_address("to", to)?;
            let amount = parse_op_amount(amount, decimals)?;
            Ok(TokenCall::TransferFrom { from, to, amount })
        }
        Request::Burn { amount } => {
            let amount = parse_op_amount(amount, decimals)?;
            if amount.is_zero() {
                return Err(ValidationError::InvalidAmount(
                    "burn amount must be greater than zero".into(),
                ));
            }
            if amount > balance {
                return Err(ValidationError::InsufficientBalance {
                    requested: amount,
                    available: balance,
                });
            }
            Ok(TokenCall::Burn { amount })
        }
    }
}

/// Parse a user-entered address field. Syntactic only: hex format and,
/// for mixed-case input, the checksum. No existence check.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidAddress(field))
}

fn check_required(request: &Request) -> Result<(), ValidationError> {
    let fields: Vec<(&'static str, &str)> = match request {
        Request::Transfer { to, amount } => {
            vec![("to", to.as_str()), ("amount", amount.as_str())]
        }
        Request::Approve { spender, amount } => {
            vec![("spender", spender.as_str()), ("amount", amount.as_str())]
        }
        Request::TransferFrom { from, to, amount } => vec![
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("amount", amount.as_str()),
        ],
        Request::Burn { amount } => vec![("amount", amount.as_str())],
    };

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(name));
        }
    }

    Ok(())
}

fn parse_op_amount(value: &str, decimals: u8) -> Result<U256, ValidationError> {
    parse_amount(value, decimals).map_err(|e| ValidationError::InvalidAmount(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_ADDR: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn balance() -> U256 {
        U256::from(1_000_000_000_000_000_000u64) // 1 token at 18 decimals
    }

    #[test]
    fn test_transfer_converts_to_base_units() {
        let request = Request::Transfer {
            to: GOOD_ADDR.into(),
            amount: "0.5".into(),
        };

        let call = validate(&request, 18, balance()).unwrap();
        assert_eq!(
            call,
            TokenCall::Transfer {
                to: GOOD_ADDR.parse().unwrap(),
                amount: U256::from(500_000_000_000_000_000u64),
            }
        );
    }

    #[test]
    fn test_missing_field_wins_over_bad_address() {
        let request = Request::Transfer {
            to: "".into(),
            amount: "".into(),
        };

        assert_eq!(
            validate(&request, 18, balance()),
            Err(ValidationError::MissingField("to"))
        );
    }

    #[test]
    fn test_bad_address_wins_over_bad_amount() {
        let request = Request::Transfer {
            to: "not-an-address".into(),
            amount: "abc".into(),
        };

        assert_eq!(
            validate(&request, 18, balance()),
            Err(ValidationError::InvalidAddress("to"))
        );
    }

    #[test]
    fn test_transfer_from_reports_first_bad_address_field() {
        let request = Request::TransferFrom {
            from: GOOD_ADDR.into(),
            to: "0x123".into(),
            amount: "1".into(),
        };

        assert_eq!(
            validate(&request, 18, balance()),
            Err(ValidationError::InvalidAddress("to"))
        );
    }

    #[test]
    fn test_approve_missing_amount() {
        let request = Request::Approve {
            spender: GOOD_ADDR.into(),
            amount: "   ".into(),
        };

        assert_eq!(
            validate(&request, 18, balance()),
            Err(ValidationError::MissingField("amount"))
        );
    }

    #[test]
    fn test_burn_zero_is_invalid() {
        let request = Request::Burn { amount: "0".into() };

        assert!(matches!(
            validate(&request, 18, balance()),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_burn_over_balance_is_blocked() {
        let request = Request::Burn {
            amount: "1.5".into(),
        };

        assert_eq!(
            validate(&request, 18, balance()),
            Err(ValidationError::InsufficientBalance {
                requested: U256::from(1_500_000_000_000_000_000u64),
                available: balance(),
            })
        );
    }

    #[test]
    fn test_burn_at_exact_balance_passes() {
        let request = Request::Burn { amount: "1".into() };

        assert_eq!(
            validate(&request, 18, balance()).unwrap(),
            TokenCall::Burn { amount: balance() }
        );
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let request = Request::Transfer {
            to: GOOD_ADDR.into(),
            amount: "-1".into(),
        };

        assert!(matches!(
            validate(&request, 18, balance()),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_address_trims_whitespace() {
        assert!(parse_address("to", &format!("  {GOOD_ADDR} ")).is_ok());
        assert_eq!(
            parse_address("to", "0x123"),
            Err(ValidationError::InvalidAddress("to"))
        );
    }
}
