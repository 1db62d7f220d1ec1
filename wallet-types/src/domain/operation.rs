//! Operation kinds and their conversion to signed deltas.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// The closed set of balance operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    /// Credit the wallet.
    Deposit,
    /// Debit the wallet.
    Withdraw,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "DEPOSIT",
            OperationType::Withdraw => "WITHDRAW",
        }
    }

    /// Amounts are strictly positive; the operation kind carries the sign.
    pub fn check_amount(amount: i64) -> Result<(), DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        Ok(())
    }

    /// Converts a caller-supplied amount into the delta applied to the balance.
    pub fn signed_delta(&self, amount: i64) -> Result<i64, DomainError> {
        Self::check_amount(amount)?;

        Ok(match self {
            OperationType::Deposit => amount,
            OperationType::Withdraw => -amount,
        })
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationType {
    type Err = DomainError;

    /// Matches exactly; `deposit` or ` DEPOSIT` are unknown operations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(OperationType::Deposit),
            "WITHDRAW" => Ok(OperationType::Withdraw),
            other => Err(DomainError::UnknownOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_operations() {
        assert_eq!(
            "DEPOSIT".parse::<OperationType>().unwrap(),
            OperationType::Deposit
        );
        assert_eq!(
            "WITHDRAW".parse::<OperationType>().unwrap(),
            OperationType::Withdraw
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let result = "deposit".parse::<OperationType>();
        assert!(matches!(result, Err(DomainError::UnknownOperation(op)) if op == "deposit"));
    }

    #[test]
    fn test_parse_unknown_operation() {
        assert!(matches!(
            "TRANSFER".parse::<OperationType>(),
            Err(DomainError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_signed_delta() {
        assert_eq!(OperationType::Deposit.signed_delta(500).unwrap(), 500);
        assert_eq!(OperationType::Withdraw.signed_delta(100).unwrap(), -100);
    }

    #[test]
    fn test_signed_delta_rejects_non_positive() {
        for op in [OperationType::Deposit, OperationType::Withdraw] {
            assert!(matches!(
                op.signed_delta(0),
                Err(DomainError::InvalidAmount(0))
            ));
            assert!(matches!(
                op.signed_delta(-5),
                Err(DomainError::InvalidAmount(-5))
            ));
        }
    }

    #[test]
    fn test_check_amount() {
        assert!(OperationType::check_amount(1).is_ok());
        assert_eq!(
            OperationType::check_amount(0),
            Err(DomainError::InvalidAmount(0))
        );
        assert_eq!(
            OperationType::check_amount(i64::MIN),
            Err(DomainError::InvalidAmount(i64::MIN))
        );
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&OperationType::Withdraw).unwrap();
        assert_eq!(json, "\"WITHDRAW\"");
    }
}
