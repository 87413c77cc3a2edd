//! Token Error Codes
//!
//! Range: 0x0200 - 0x02FF
//! Format: TOKEN_ERROR_<CATEGORY>_<SPECIFIC>

use crate::crypto::Address;
use thiserror::Error;

// ===== General Errors (0x0200 - 0x020F) =====

pub const TOKEN_ERROR_INVALID_RECIPIENT: u64 = 0x0203;
pub const TOKEN_ERROR_OVERFLOW: u64 = 0x0209;

// ===== Balance Errors (0x0210 - 0x021F) =====

pub const TOKEN_ERROR_INSUFFICIENT_BALANCE: u64 = 0x0210;

// ===== Authorization Errors (0x0220 - 0x022F) =====

pub const TOKEN_ERROR_NOT_AUTHORIZED: u64 = 0x0220;
pub const TOKEN_ERROR_INSUFFICIENT_ALLOWANCE: u64 = 0x0221;

// ===== Deposit Errors (0x0230 - 0x023F) =====

pub const TOKEN_ERROR_UNEXPECTED_PAYMENT: u64 = 0x0230;

// ===== External Call Errors (0x0240 - 0x024F) =====

pub const TOKEN_ERROR_UNKNOWN_CONTRACT: u64 = 0x0240;
pub const TOKEN_ERROR_EXTERNAL_CALL: u64 = 0x0241;

/// Reason a call reverted.
///
/// A call that returns any of these left no trace in the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid recipient: the zero address cannot receive tokens or ownership")]
    InvalidRecipient,

    #[error("Insufficient balance: need {need}, have {have}")]
    InsufficientBalance { need: u64, have: u64 },

    #[error("Insufficient allowance: need {need}, have {have}")]
    InsufficientAllowance { need: u64, have: u64 },

    #[error("Not authorized: caller is not the owner")]
    NotAuthorized,

    #[error("Unexpected payment of {0}: this contract does not accept funds")]
    UnexpectedPayment(u64),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("No contract deployed at {0}")]
    UnknownContract(Address),

    #[error("Call to {contract} reverted: {reason}")]
    ExternalCall {
        contract: Address,
        reason: Box<TokenError>,
    },
}

impl TokenError {
    /// Wrap a revert coming back from another contract
    pub fn external(contract: Address, reason: TokenError) -> Self {
        Self::ExternalCall {
            contract,
            reason: Box::new(reason),
        }
    }

    /// Convert error to u64 error code
    pub fn code(&self) -> u64 {
        match self {
            Self::InvalidRecipient => TOKEN_ERROR_INVALID_RECIPIENT,
            Self::InsufficientBalance { .. } => TOKEN_ERROR_INSUFFICIENT_BALANCE,
            Self::InsufficientAllowance { .. } => TOKEN_ERROR_INSUFFICIENT_ALLOWANCE,
            Self::NotAuthorized => TOKEN_ERROR_NOT_AUTHORIZED,
            Self::UnexpectedPayment(_) => TOKEN_ERROR_UNEXPECTED_PAYMENT,
            Self::Overflow => TOKEN_ERROR_OVERFLOW,
            Self::UnknownContract(_) => TOKEN_ERROR_UNKNOWN_CONTRACT,
            Self::ExternalCall { .. } => TOKEN_ERROR_EXTERNAL_CALL,
        }
    }

    /// Innermost revert reason, following nested external calls
    pub fn root_cause(&self) -> &TokenError {
        match self {
            Self::ExternalCall { reason, .. } => reason.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            TokenError::InvalidRecipient,
            TokenError::InsufficientBalance { need: 2, have: 1 },
            TokenError::InsufficientAllowance { need: 2, have: 1 },
            TokenError::NotAuthorized,
            TokenError::UnexpectedPayment(1),
            TokenError::Overflow,
            TokenError::UnknownContract(Address::zero()),
            TokenError::external(Address::zero(), TokenError::NotAuthorized),
        ];

        let mut codes: Vec<u64> = errors.iter().map(TokenError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|code| (0x0200..=0x02FF).contains(code)));
    }

    #[test]
    fn test_root_cause_unwraps_nested_calls() {
        let inner = TokenError::InsufficientBalance { need: 10, have: 3 };
        let nested = TokenError::external(
            Address::new([1u8; 32]),
            TokenError::external(Address::new([2u8; 32]), inner.clone()),
        );

        assert_eq!(nested.code(), TOKEN_ERROR_EXTERNAL_CALL);
        assert_eq!(nested.root_cause(), &inner);
        assert_eq!(inner.root_cause(), &inner);
    }

    #[test]
    fn test_display_messages() {
        let err = TokenError::InsufficientBalance { need: 101, have: 100 };
        assert_eq!(err.to_string(), "Insufficient balance: need 101, have 100");
        assert_eq!(
            TokenError::UnexpectedPayment(5).to_string(),
            "Unexpected payment of 5: this contract does not accept funds"
        );
    }
}
