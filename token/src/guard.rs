//! Deposit guard: the token never accepts funds it did not ask for.
//!
//! Native currency can still end up at the token's address through paths
//! the token cannot intercept (a self-destructing contract naming it as
//! beneficiary, for instance). Those funds are drained by `reclaim_ether`.

use log::debug;
use reject_token_common::{crypto::Address, error::TokenError};

use crate::context::CallContext;

/// Fail if any native currency is attached to the call.
///
/// Applied to construction and to every non-payable entry point.
pub fn ensure_unfunded(ctx: &CallContext) -> Result<(), TokenError> {
    if ctx.value != 0 {
        debug!(
            "DepositGuard: rejecting {} attached by {}",
            ctx.value, ctx.caller
        );
        return Err(TokenError::UnexpectedPayment(ctx.value));
    }
    Ok(())
}

/// Payable fallback: a plain send of native currency is refused.
///
/// A zero-value call carries nothing to refuse and succeeds.
pub fn reject_payment(ctx: &CallContext) -> Result<(), TokenError> {
    ensure_unfunded(ctx)
}

/// Receiver hook for foreign tokens that notify their recipient.
///
/// Always refuses, so the sending token reverts the whole transfer.
pub fn reject_token_deposit(from: &Address, amount: u64, data: &[u8]) -> Result<(), TokenError> {
    debug!(
        "DepositGuard: refusing {} foreign tokens from {} ({} bytes of data)",
        amount,
        from,
        data.len()
    );
    Err(TokenError::UnexpectedPayment(amount))
}
