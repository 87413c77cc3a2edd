//! Allowance registry: delegated spending on top of the ledger's transfer.

use log::{debug, trace};
use reject_token_common::{crypto::Address, error::TokenError};

use crate::{
    event::{EventSink, TokenEvent},
    ledger,
    state::{AllowanceProvider, LedgerProvider},
};

pub fn allowance<P: AllowanceProvider + ?Sized>(
    provider: &P,
    owner: &Address,
    spender: &Address,
) -> u64 {
    provider.get_allowance(owner, spender)
}

/// Overwrite the allowance of `spender` over `owner`'s tokens.
///
/// The amount is not checked against the owner's balance.
pub fn approve<P>(provider: &mut P, owner: &Address, spender: &Address, amount: u64)
where
    P: AllowanceProvider + EventSink + ?Sized,
{
    trace!("Allowance: {} approves {} for {}", owner, spender, amount);

    provider.set_allowance(owner, spender, amount);
    provider.emit(TokenEvent::Approval {
        owner: *owner,
        spender: *spender,
        amount,
    });
}

/// Raise the allowance by `delta`, failing instead of wrapping
pub fn increase_approval<P>(
    provider: &mut P,
    owner: &Address,
    spender: &Address,
    delta: u64,
) -> Result<u64, TokenError>
where
    P: AllowanceProvider + EventSink + ?Sized,
{
    let new_amount = provider
        .get_allowance(owner, spender)
        .checked_add(delta)
        .ok_or(TokenError::Overflow)?;

    approve(provider, owner, spender, new_amount);
    Ok(new_amount)
}

/// Lower the allowance by `delta`, flooring at zero
pub fn decrease_approval<P>(provider: &mut P, owner: &Address, spender: &Address, delta: u64) -> u64
where
    P: AllowanceProvider + EventSink + ?Sized,
{
    let new_amount = provider.get_allowance(owner, spender).saturating_sub(delta);

    approve(provider, owner, spender, new_amount);
    new_amount
}

/// `spender` moves `amount` of `owner`'s tokens to `to`.
///
/// Checks run in a fixed order: recipient, allowance, balance. The
/// allowance decrement and both balance updates land together or not at all.
pub fn transfer_from<P>(
    provider: &mut P,
    spender: &Address,
    owner: &Address,
    to: &Address,
    amount: u64,
) -> Result<(), TokenError>
where
    P: LedgerProvider + AllowanceProvider + EventSink + ?Sized,
{
    if to.is_zero() {
        debug!("Allowance: transferFrom rejected, recipient is the zero address");
        return Err(TokenError::InvalidRecipient);
    }

    // Phase 1: Validation
    let current = provider.get_allowance(owner, spender);
    let remaining = current
        .checked_sub(amount)
        .ok_or(TokenError::InsufficientAllowance {
            need: amount,
            have: current,
        })?;

    // Phase 2: Move the tokens (validates the owner's balance)
    ledger::transfer(provider, owner, to, amount)?;

    // Phase 3: Consume the allowance
    provider.set_allowance(owner, spender, remaining);
    Ok(())
}
