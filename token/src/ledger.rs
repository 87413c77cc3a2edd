//! Balance ledger: supply, balances and plain transfers.

use log::{debug, trace};
use reject_token_common::{crypto::Address, error::TokenError};

use crate::{
    event::{EventSink, TokenEvent},
    state::LedgerProvider,
};

pub fn total_supply<P: LedgerProvider + ?Sized>(provider: &P) -> u64 {
    provider.get_total_supply()
}

pub fn balance_of<P: LedgerProvider + ?Sized>(provider: &P, account: &Address) -> u64 {
    provider.get_balance(account)
}

/// Create `amount` new tokens owned by `to`.
///
/// Only used while a token is being constructed; there is no public mint.
pub fn mint<P>(provider: &mut P, to: &Address, amount: u64) -> Result<(), TokenError>
where
    P: LedgerProvider + EventSink + ?Sized,
{
    if to.is_zero() {
        debug!("Ledger: cannot mint {} to the zero address", amount);
        return Err(TokenError::InvalidRecipient);
    }

    // Phase 1: Validation - calculate new values without state changes
    let new_supply = provider
        .get_total_supply()
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;
    let new_balance = provider
        .get_balance(to)
        .checked_add(amount)
        .ok_or(TokenError::Overflow)?;

    // Phase 2: Update balance and supply
    provider.set_balance(to, new_balance);
    provider.set_total_supply(new_supply);

    provider.emit(TokenEvent::Transfer {
        from: Address::zero(),
        to: *to,
        amount,
    });
    Ok(())
}

/// Move `amount` from `from` to `to`.
///
/// Rejects the zero address as recipient for every amount, zero included.
pub fn transfer<P>(provider: &mut P, from: &Address, to: &Address, amount: u64) -> Result<(), TokenError>
where
    P: LedgerProvider + EventSink + ?Sized,
{
    trace!("Ledger: transfer {} from {} to {}", amount, from, to);

    if to.is_zero() {
        debug!("Ledger: transfer rejected, recipient is the zero address");
        return Err(TokenError::InvalidRecipient);
    }

    // Phase 1: Validation - calculate new values without state changes
    let from_balance = provider.get_balance(from);
    let new_from = from_balance
        .checked_sub(amount)
        .ok_or(TokenError::InsufficientBalance {
            need: amount,
            have: from_balance,
        })?;

    // Phase 2: Update balances (a self transfer leaves the balance as is)
    if from != to {
        let new_to = provider
            .get_balance(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        provider.set_balance(from, new_from);
        provider.set_balance(to, new_to);
    }

    // Phase 3: Notify
    provider.emit(TokenEvent::Transfer {
        from: *from,
        to: *to,
        amount,
    });
    Ok(())
}
