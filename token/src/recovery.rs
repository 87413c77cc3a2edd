//! Asset recovery: the owner sweeps whatever reached the token outside of
//! normal transfers.
//!
//! None of these operations touch the token's own balances.

use log::{debug, info};
use reject_token_common::{crypto::Address, error::TokenError};

use crate::{host::Host, ownership, state::OwnerProvider};

/// Send the whole native balance held at `this` to the owner.
///
/// Returns the amount swept; an empty balance is a successful no-op.
pub fn reclaim_ether<P, H>(provider: &P, host: &mut H, this: &Address, caller: &Address) -> Result<u64, TokenError>
where
    P: OwnerProvider + ?Sized,
    H: Host + ?Sized,
{
    ownership::only_owner(provider, caller)?;

    let owner = provider.get_owner();
    let amount = host.native_balance(this);
    if amount == 0 {
        debug!("Recovery: no native balance to reclaim");
        return Ok(0);
    }

    host.transfer_native(this, &owner, amount)?;
    info!("Recovery: reclaimed {} native to {}", amount, owner);
    Ok(amount)
}

/// Send the whole balance of the foreign token at `token` held by `this`
/// to the owner, through that token's own transfer.
///
/// If the foreign transfer reverts, so does this call.
pub fn reclaim_token<P, H>(
    provider: &P,
    host: &mut H,
    this: &Address,
    caller: &Address,
    token: &Address,
) -> Result<u64, TokenError>
where
    P: OwnerProvider + ?Sized,
    H: Host + ?Sized,
{
    ownership::only_owner(provider, caller)?;

    let owner = provider.get_owner();
    let amount = host.token_balance_of(token, this)?;
    host.token_transfer(token, this, &owner, amount)?;

    info!(
        "Recovery: reclaimed {} of token {} to {}",
        amount, token, owner
    );
    Ok(amount)
}

/// Make the owner of this token the owner of the ownable `contract`.
///
/// Fails unless `this` currently owns `contract`.
pub fn reclaim_contract<P, H>(
    provider: &P,
    host: &mut H,
    this: &Address,
    caller: &Address,
    contract: &Address,
) -> Result<(), TokenError>
where
    P: OwnerProvider + ?Sized,
    H: Host + ?Sized,
{
    ownership::only_owner(provider, caller)?;

    let owner = provider.get_owner();
    host.transfer_contract_ownership(contract, this, &owner)?;

    info!("Recovery: contract {} handed over to {}", contract, owner);
    Ok(())
}
