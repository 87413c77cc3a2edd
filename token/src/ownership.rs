//! Ownable-style access control
//!
//! Single owner access control shared by the token and by stand-alone
//! ownable contracts.
//!
//! # Features
//!
//! - Owner check at the start of every restricted operation
//! - Ownership transfer, restricted to the current owner
//! - The zero address can never become owner
//!
//! There is no renunciation: once deployed, a contract always has an owner.

use log::{debug, info};
use reject_token_common::{crypto::Address, error::TokenError};

use crate::{
    event::{EventSink, TokenEvent},
    state::OwnerProvider,
};

pub fn owner<P: OwnerProvider + ?Sized>(provider: &P) -> Address {
    provider.get_owner()
}

/// Fail with `NotAuthorized` unless `caller` is the current owner
pub fn only_owner<P: OwnerProvider + ?Sized>(provider: &P, caller: &Address) -> Result<(), TokenError> {
    if provider.get_owner() != *caller {
        debug!("Ownable: Unauthorized - {} is not the owner", caller);
        return Err(TokenError::NotAuthorized);
    }
    Ok(())
}

/// Hand the contract over to `new_owner`
///
/// Requirements:
/// - Caller must be the current owner
/// - New owner cannot be the zero address
pub fn transfer_ownership<P>(provider: &mut P, caller: &Address, new_owner: &Address) -> Result<(), TokenError>
where
    P: OwnerProvider + EventSink + ?Sized,
{
    only_owner(provider, caller)?;

    if new_owner.is_zero() {
        debug!("Ownable: Invalid address - new owner cannot be zero address");
        return Err(TokenError::InvalidRecipient);
    }

    let previous_owner = provider.get_owner();
    provider.set_owner(new_owner);

    info!(
        "Ownable: Ownership transferred from {} to {}",
        previous_owner, new_owner
    );
    provider.emit(TokenEvent::OwnershipTransferred {
        previous_owner,
        new_owner: *new_owner,
    });
    Ok(())
}

/// Stand-alone ownable contract
///
/// Holds nothing but its owner. A token can be made the owner of one of
/// these and later hand it back through `reclaim_contract`.
#[derive(Debug, Clone)]
pub struct Ownable {
    owner: Address,
    events: Vec<TokenEvent>,
}

impl Ownable {
    /// Deploy with `deployer` as initial owner
    pub fn new(deployer: Address) -> Self {
        Self {
            owner: deployer,
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: &Address) -> Result<(), TokenError> {
        transfer_ownership(self, caller, new_owner)
    }

    /// Events recorded so far; they accumulate until drained with
    /// [`Ownable::take_events`]
    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }
}

impl OwnerProvider for Ownable {
    fn get_owner(&self) -> Address {
        self.owner
    }

    fn set_owner(&mut self, owner: &Address) {
        self.owner = *owner;
    }
}

impl EventSink for Ownable {
    fn emit(&mut self, event: TokenEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TokenState;

    fn account(n: u8) -> Address {
        Address::new([n; 32])
    }

    #[test]
    fn test_deployer_is_owner() {
        let ownable = Ownable::new(account(1));
        assert_eq!(ownable.owner(), account(1));
        assert!(only_owner(&ownable, &account(1)).is_ok());
        assert_eq!(only_owner(&ownable, &account(2)), Err(TokenError::NotAuthorized));
    }

    #[test]
    fn test_transfer_ownership() {
        let mut ownable = Ownable::new(account(1));
        ownable.transfer_ownership(&account(1), &account(2)).unwrap();

        assert_eq!(ownable.owner(), account(2));
        assert_eq!(
            ownable.events(),
            &[TokenEvent::OwnershipTransferred {
                previous_owner: account(1),
                new_owner: account(2),
            }]
        );

        // The previous owner lost its rights
        assert_eq!(
            ownable.transfer_ownership(&account(1), &account(3)),
            Err(TokenError::NotAuthorized)
        );
    }

    #[test]
    fn test_events_accumulate_until_drained() {
        let mut ownable = Ownable::new(account(1));
        ownable.transfer_ownership(&account(1), &account(2)).unwrap();
        ownable.transfer_ownership(&account(2), &account(3)).unwrap();
        assert_eq!(ownable.events().len(), 2);

        let drained = ownable.take_events();
        assert_eq!(drained.len(), 2);
        assert!(ownable.events().is_empty());

        ownable.transfer_ownership(&account(3), &account(1)).unwrap();
        assert_eq!(ownable.events().len(), 1);
    }

    #[test]
    fn test_transfer_ownership_unauthorized() {
        let mut ownable = Ownable::new(account(1));
        assert_eq!(
            ownable.transfer_ownership(&account(2), &account(2)),
            Err(TokenError::NotAuthorized)
        );
        assert_eq!(ownable.owner(), account(1));
        assert!(ownable.events().is_empty());
    }

    #[test]
    fn test_transfer_ownership_to_zero_address() {
        let mut ownable = Ownable::new(account(1));
        assert_eq!(
            ownable.transfer_ownership(&account(1), &Address::zero()),
            Err(TokenError::InvalidRecipient)
        );
        assert_eq!(ownable.owner(), account(1));
    }

    #[test]
    fn test_authorization_checked_before_address() {
        let mut ownable = Ownable::new(account(1));
        assert_eq!(
            ownable.transfer_ownership(&account(2), &Address::zero()),
            Err(TokenError::NotAuthorized)
        );
    }

    #[test]
    fn test_transfer_ownership_through_transaction() {
        let mut state = TokenState::new(account(1));
        state
            .execute(|tx| transfer_ownership(tx, &account(1), &account(4)))
            .unwrap();

        assert_eq!(state.owner(), account(4));
        assert_eq!(state.events().len(), 1);
    }
}
