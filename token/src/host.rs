//! Boundary between the token and the environment it runs in.
//!
//! The token keeps no record of native currency or foreign tokens held at
//! its address: it asks the host. Every host call is atomic on its own;
//! an `Err` means the host state did not change.

use reject_token_common::{crypto::Address, error::TokenError};

use crate::context::CallContext;

pub trait Host {
    /// Native currency held by `account`
    fn native_balance(&self, account: &Address) -> u64;

    /// Move native currency out of `from`, an account or contract the
    /// caller controls
    fn transfer_native(&mut self, from: &Address, to: &Address, amount: u64) -> Result<(), TokenError>;

    /// Balance of `account` in the foreign token deployed at `token`
    fn token_balance_of(&self, token: &Address, account: &Address) -> Result<u64, TokenError>;

    /// Call `transfer(to, amount)` on the foreign token at `token`, with
    /// `sender` as caller
    fn token_transfer(
        &mut self,
        token: &Address,
        sender: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Call `transferOwnership(new_owner)` on the ownable contract at
    /// `contract`, with `caller` as caller
    fn transfer_contract_ownership(
        &mut self,
        contract: &Address,
        caller: &Address,
        new_owner: &Address,
    ) -> Result<(), TokenError>;
}

/// Contract reachable through the standard payable path
pub trait PaymentReceiver {
    fn address(&self) -> Address;

    /// Invoked before a plain send is credited; an `Err` reverts the send
    fn receive(&self, ctx: &CallContext) -> Result<(), TokenError>;
}

/// Contract notified by foreign tokens that call their recipient
/// (ERC223 `tokenFallback`)
pub trait TokenReceiver {
    fn address(&self) -> Address;

    /// An `Err` makes the foreign token revert the transfer
    fn token_fallback(&self, from: &Address, amount: u64, data: &[u8]) -> Result<(), TokenError>;
}
