//! The RejectToken contract: ledger, allowances and ownership behind a
//! deposit guard, plus owner-only recovery of stray assets.
//!
//! Every mutating entry point takes the [`CallContext`] of the call. Calls
//! carrying native currency are refused before anything else runs, and a
//! call that fails leaves the token exactly as it was.

use log::{debug, info, log_enabled, trace, Level};
use reject_token_common::{config::VERSION, crypto::Address, error::TokenError};

use crate::{
    allowance,
    context::CallContext,
    deploy::{DeployConfig, DeployConfigError},
    event::TokenEvent,
    guard,
    host::{Host, PaymentReceiver, TokenReceiver},
    ledger, ownership, recovery,
    state::{TokenState, TokenTransaction},
};

#[derive(Debug, Clone)]
pub struct RejectToken {
    address: Address,
    state: TokenState,
}

impl RejectToken {
    /// Deploy at `address` with zero supply, owned by the deployer
    pub fn new(ctx: &CallContext, address: Address) -> Result<Self, TokenError> {
        guard::ensure_unfunded(ctx)?;
        Self::deploy(address, ctx.caller, None)
    }

    /// Deploy at `address` minting `supply` to `holder`, owned by the deployer
    pub fn with_supply(ctx: &CallContext, address: Address, holder: Address, supply: u64) -> Result<Self, TokenError> {
        guard::ensure_unfunded(ctx)?;
        Self::deploy(address, ctx.caller, Some((holder, supply)))
    }

    /// Deploy at `address` from a deployment config
    pub fn from_config(ctx: &CallContext, address: Address, config: &DeployConfig) -> Result<Self, DeployConfigError> {
        guard::ensure_unfunded(ctx)?;
        config.validate()?;

        let owner = config.owner.unwrap_or(ctx.caller);
        Ok(Self::deploy(address, owner, config.initial_allocation())?)
    }

    fn deploy(address: Address, owner: Address, allocation: Option<(Address, u64)>) -> Result<Self, TokenError> {
        if owner.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }

        let mut state = TokenState::new(owner);
        if let Some((holder, supply)) = allocation {
            state.execute(|tx| ledger::mint(tx, &holder, supply))?;
        }

        info!(
            "RejectToken {} deployed at {} (owner {}, supply {})",
            VERSION,
            address,
            owner,
            state.total_supply()
        );
        Ok(Self { address, state })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn total_supply(&self) -> u64 {
        self.state.total_supply()
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.state.balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.state.allowance(owner, spender)
    }

    pub fn owner(&self) -> Address {
        self.state.owner()
    }

    /// Events committed so far, oldest first
    pub fn events(&self) -> &[TokenEvent] {
        self.state.events()
    }

    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        self.state.take_events()
    }

    pub fn transfer(&mut self, ctx: &CallContext, to: &Address, amount: u64) -> Result<(), TokenError> {
        self.call("transfer", ctx, |tx| {
            ledger::transfer(tx, &ctx.caller, to, amount)
        })
    }

    pub fn approve(&mut self, ctx: &CallContext, spender: &Address, amount: u64) -> Result<(), TokenError> {
        self.call("approve", ctx, |tx| {
            allowance::approve(tx, &ctx.caller, spender, amount);
            Ok(())
        })
    }

    /// The caller, as spender, moves `amount` of `owner`'s tokens to `to`
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        owner: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), TokenError> {
        self.call("transferFrom", ctx, |tx| {
            allowance::transfer_from(tx, &ctx.caller, owner, to, amount)
        })
    }

    /// Returns the new allowance
    pub fn increase_approval(&mut self, ctx: &CallContext, spender: &Address, delta: u64) -> Result<u64, TokenError> {
        self.call("increaseApproval", ctx, |tx| {
            allowance::increase_approval(tx, &ctx.caller, spender, delta)
        })
    }

    /// Returns the new allowance, never below zero
    pub fn decrease_approval(&mut self, ctx: &CallContext, spender: &Address, delta: u64) -> Result<u64, TokenError> {
        self.call("decreaseApproval", ctx, |tx| {
            Ok(allowance::decrease_approval(tx, &ctx.caller, spender, delta))
        })
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: &Address) -> Result<(), TokenError> {
        self.call("transferOwnership", ctx, |tx| {
            ownership::transfer_ownership(tx, &ctx.caller, new_owner)
        })
    }

    /// Sweep the native balance held at this token's address to the owner
    pub fn reclaim_ether<H>(&mut self, ctx: &CallContext, host: &mut H) -> Result<u64, TokenError>
    where
        H: Host + ?Sized,
    {
        let this = self.address;
        self.call("reclaimEther", ctx, |tx| {
            recovery::reclaim_ether(&*tx, host, &this, &ctx.caller)
        })
    }

    /// Sweep this token's balance in the foreign token at `token` to the owner
    pub fn reclaim_token<H>(&mut self, ctx: &CallContext, host: &mut H, token: &Address) -> Result<u64, TokenError>
    where
        H: Host + ?Sized,
    {
        let this = self.address;
        self.call("reclaimToken", ctx, |tx| {
            recovery::reclaim_token(&*tx, host, &this, &ctx.caller, token)
        })
    }

    /// Hand the ownable contract at `contract` over to the owner
    pub fn reclaim_contract<H>(&mut self, ctx: &CallContext, host: &mut H, contract: &Address) -> Result<(), TokenError>
    where
        H: Host + ?Sized,
    {
        let this = self.address;
        self.call("reclaimContract", ctx, |tx| {
            recovery::reclaim_contract(&*tx, host, &this, &ctx.caller, contract)
        })
    }

    // Common path of every mutating entry point
    fn call<R, F>(&mut self, name: &str, ctx: &CallContext, f: F) -> Result<R, TokenError>
    where
        F: FnOnce(&mut TokenTransaction<'_>) -> Result<R, TokenError>,
    {
        if log_enabled!(Level::Trace) {
            trace!("RejectToken {}: {} called by {}", self.address, name, ctx.caller);
        }

        let result = guard::ensure_unfunded(ctx).and_then(|_| self.state.execute(f));
        if let Err(err) = &result {
            debug!(
                "RejectToken {}: {} by {} reverted: {} (code {:#06x})",
                self.address,
                name,
                ctx.caller,
                err,
                err.code()
            );
        }
        result
    }
}

impl PaymentReceiver for RejectToken {
    fn address(&self) -> Address {
        self.address
    }

    fn receive(&self, ctx: &CallContext) -> Result<(), TokenError> {
        guard::reject_payment(ctx)
    }
}

impl TokenReceiver for RejectToken {
    fn address(&self) -> Address {
        self.address
    }

    fn token_fallback(&self, from: &Address, amount: u64, data: &[u8]) -> Result<(), TokenError> {
        guard::reject_token_deposit(from, amount, data)
    }
}
