//! In-memory host.
//!
//! Keeps native balances, foreign tokens and ownable contracts in plain
//! maps. Besides the [`Host`] interface it exposes the paths a token cannot
//! intercept (funding a forwarder and self-destructing it onto a
//! beneficiary) and the ERC223-style transfer-and-call that notifies the
//! recipient.
//!
//! Composite operations run under [`MemoryHost::atomic`], which snapshots
//! the whole host and restores it if any step fails.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use reject_token_common::{
    config::FIRST_DEPLOY_NONCE,
    crypto::{compute_contract_address, Address},
    error::TokenError,
};

use crate::{
    context::CallContext,
    event::TokenEvent,
    host::{Host, PaymentReceiver, TokenReceiver},
    ledger,
    ownership::Ownable,
    state::TokenState,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    native: HashMap<Address, u64>,
    tokens: HashMap<Address, TokenState>,
    ownables: HashMap<Address, Ownable>,
    // Funded contracts whose only purpose is to self-destruct
    forwarders: HashSet<Address>,
    nonces: HashMap<Address, u64>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit native currency out of thin air (genesis allocation)
    pub fn fund(&mut self, account: &Address, amount: u64) -> Result<(), TokenError> {
        let balance = self.native_balance(account);
        let new_balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        self.native.insert(*account, new_balance);
        Ok(())
    }

    /// Reserve the address of the next contract created by `deployer`
    pub fn next_contract_address(&mut self, deployer: &Address) -> Address {
        let nonce = self.nonces.entry(*deployer).or_insert(FIRST_DEPLOY_NONCE);
        let address = compute_contract_address(deployer, *nonce);
        *nonce += 1;
        address
    }

    /// Run `f` against the host; if it fails, every change it made is undone
    pub fn atomic<R, F>(&mut self, f: F) -> Result<R, TokenError>
    where
        F: FnOnce(&mut Self) -> Result<R, TokenError>,
    {
        let snapshot = self.clone();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                debug!("MemoryHost: restoring snapshot after failure: {}", err);
                *self = snapshot;
                Err(err)
            }
        }
    }

    /// Standard payable path: the receiving contract sees the payment first
    /// and may refuse it
    pub fn send_to_contract<R>(&mut self, from: &Address, receiver: &R, amount: u64) -> Result<(), TokenError>
    where
        R: PaymentReceiver + ?Sized,
    {
        let to = receiver.address();
        let ctx = CallContext::new(*from).with_value(amount);
        receiver
            .receive(&ctx)
            .map_err(|err| TokenError::external(to, err))?;

        self.transfer_native(from, &to, amount)
    }

    /// Deploy a contract holding `value` of `deployer`'s native currency
    pub fn deploy_forwarder(&mut self, deployer: &Address, value: u64) -> Result<Address, TokenError> {
        self.atomic(|host| {
            let address = host.next_contract_address(deployer);
            host.transfer_native(deployer, &address, value)?;
            host.forwarders.insert(address);
            Ok(address)
        })
    }

    /// Destroy a forwarder and push its whole balance to `beneficiary`.
    ///
    /// The beneficiary gets no chance to refuse. A forwarder naming itself
    /// as beneficiary burns its balance.
    pub fn self_destruct(&mut self, forwarder: &Address, beneficiary: &Address) -> Result<u64, TokenError> {
        if !self.forwarders.contains(forwarder) {
            return Err(TokenError::UnknownContract(*forwarder));
        }

        let amount = self.native_balance(forwarder);
        let new_balance = if forwarder == beneficiary {
            None
        } else {
            Some(
                self.native_balance(beneficiary)
                    .checked_add(amount)
                    .ok_or(TokenError::Overflow)?,
            )
        };

        self.forwarders.remove(forwarder);
        self.native.remove(forwarder);
        if let Some(new_balance) = new_balance {
            self.native.insert(*beneficiary, new_balance);
        }

        trace!(
            "MemoryHost: {} self-destructed, {} forced onto {}",
            forwarder,
            amount,
            beneficiary
        );
        Ok(amount)
    }

    /// Deploy a plain ERC20 token minting `supply` to `holder`
    pub fn deploy_token(&mut self, deployer: &Address, holder: &Address, supply: u64) -> Result<Address, TokenError> {
        let mut state = TokenState::new(*deployer);
        if supply > 0 {
            state.execute(|tx| ledger::mint(tx, holder, supply))?;
        }

        let address = self.next_contract_address(deployer);
        self.tokens.insert(address, state);
        Ok(address)
    }

    pub fn token(&self, address: &Address) -> Option<&TokenState> {
        self.tokens.get(address)
    }

    /// ERC223-style transfer: move the tokens, then notify the receiving
    /// contract. A refusal reverts the transfer.
    pub fn token_transfer_and_call<R>(
        &mut self,
        token: &Address,
        sender: &Address,
        receiver: &R,
        amount: u64,
        data: &[u8],
    ) -> Result<(), TokenError>
    where
        R: TokenReceiver + ?Sized,
    {
        let to = receiver.address();
        self.atomic(|host| {
            host.token_transfer(token, sender, &to, amount)?;
            receiver
                .token_fallback(sender, amount, data)
                .map_err(|err| TokenError::external(*token, TokenError::external(to, err)))
        })
    }

    /// Deploy an ownable contract owned by `deployer`
    pub fn deploy_ownable(&mut self, deployer: &Address) -> Address {
        let address = self.next_contract_address(deployer);
        self.ownables.insert(address, Ownable::new(*deployer));
        address
    }

    pub fn ownable(&self, address: &Address) -> Option<&Ownable> {
        self.ownables.get(address)
    }

    /// Drain the events committed by the foreign token or ownable contract
    /// at `contract`.
    ///
    /// Hosted contracts keep their events until drained here.
    pub fn take_events(&mut self, contract: &Address) -> Result<Vec<TokenEvent>, TokenError> {
        if let Some(state) = self.tokens.get_mut(contract) {
            return Ok(state.take_events());
        }

        self.ownables
            .get_mut(contract)
            .map(Ownable::take_events)
            .ok_or(TokenError::UnknownContract(*contract))
    }
}

impl Host for MemoryHost {
    fn native_balance(&self, account: &Address) -> u64 {
        self.native.get(account).copied().unwrap_or(0)
    }

    fn transfer_native(&mut self, from: &Address, to: &Address, amount: u64) -> Result<(), TokenError> {
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }

        let from_balance = self.native_balance(from);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                need: amount,
                have: from_balance,
            })?;

        if from != to {
            let new_to = self
                .native_balance(to)
                .checked_add(amount)
                .ok_or(TokenError::Overflow)?;
            self.native.insert(*from, new_from);
            self.native.insert(*to, new_to);
        }

        trace!("MemoryHost: {} native from {} to {}", amount, from, to);
        Ok(())
    }

    fn token_balance_of(&self, token: &Address, account: &Address) -> Result<u64, TokenError> {
        self.tokens
            .get(token)
            .map(|state| state.balance_of(account))
            .ok_or(TokenError::UnknownContract(*token))
    }

    fn token_transfer(
        &mut self,
        token: &Address,
        sender: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), TokenError> {
        let state = self
            .tokens
            .get_mut(token)
            .ok_or(TokenError::UnknownContract(*token))?;

        state
            .execute(|tx| ledger::transfer(tx, sender, to, amount))
            .map_err(|err| TokenError::external(*token, err))
    }

    fn transfer_contract_ownership(
        &mut self,
        contract: &Address,
        caller: &Address,
        new_owner: &Address,
    ) -> Result<(), TokenError> {
        let ownable = self
            .ownables
            .get_mut(contract)
            .ok_or(TokenError::UnknownContract(*contract))?;

        ownable
            .transfer_ownership(caller, new_owner)
            .map_err(|err| TokenError::external(*contract, err))
    }
}
