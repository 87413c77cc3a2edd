//! Committed ledger state and the transactional view every call runs in.
//!
//! Calls never write to [`TokenState`] directly. They receive a
//! [`TokenTransaction`] that reads through to the committed state and stages
//! every write (and every event) in a [`LedgerOverlay`]. When the call
//! returns `Ok`, the overlay is applied in one step; when it returns `Err`,
//! the overlay is dropped, so a failed call is never observable.

use std::collections::HashMap;

use log::trace;
use reject_token_common::{
    crypto::Address,
    error::TokenError,
    overlay::{LedgerKey, LedgerOverlay, LedgerValue},
};

use crate::event::{EventSink, TokenEvent};

/// Balances and total supply
pub trait LedgerProvider {
    fn get_total_supply(&self) -> u64;

    fn set_total_supply(&mut self, amount: u64);

    /// Balance of `account`, zero if it never held tokens
    fn get_balance(&self, account: &Address) -> u64;

    fn set_balance(&mut self, account: &Address, amount: u64);
}

/// Delegated spending limits, keyed by (owner, spender)
pub trait AllowanceProvider {
    fn get_allowance(&self, owner: &Address, spender: &Address) -> u64;

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: u64);
}

/// Single administrator slot
pub trait OwnerProvider {
    fn get_owner(&self) -> Address;

    fn set_owner(&mut self, owner: &Address);
}

/// Committed state of a token
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    total_supply: u64,
    owner: Address,
    balances: HashMap<Address, u64>,
    allowances: HashMap<(Address, Address), u64>,
    events: Vec<TokenEvent>,
}

impl TokenState {
    /// Empty ledger administered by `owner`
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Default::default()
        }
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Accounts holding a nonzero balance
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.balances.iter()
    }

    /// Sum of every balance, widened so it cannot overflow
    pub fn sum_of_balances(&self) -> u128 {
        self.balances.values().map(|&v| v as u128).sum()
    }

    /// Events committed so far, oldest first.
    ///
    /// The log is never truncated here; whoever consumes the events must
    /// drain it with [`TokenState::take_events`].
    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    /// Drain the committed events, leaving the log empty
    pub fn take_events(&mut self) -> Vec<TokenEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run `f` against a staged view of this state.
    ///
    /// Writes and events produced by `f` are applied only if it succeeds.
    pub fn execute<R, F>(&mut self, f: F) -> Result<R, TokenError>
    where
        F: FnOnce(&mut TokenTransaction<'_>) -> Result<R, TokenError>,
    {
        let mut tx = TokenTransaction::new(self);
        let value = f(&mut tx)?;

        let (overlay, events) = tx.into_parts();
        self.apply(overlay, events);
        Ok(value)
    }

    fn apply(&mut self, overlay: LedgerOverlay, events: Vec<TokenEvent>) {
        trace!(
            "committing {} staged writes and {} events",
            overlay.len(),
            events.len()
        );

        for (key, value) in overlay.into_changes() {
            match (key, value) {
                (LedgerKey::Supply, LedgerValue::Supply(amount)) => self.total_supply = amount,
                (LedgerKey::Owner, LedgerValue::Owner(owner)) => self.owner = owner,
                (LedgerKey::Balance(account), LedgerValue::Balance(amount)) => {
                    if amount == 0 {
                        self.balances.remove(&account);
                    } else {
                        self.balances.insert(account, amount);
                    }
                }
                // Allowance entries stay in place even at zero
                (LedgerKey::Allowance { owner, spender }, LedgerValue::Allowance(amount)) => {
                    self.allowances.insert((owner, spender), amount);
                }
                (key, value) => {
                    unreachable!("overlay holds {:?} under {:?}", value, key)
                }
            }
        }

        self.events.extend(events);
    }
}

/// Staged view over a [`TokenState`] for the duration of one call
pub struct TokenTransaction<'a> {
    state: &'a TokenState,
    overlay: LedgerOverlay,
    events: Vec<TokenEvent>,
}

impl<'a> TokenTransaction<'a> {
    fn new(state: &'a TokenState) -> Self {
        Self {
            state,
            overlay: LedgerOverlay::new(),
            events: Vec::new(),
        }
    }

    /// Number of slots written so far
    pub fn pending_writes(&self) -> usize {
        self.overlay.len()
    }

    fn into_parts(self) -> (LedgerOverlay, Vec<TokenEvent>) {
        (self.overlay, self.events)
    }
}

impl LedgerProvider for TokenTransaction<'_> {
    fn get_total_supply(&self) -> u64 {
        match self.overlay.get(&LedgerKey::Supply) {
            Some(LedgerValue::Supply(amount)) => *amount,
            _ => self.state.total_supply,
        }
    }

    fn set_total_supply(&mut self, amount: u64) {
        self.overlay
            .set(LedgerKey::Supply, LedgerValue::Supply(amount));
    }

    fn get_balance(&self, account: &Address) -> u64 {
        match self.overlay.get(&LedgerKey::Balance(*account)) {
            Some(LedgerValue::Balance(amount)) => *amount,
            _ => self.state.balance_of(account),
        }
    }

    fn set_balance(&mut self, account: &Address, amount: u64) {
        self.overlay
            .set(LedgerKey::Balance(*account), LedgerValue::Balance(amount));
    }
}

impl AllowanceProvider for TokenTransaction<'_> {
    fn get_allowance(&self, owner: &Address, spender: &Address) -> u64 {
        let key = LedgerKey::Allowance {
            owner: *owner,
            spender: *spender,
        };
        match self.overlay.get(&key) {
            Some(LedgerValue::Allowance(amount)) => *amount,
            _ => self.state.allowance(owner, spender),
        }
    }

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: u64) {
        let key = LedgerKey::Allowance {
            owner: *owner,
            spender: *spender,
        };
        self.overlay.set(key, LedgerValue::Allowance(amount));
    }
}

impl OwnerProvider for TokenTransaction<'_> {
    fn get_owner(&self) -> Address {
        match self.overlay.get(&LedgerKey::Owner) {
            Some(LedgerValue::Owner(owner)) => *owner,
            _ => self.state.owner,
        }
    }

    fn set_owner(&mut self, owner: &Address) {
        self.overlay.set(LedgerKey::Owner, LedgerValue::Owner(*owner));
    }
}

impl EventSink for TokenTransaction<'_> {
    fn emit(&mut self, event: TokenEvent) {
        self.events.push(event);
    }
}
