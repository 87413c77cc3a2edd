use crate::crypto::Address;
use std::collections::HashMap;

/// Key types for overlay storage
///
/// Each variant represents a unique storage slot of a token ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKey {
    /// Total supply of the token
    Supply,
    /// Administrator of the contract
    Owner,
    /// Balance of an account
    Balance(Address),
    /// Allowance from owner to spender
    Allowance { owner: Address, spender: Address },
}

/// Value types for overlay storage
///
/// Each variant wraps the underlying data stored at a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerValue {
    Supply(u64),
    Owner(Address),
    Balance(u64),
    Allowance(u64),
}

/// Overlay cache for ledger operations
///
/// Accumulates writes while a call executes. On success the changes are
/// applied to the committed state in one step; on failure the overlay is
/// dropped and the committed state never sees them.
#[derive(Debug, Clone, Default)]
pub struct LedgerOverlay {
    /// Changes to be applied (key → value)
    changes: HashMap<LedgerKey, LedgerValue>,
}

impl LedgerOverlay {
    pub fn new() -> Self {
        Self {
            changes: HashMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Get a value from the overlay (returns None if not staged)
    pub fn get(&self, key: &LedgerKey) -> Option<&LedgerValue> {
        self.changes.get(key)
    }

    /// Stage a value, replacing any earlier write to the same key
    pub fn set(&mut self, key: LedgerKey, value: LedgerValue) {
        self.changes.insert(key, value);
    }

    /// Consume the overlay, yielding every staged write
    pub fn into_changes(self) -> impl Iterator<Item = (LedgerKey, LedgerValue)> {
        self.changes.into_iter()
    }
}
