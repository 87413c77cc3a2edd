//! Shared primitives for the reject token ledger: account addresses,
//! revert reasons and the staged-write overlay used to keep every call
//! all-or-nothing.

pub mod config;
pub mod crypto;
pub mod error;
pub mod overlay;

pub use crypto::Address;
pub use error::TokenError;
