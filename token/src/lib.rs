//! RejectToken: an ERC20-style ledger that refuses deposits it did not ask
//! for and lets its owner sweep whatever arrives anyway.
//!
//! Each operation is implemented once, as a free function over the provider
//! traits in [`state`]. [`RejectToken`] runs them inside a staged
//! transaction so that a failing call changes nothing. Native currency,
//! foreign tokens and other contracts are reached through the [`Host`]
//! trait; [`MemoryHost`] is an in-memory implementation.

pub mod allowance;
pub mod context;
pub mod contract;
pub mod deploy;
pub mod event;
pub mod guard;
pub mod host;
pub mod ledger;
pub mod memory;
pub mod ownership;
pub mod recovery;
pub mod state;

pub use context::CallContext;
pub use contract::RejectToken;
pub use deploy::{load_deploy_config, DeployConfig, DeployConfigError};
pub use event::TokenEvent;
pub use host::{Host, PaymentReceiver, TokenReceiver};
pub use memory::MemoryHost;
pub use reject_token_common::{Address, TokenError};
pub use state::TokenState;
