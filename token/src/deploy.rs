//! Deployment configuration, read from JSON.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "owner": "0101...01",
//!   "initial_holder": "0202...02",
//!   "initial_supply": 100
//! }
//! ```
//!
//! Every field is optional. Without `owner` the deploying account becomes
//! owner; without `initial_holder` the token starts with zero supply.

use std::path::Path;

use reject_token_common::{
    config::{DEFAULT_INITIAL_SUPPLY, DEPLOY_CONFIG_FORMAT_VERSION},
    crypto::Address,
    error::TokenError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or applying a deployment config
#[derive(Error, Debug)]
pub enum DeployConfigError {
    #[error("Invalid format version: expected {expected}, got {0}", expected = DEPLOY_CONFIG_FORMAT_VERSION)]
    InvalidFormatVersion(u32),

    #[error("Deploy config file not found: {0}")]
    FileNotFound(String),

    #[error("Initial supply of {0} requires an initial holder")]
    MissingInitialHolder(u64),

    #[error("Zero address not allowed for {0}")]
    ZeroAddress(&'static str),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Deployment reverted: {0}")]
    Token(#[from] TokenError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_format_version")]
    pub format_version: u32,

    /// Administrator, defaults to the deploying account
    #[serde(default)]
    pub owner: Option<Address>,

    /// Account credited with the whole initial supply
    #[serde(default)]
    pub initial_holder: Option<Address>,

    #[serde(default)]
    pub initial_supply: u64,
}

fn default_format_version() -> u32 {
    DEPLOY_CONFIG_FORMAT_VERSION
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            format_version: DEPLOY_CONFIG_FORMAT_VERSION,
            owner: None,
            initial_holder: None,
            initial_supply: DEFAULT_INITIAL_SUPPLY,
        }
    }
}

impl DeployConfig {
    /// Config minting `supply` to `holder`
    pub fn with_supply(holder: Address, supply: u64) -> Self {
        Self {
            initial_holder: Some(holder),
            initial_supply: supply,
            ..Default::default()
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, DeployConfigError> {
        let config: DeployConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DeployConfigError> {
        if self.format_version != DEPLOY_CONFIG_FORMAT_VERSION {
            return Err(DeployConfigError::InvalidFormatVersion(self.format_version));
        }

        if self.owner.is_some_and(|owner| owner.is_zero()) {
            return Err(DeployConfigError::ZeroAddress("owner"));
        }

        match self.initial_holder {
            Some(holder) if holder.is_zero() => Err(DeployConfigError::ZeroAddress("initial_holder")),
            None if self.initial_supply > 0 => {
                Err(DeployConfigError::MissingInitialHolder(self.initial_supply))
            }
            _ => Ok(()),
        }
    }

    /// Holder and amount to mint at construction, if any
    pub fn initial_allocation(&self) -> Option<(Address, u64)> {
        self.initial_holder
            .map(|holder| (holder, self.initial_supply))
    }
}

/// Load a deployment config from a JSON file
pub fn load_deploy_config(path: &Path) -> Result<DeployConfig, DeployConfigError> {
    if !path.exists() {
        return Err(DeployConfigError::FileNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = std::fs::read_to_string(path)?;
    DeployConfig::from_json_str(&content)
}
