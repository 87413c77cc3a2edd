pub const VERSION: &str = env!("BUILD_VERSION");

// Supply minted when a token is deployed without an initial holder
pub const DEFAULT_INITIAL_SUPPLY: u64 = 0;

// Supported deployment config format
pub const DEPLOY_CONFIG_FORMAT_VERSION: u32 = 1;

// Contract address derivation starts at this nonce for every deployer
pub const FIRST_DEPLOY_NONCE: u64 = 0;
