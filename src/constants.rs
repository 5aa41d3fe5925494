//! Global Constants
//!
//! Names shared between the built-in defaults, the loader and the resolver.

/// Environment variables referenced by the built-in defaults
pub mod env_vars {
    /// Signer private key for every remote network
    pub const PRIVATE_KEY: &str = "PRIVATE_KEY";

    /// Hosted RPC project key
    pub const INFURA_API_KEY: &str = "INFURA_API_KEY";

    pub const ETHERSCAN_KEY: &str = "ETHERSCAN_KEY";
    pub const BSCSCAN_KEY: &str = "BSCSCAN_KEY";
    pub const POLYGONSCAN_KEY: &str = "POLYGONSCAN_KEY";

    /// Suffix of per-network endpoint overrides (`SEPOLIA_RPC_URL`)
    pub const RPC_URL_SUFFIX: &str = "_RPC_URL";
}

/// Well-known network names
pub mod networks {
    /// The simulated in-process network
    pub const LOCAL: &str = "hardhat";
}

/// Loader constants
pub mod loader {
    /// Prefix of variables that override the defaults tree
    pub const ENV_PREFIX: &str = "CHAINRIG__";

    /// Separator between nested keys in override variables
    pub const ENV_SPLIT: &str = "__";

    /// Project configuration file, relative to the working directory
    pub const PROJECT_FILE: &str = "chainrig.toml";

    /// Dotenv file loaded before the environment snapshot
    pub const DOTENV_FILE: &str = ".env";
}

/// Value substituted for a variable the environment does not supply
pub const PLACEHOLDER_SENTINEL: &str = "";

/// Field path of the compiler list, used in error context
pub const COMPILERS_FIELD: &str = "solidity.compilers";
