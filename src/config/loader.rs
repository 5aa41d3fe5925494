//! Configuration Loader (Figment-based)
//!
//! Builds the declared defaults tree from layered sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (chainrig.toml, or an explicit path)
//! 3. Environment variables (CHAINRIG__ prefix, `__` between nested keys)
//!
//! A `.env` file is loaded into the process environment first, then the
//! environment is snapshotted once and handed to the resolver.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::types::Defaults;
use crate::constants::loader as consts;
use crate::resolver::{ResolvedConfig, resolve};
use crate::types::{ConfigError, EnvSnapshot, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `.env`, assemble the defaults tree, snapshot the environment
    /// and resolve. `project_file` replaces the default `chainrig.toml` lookup.
    pub fn load(project_file: Option<&Path>) -> Result<ResolvedConfig> {
        Self::load_dotenv();
        let defaults = Self::load_defaults(project_file)?;
        let env = EnvSnapshot::capture();
        debug!("Captured {} environment variables", env.len());
        resolve(&env, &defaults)
    }

    /// Assemble the declared defaults tree: defaults -> project -> env vars
    pub fn load_defaults(project_file: Option<&Path>) -> Result<Defaults> {
        let defaults: Defaults = Self::figment(project_file).extract()?;
        Ok(defaults)
    }

    /// Layered sources without extraction
    pub fn figment(project_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Defaults::builtin()));

        let project_path = project_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        } else if project_file.is_some() {
            warn!("Config file not found: {}", project_path.display());
        }

        // e.g. CHAINRIG__NETWORKS__SEPOLIA__CHAIN_ID -> networks.sepolia.chain_id
        figment.merge(
            Env::prefixed(consts::ENV_PREFIX)
                .split(consts::ENV_SPLIT)
                .lowercase(true),
        )
    }

    /// Load `.env` into the process environment. Existing variables win.
    pub fn load_dotenv() {
        match dotenvy::from_filename(consts::DOTENV_FILE) {
            Ok(path) => debug!("Loaded environment file: {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Ignoring unreadable {}: {}", consts::DOTENV_FILE, e),
        }
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(consts::PROJECT_FILE)
    }

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());

        let dotenv = PathBuf::from(consts::DOTENV_FILE);
        let exists = if dotenv.exists() { "✓" } else { "✗" };
        println!("  Dotenv:  {} {}", exists, dotenv.display());

        println!("  Env:     {}*", consts::ENV_PREFIX);
    }

    /// Show the declared tree (templates unresolved)
    pub fn show_defaults(project_file: Option<&Path>, as_json: bool) -> Result<()> {
        let defaults = Self::load_defaults(project_file)?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&defaults)?);
        } else {
            println!("{}", toml::to_string_pretty(&defaults)?);
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a starter project config. Returns its path.
    pub fn init_project(path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::project_config_path);

        if config_path.exists() && !force {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!(
                    "{} already exists. Use --force to overwrite.",
                    config_path.display()
                ),
            )));
        }

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, Self::default_project_config())?;
        info!("Created project config: {}", config_path.display());

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Starter project config content (TOML)
    fn default_project_config() -> String {
        r#"# chainrig project configuration
# Merged over the built-in defaults. Secrets belong in the environment or
# .env; reference them here as ${VAR}.

# default_network = "hardhat"

# [networks.sepolia]
# url = "https://sepolia.infura.io/v3/${INFURA_API_KEY}"
# accounts = ["${PRIVATE_KEY}"]
# chain_id = 11155111

# [networks.hardhat.forking]
# url = "https://eth.llamarpc.com"
# block_number = 19810683

# [verification.api_keys]
# sepolia = "${ETHERSCAN_KEY}"

# [[compilers]]
# version = "0.8.25"
# settings = { via_ir = true, optimizer = { enabled = true, runs = 200, details = { yul = true } } }

# [paths]
# sources = "./contracts"
"#
        .to_string()
    }
}
