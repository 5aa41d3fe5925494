//! chainrig - Configuration Resolver for Smart Contract Toolchains
//!
//! Turns a declared defaults tree (networks, explorers, compilers, paths,
//! tool settings) plus the process environment into one immutable,
//! validated configuration that build, test and deploy tooling reads.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chainrig::{ConfigLoader, validate_for_use};
//!
//! let config = ConfigLoader::load(None)?;
//! validate_for_use(&config, "sepolia", true)?;
//! let compiler = config.compiler_for("0.8.25")?;
//! println!("optimizer runs: {}", compiler.settings.optimizer.runs);
//! # Ok::<(), chainrig::ConfigError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: declared types, built-in defaults, layered loading
//! - [`resolver`]: interpolation, validation, compiler selection
//! - [`cli`]: command handlers for the `chainrig` binary

pub mod cli;
pub mod config;
pub mod constants;
pub mod resolver;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{CompilerProfile, ConfigLoader, Defaults, NetworkKind, PathsConfig};

// Resolution
pub use resolver::{
    Interpolated, NetworkProfile, ResolvedConfig, VerifierProfile, resolve, select_compiler,
    validate_endpoint, validate_for_use,
};

// Error Types
pub use types::{ConfigError, EnvSnapshot, ErrorKind, Result};
