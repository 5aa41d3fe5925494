//! Configuration Management
//!
//! The declared defaults tree is assembled from, in increasing priority:
//! 1. Built-in defaults
//! 2. Project config (chainrig.toml)
//! 3. Environment variables (CHAINRIG__*)
//!
//! Secrets are not part of the tree. They enter through `${VAR}` templates
//! that the resolver interpolates.

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
