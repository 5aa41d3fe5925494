//! Config Command
//!
//! Inspect and initialise configuration sources.
//!
//! Usage:
//!   chainrig config path
//!   chainrig config defaults [-f json]
//!   chainrig config init [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Show the declared defaults tree before interpolation
pub fn defaults(project_file: Option<&Path>, format: &str) -> Result<()> {
    ConfigLoader::show_defaults(project_file, format == "json")
}

/// Initialize project configuration
pub fn init(project_file: Option<&Path>, force: bool) -> Result<()> {
    let path = ConfigLoader::init_project(project_file, force)?;
    Output::new().success("Initialized project configuration");
    println!("  Config:    {}", path.display());
    Ok(())
}
