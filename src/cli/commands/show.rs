//! Show Command
//!
//! Print the resolved configuration. Secret values are never printed;
//! templated fields show their declared `${VAR}` form.

use crate::resolver::ResolvedConfig;
use crate::types::Result;

pub fn run(config: &ResolvedConfig, format: &str) -> Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

pub fn render(config: &ResolvedConfig, format: &str) -> Result<String> {
    if format == "json" {
        Ok(serde_json::to_string_pretty(config)?)
    } else {
        Ok(toml::to_string_pretty(config)?)
    }
}
