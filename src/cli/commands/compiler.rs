//! Compiler Command
//!
//! Show the compiler profile selected for a version.

use crate::cli::Output;
use crate::resolver::{ResolvedConfig, select_compiler};
use crate::types::Result;

pub fn run(config: &ResolvedConfig, version: &str, format: &str) -> Result<()> {
    let profile = select_compiler(config, version)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }

    let out = Output::new();
    let optimizer = &profile.settings.optimizer;
    out.section(&format!("Compiler {}", profile.version));
    out.field("optimizer", if optimizer.enabled { "enabled" } else { "disabled" });
    out.field("runs", optimizer.runs);
    out.field("yul", optimizer.details.yul);
    out.field("via-ir", profile.settings.via_ir);
    Ok(())
}
