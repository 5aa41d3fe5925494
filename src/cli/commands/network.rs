//! Network Command
//!
//! Describe one resolved network profile, including which variables it
//! still waits on.

use crate::cli::Output;
use crate::resolver::{Accounts, NetworkProfile, ResolvedConfig};
use crate::types::Result;

pub fn run(config: &ResolvedConfig, name: &str) -> Result<()> {
    let profile = config.network(name)?;
    let out = Output::new();

    out.section(&format!("Network {}", profile.name()));
    for (key, value) in describe(profile) {
        out.field(&key, value);
    }

    if name == config.default_network() {
        out.info("This is the default network");
    }

    let missing = profile.unresolved_vars();
    if missing.is_empty() {
        out.success("All referenced variables are set");
    } else {
        for var in missing {
            out.warning(&format!("{} is not set", var));
        }
    }
    Ok(())
}

/// Display rows for a profile. Templates are shown, never resolved secrets.
pub fn describe(profile: &NetworkProfile) -> Vec<(String, String)> {
    let mut rows = vec![("kind".to_string(), profile.kind().to_string())];

    if let Some(url) = profile.url() {
        rows.push(("url".to_string(), url.template().to_string()));
    }
    if let Some(chain_id) = profile.chain_id() {
        rows.push(("chain id".to_string(), chain_id.to_string()));
    }

    let accounts = match profile.accounts() {
        Accounts::Generated { count } => format!("{} generated", count),
        Accounts::Keys(keys) => {
            let usable = keys.iter().filter(|k| !k.is_placeholder()).count();
            format!("{} declared, {} usable", keys.len(), usable)
        }
    };
    rows.push(("accounts".to_string(), accounts));

    if let Some(fork) = profile.forking() {
        rows.push((
            "forking".to_string(),
            format!("{} @ {}", fork.url.template(), fork.block_number),
        ));
    }
    rows.push(("verifier".to_string(), profile.verifier_key().to_string()));
    rows
}
