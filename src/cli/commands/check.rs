//! Check Command
//!
//! Verify that a network can be used for signed transactions (and,
//! optionally, contract verification) before any build step runs.
//!
//! Usage:
//!   chainrig check [--network NAME] [--verify] [--endpoint]

use crate::cli::Output;
use crate::resolver::{ResolvedConfig, validate_endpoint, validate_for_use};
use crate::types::Result;

pub fn run(
    config: &ResolvedConfig,
    network: Option<&str>,
    verify: bool,
    endpoint: bool,
) -> Result<()> {
    let out = Output::new();
    let name = network.unwrap_or(config.default_network());

    let checked = validate_for_use(config, name, verify).and_then(|()| {
        if endpoint {
            validate_endpoint(config, name)
        } else {
            Ok(())
        }
    });

    if let Err(e) = checked {
        if let Ok(profile) = config.network(name) {
            for var in profile.unresolved_vars() {
                out.warning(&format!("{} is not set", var));
            }
        }
        return Err(e);
    }

    let suffix = if verify { " (with verification)" } else { "" };
    out.success(&format!("Network '{}' is ready{}", name, suffix));
    Ok(())
}
