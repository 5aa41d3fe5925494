//! Resolution, Validation and Compiler Selection
//!
//! `resolve` turns a declared [`Defaults`] tree plus an [`EnvSnapshot`] into a
//! [`ResolvedConfig`]. Credential problems are not reported here:
//! networks that are never used may carry placeholders. `validate_for_use`
//! checks the one network actually selected.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use url::Url;

use super::interpolate::{Interpolated, var_ref};
use super::resolved::{
    Accounts, ExplorerChain, ForkingDescriptor, NetworkProfile, ReportingFlags, ResolvedConfig,
    VerifierProfile,
};
use crate::config::{AccountsDecl, CompilerProfile, Defaults, NetworkDecl, NetworkKind};
use crate::constants::{COMPILERS_FIELD, env_vars};
use crate::types::{ConfigError, EnvSnapshot, Result};

/// Build the immutable configuration from declared defaults and an
/// environment snapshot. Pure: same inputs, same output.
pub fn resolve(env: &EnvSnapshot, defaults: &Defaults) -> Result<ResolvedConfig> {
    if !defaults.networks.contains_key(&defaults.default_network) {
        return Err(ConfigError::unknown_network(
            &defaults.default_network,
            "default_network",
        ));
    }

    let networks = defaults
        .networks
        .iter()
        .map(|(name, decl)| Ok((name.clone(), resolve_network(name, decl, env)?)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    let verifiers = resolve_verifiers(defaults, env);

    let unresolved: BTreeSet<&str> = networks
        .values()
        .flat_map(NetworkProfile::unresolved_vars)
        .chain(verifiers.values().flat_map(VerifierProfile::unresolved_vars))
        .collect();
    if !unresolved.is_empty() {
        debug!(
            "Unset variables left as placeholders: {}",
            unresolved.into_iter().collect::<Vec<_>>().join(", ")
        );
    }

    debug!(
        networks = networks.len(),
        compilers = defaults.compilers.len(),
        verifiers = verifiers.len(),
        "Resolved configuration"
    );

    Ok(ResolvedConfig {
        default_network: defaults.default_network.clone(),
        networks,
        compilers: defaults.compilers.clone(),
        verifiers,
        paths: defaults.paths.clone(),
        reporting: ReportingFlags(defaults.reporting.clone()),
    })
}

/// Variable that replaces the declared endpoint of `network`, e.g.
/// `bsctestnet` -> `BSCTESTNET_RPC_URL`
pub fn rpc_override_var(network: &str) -> String {
    let stem: String = network
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}{}", stem, env_vars::RPC_URL_SUFFIX)
}

fn resolve_network(name: &str, decl: &NetworkDecl, env: &EnvSnapshot) -> Result<NetworkProfile> {
    let override_var = rpc_override_var(name);
    let url = if env.contains(&override_var) {
        debug!("Network '{}' endpoint overridden by {}", name, override_var);
        Some(Interpolated::resolve(&var_ref(&override_var), env))
    } else {
        decl.url.as_deref().map(|t| Interpolated::resolve(t, env))
    };

    let accounts = match &decl.accounts {
        AccountsDecl::Keys(keys) => {
            Accounts::Keys(keys.iter().map(|k| Interpolated::resolve(k, env)).collect())
        }
        AccountsDecl::Generated { count } => Accounts::Generated { count: *count },
    };

    let forking = match &decl.forking {
        None => None,
        Some(f) => {
            let field = format!("networks.{}.forking", name);
            match (&f.url, f.block_number) {
                (None, None) => None,
                (Some(_), None) => {
                    return Err(ConfigError::malformed_forking(
                        name,
                        format!("{}.block_number", field),
                        "is missing while forking.url is set",
                    ));
                }
                (None, Some(_)) => {
                    return Err(ConfigError::malformed_forking(
                        name,
                        format!("{}.url", field),
                        "is missing while forking.block_number is set",
                    ));
                }
                (Some(_), Some(_)) if decl.kind != NetworkKind::Local => {
                    return Err(ConfigError::malformed_forking(
                        name,
                        field,
                        "is only allowed on a local network",
                    ));
                }
                (Some(url), Some(block_number)) => Some(ForkingDescriptor {
                    url: Interpolated::resolve(url, env),
                    block_number,
                }),
            }
        }
    };

    Ok(NetworkProfile {
        name: name.to_string(),
        kind: decl.kind,
        url,
        accounts,
        chain_id: decl.chain_id,
        forking,
        verifier: decl.verifier.clone().unwrap_or_else(|| name.to_string()),
    })
}

fn resolve_verifiers(defaults: &Defaults, env: &EnvSnapshot) -> BTreeMap<String, VerifierProfile> {
    let mut verifiers: BTreeMap<String, VerifierProfile> = defaults
        .verification
        .api_keys
        .iter()
        .map(|(name, template)| {
            let profile = VerifierProfile {
                name: name.clone(),
                api_key: Interpolated::resolve(template, env),
                custom_chain: None,
            };
            (name.clone(), profile)
        })
        .collect();

    for chain in &defaults.verification.custom_chains {
        verifiers
            .entry(chain.network.clone())
            .or_insert_with(|| VerifierProfile {
                name: chain.network.clone(),
                api_key: Interpolated::literal(""),
                custom_chain: None,
            })
            .custom_chain = Some(ExplorerChain {
            chain_id: chain.chain_id,
            api_url: Interpolated::resolve(&chain.urls.api_url, env),
            browser_url: Interpolated::resolve(&chain.urls.browser_url, env),
        });
    }

    verifiers
}

/// Check that `active_network` can be used for signed transactions and, when
/// `verify` is set, for contract verification. No default credential is ever
/// substituted. The RPC endpoint is not inspected; see [`validate_endpoint`].
pub fn validate_for_use(config: &ResolvedConfig, active_network: &str, verify: bool) -> Result<()> {
    let network = config.network(active_network)?;

    if !network.is_local() {
        check_credentials(network)?;
    }

    if verify {
        let verifier = config.verifier_for_network(active_network)?;
        if verifier.api_key().is_placeholder() {
            return Err(ConfigError::missing_api_key(
                active_network,
                format!("verification.api_keys.{}", verifier.name()),
            ));
        }
    }

    debug!(
        "Network '{}' ready for use (verify: {})",
        active_network, verify
    );
    Ok(())
}

fn check_credentials(network: &NetworkProfile) -> Result<()> {
    let field = format!("networks.{}.accounts", network.name());
    match network.accounts() {
        Accounts::Generated { .. } => Err(ConfigError::missing_credential(network.name(), field)),
        Accounts::Keys(_) => {
            if network.usable_credential().is_none() {
                let missing = network
                    .credentials()
                    .iter()
                    .flat_map(|c| c.unresolved().iter().map(String::as_str))
                    .collect::<Vec<_>>();
                if !missing.is_empty() {
                    warn!(
                        "Network '{}' signer depends on unset variable(s): {}",
                        network.name(),
                        missing.join(", ")
                    );
                }
                return Err(ConfigError::missing_credential(network.name(), field));
            }
            Ok(())
        }
    }
}

/// Stricter companion to [`validate_for_use`]: the RPC endpoint of a remote
/// `active_network` must resolve fully and parse as a URL.
/// Local networks always pass.
pub fn validate_endpoint(config: &ResolvedConfig, active_network: &str) -> Result<()> {
    let network = config.network(active_network)?;
    if network.is_local() {
        return Ok(());
    }

    let field = format!("networks.{}.url", network.name());
    let url = network
        .url()
        .ok_or_else(|| ConfigError::invalid_endpoint(network.name(), &field, "is not declared"))?;

    if !url.unresolved().is_empty() {
        return Err(ConfigError::invalid_endpoint(
            network.name(),
            &field,
            format!("references unset variable(s): {}", url.unresolved().join(", ")),
        ));
    }

    Url::parse(url.expose()).map_err(|e| {
        ConfigError::invalid_endpoint(network.name(), &field, format!("is not a valid URL ({})", e))
    })?;
    Ok(())
}

/// First compiler, in declaration order, whose version equals `requested`.
/// There is no fallback to any other profile.
pub fn select_compiler<'a>(config: &'a ResolvedConfig, requested: &str) -> Result<&'a CompilerProfile> {
    config
        .compilers()
        .iter()
        .find(|c| c.version == requested)
        .ok_or_else(|| ConfigError::NoMatchingCompiler {
            version: requested.to_string(),
            field: COMPILERS_FIELD.to_string(),
        })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CompilerSettings, ForkingDecl, OptimizerDetails, OptimizerSettings, VerificationDecl,
    };
    use crate::types::ErrorKind;
    use proptest::prelude::*;

    fn remote(url: &str) -> NetworkDecl {
        NetworkDecl {
            url: Some(url.to_string()),
            accounts: AccountsDecl::Keys(vec!["${PRIVATE_KEY}".to_string()]),
            ..NetworkDecl::default()
        }
    }

    fn local() -> NetworkDecl {
        NetworkDecl {
            kind: NetworkKind::Local,
            accounts: AccountsDecl::Generated { count: 10 },
            ..NetworkDecl::default()
        }
    }

    fn profile(version: &str, runs: u32) -> CompilerProfile {
        CompilerProfile {
            version: version.to_string(),
            settings: CompilerSettings {
                optimizer: OptimizerSettings {
                    enabled: true,
                    runs,
                    details: OptimizerDetails { yul: true },
                },
                via_ir: false,
            },
        }
    }

    fn defaults() -> Defaults {
        let mut networks = BTreeMap::new();
        networks.insert("hardhat".to_string(), local());
        networks.insert(
            "mainnet".to_string(),
            remote("https://mainnet.infura.io/v3/${INFURA_API_KEY}"),
        );
        networks.insert("sepolia".to_string(), remote("https://rpc.sepolia.org"));

        let mut api_keys = BTreeMap::new();
        api_keys.insert("mainnet".to_string(), "${ETHERSCAN_KEY}".to_string());

        Defaults {
            default_network: "hardhat".to_string(),
            networks,
            verification: VerificationDecl {
                api_keys,
                custom_chains: Vec::new(),
            },
            compilers: vec![profile("0.8.25", 200), profile("0.7.6", 1000)],
            ..Defaults::default()
        }
    }

    fn full_env() -> EnvSnapshot {
        EnvSnapshot::from_iter([
            ("PRIVATE_KEY", "0xabc"),
            ("INFURA_API_KEY", "infura"),
            ("ETHERSCAN_KEY", "scan"),
        ])
    }

    #[test]
    fn test_placeholder_environment_resolves_then_fails_validation() {
        let config = resolve(&EnvSnapshot::empty(), &defaults()).unwrap();

        let mainnet = config.network("mainnet").unwrap();
        assert_eq!(mainnet.credentials().len(), 1);
        assert_eq!(mainnet.credentials()[0].expose(), "");
        assert!(mainnet.credentials()[0].is_placeholder());

        let err = validate_for_use(&config, "mainnet", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert_eq!(err.network(), Some("mainnet"));
        assert_eq!(err.field(), Some("networks.mainnet.accounts"));
    }

    #[test]
    fn test_local_network_needs_no_credentials() {
        let config = resolve(&EnvSnapshot::empty(), &defaults()).unwrap();
        validate_for_use(&config, "hardhat", false).unwrap();
    }

    #[test]
    fn test_validate_unknown_network() {
        let config = resolve(&full_env(), &defaults()).unwrap();
        let err = validate_for_use(&config, "nonexistent", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownNetwork);
    }

    #[test]
    fn test_validate_ready_network() {
        let config = resolve(&full_env(), &defaults()).unwrap();
        validate_for_use(&config, "mainnet", false).unwrap();
        validate_for_use(&config, "mainnet", true).unwrap();
        validate_endpoint(&config, "mainnet").unwrap();
    }

    #[test]
    fn test_unresolved_endpoint_only_fails_endpoint_check() {
        let env = EnvSnapshot::empty().with("PRIVATE_KEY", "0xabc");
        let config = resolve(&env, &defaults()).unwrap();
        validate_for_use(&config, "mainnet", false).unwrap();

        let err = validate_endpoint(&config, "mainnet").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
        assert_eq!(err.field(), Some("networks.mainnet.url"));
        assert!(err.to_string().contains("INFURA_API_KEY"));
    }

    #[test]
    fn test_endpoint_check_skips_local_network() {
        let config = resolve(&EnvSnapshot::empty(), &defaults()).unwrap();
        validate_endpoint(&config, "hardhat").unwrap();
        assert_eq!(
            validate_endpoint(&config, "nonexistent").unwrap_err().kind(),
            ErrorKind::UnknownNetwork
        );
    }

    #[test]
    fn test_validate_unparsable_endpoint() {
        let mut d = defaults();
        d.networks.insert("broken".to_string(), remote("not a url"));
        let config = resolve(&full_env(), &d).unwrap();
        validate_for_use(&config, "broken", false).unwrap();
        let err = validate_endpoint(&config, "broken").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
        assert_eq!(err.field(), Some("networks.broken.url"));
    }

    #[test]
    fn test_generated_accounts_on_remote_network() {
        let mut d = defaults();
        d.networks.insert(
            "devnet".to_string(),
            NetworkDecl {
                url: Some("http://localhost:8545".to_string()),
                accounts: AccountsDecl::Generated { count: 5 },
                ..NetworkDecl::default()
            },
        );
        let config = resolve(&full_env(), &d).unwrap();
        let err = validate_for_use(&config, "devnet", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn test_one_usable_credential_is_enough() {
        let mut d = defaults();
        d.networks.insert(
            "multi".to_string(),
            NetworkDecl {
                url: Some("https://rpc.example.org".to_string()),
                accounts: AccountsDecl::Keys(vec![
                    "${DEPLOYER_KEY}".to_string(),
                    "${PRIVATE_KEY}".to_string(),
                ]),
                ..NetworkDecl::default()
            },
        );
        let config = resolve(&full_env(), &d).unwrap();
        validate_for_use(&config, "multi", false).unwrap();
        assert_eq!(
            config.network("multi").unwrap().usable_credential().unwrap().expose(),
            "0xabc"
        );
    }

    #[test]
    fn test_verify_requires_api_key() {
        let env = EnvSnapshot::from_iter([("PRIVATE_KEY", "0xabc"), ("INFURA_API_KEY", "i")]);
        let config = resolve(&env, &defaults()).unwrap();

        let err = validate_for_use(&config, "mainnet", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);
        assert_eq!(err.field(), Some("verification.api_keys.mainnet"));

        let err = validate_for_use(&config, "sepolia", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingApiKey);
        assert_eq!(err.network(), Some("sepolia"));
    }

    #[test]
    fn test_default_network_must_exist() {
        let mut d = defaults();
        d.default_network = "localhost".to_string();
        let err = resolve(&full_env(), &d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownNetwork);
        assert_eq!(err.field(), Some("default_network"));
    }

    #[test]
    fn test_forking_requires_both_fields() {
        let mut d = defaults();
        d.networks.get_mut("hardhat").unwrap().forking = Some(ForkingDecl {
            url: Some("https://eth.llamarpc.com".to_string()),
            block_number: None,
        });
        let err = resolve(&full_env(), &d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedForkingDescriptor);
        assert_eq!(err.field(), Some("networks.hardhat.forking.block_number"));

        d.networks.get_mut("hardhat").unwrap().forking = Some(ForkingDecl {
            url: None,
            block_number: Some(1),
        });
        let err = resolve(&full_env(), &d).unwrap_err();
        assert_eq!(err.field(), Some("networks.hardhat.forking.url"));
    }

    #[test]
    fn test_forking_neither_field_is_no_fork() {
        let mut d = defaults();
        d.networks.get_mut("hardhat").unwrap().forking = Some(ForkingDecl::default());
        let config = resolve(&full_env(), &d).unwrap();
        assert!(config.network("hardhat").unwrap().forking().is_none());
    }

    #[test]
    fn test_forking_rejected_on_remote_network() {
        let mut d = defaults();
        d.networks.get_mut("sepolia").unwrap().forking = Some(ForkingDecl {
            url: Some("https://eth.llamarpc.com".to_string()),
            block_number: Some(100),
        });
        let err = resolve(&full_env(), &d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedForkingDescriptor);
        assert_eq!(err.network(), Some("sepolia"));
    }

    #[test]
    fn test_forking_url_is_interpolated() {
        let mut d = defaults();
        d.networks.get_mut("hardhat").unwrap().forking = Some(ForkingDecl {
            url: Some("https://mainnet.infura.io/v3/${INFURA_API_KEY}".to_string()),
            block_number: Some(19_810_683),
        });
        let config = resolve(&full_env(), &d).unwrap();
        let fork = config.network("hardhat").unwrap().forking().unwrap();
        assert_eq!(fork.url.expose(), "https://mainnet.infura.io/v3/infura");
        assert_eq!(fork.block_number, 19_810_683);
    }

    #[test]
    fn test_rpc_override() {
        let env = full_env().with("SEPOLIA_RPC_URL", "https://my-node.example.org");
        let config = resolve(&env, &defaults()).unwrap();
        let url = config.network("sepolia").unwrap().url().unwrap();
        assert_eq!(url.expose(), "https://my-node.example.org");
        assert_eq!(url.template(), "${SEPOLIA_RPC_URL}");

        let mainnet = config.network("mainnet").unwrap().url().unwrap();
        assert_eq!(mainnet.expose(), "https://mainnet.infura.io/v3/infura");
    }

    #[test]
    fn test_rpc_override_var_names() {
        assert_eq!(rpc_override_var("sepolia"), "SEPOLIA_RPC_URL");
        assert_eq!(rpc_override_var("bsc-testnet"), "BSC_TESTNET_RPC_URL");
    }

    #[test]
    fn test_select_compiler_first_match_wins() {
        let mut d = defaults();
        d.compilers = vec![
            profile("0.8.25", 200),
            profile("0.7.6", 1000),
            profile("0.8.25", 99999),
        ];
        let config = resolve(&full_env(), &d).unwrap();
        for _ in 0..3 {
            let selected = select_compiler(&config, "0.8.25").unwrap();
            assert_eq!(selected.settings.optimizer.runs, 200);
        }
        assert_eq!(
            config.compiler_for("0.7.6").unwrap().settings.optimizer.runs,
            1000
        );
    }

    #[test]
    fn test_select_compiler_no_fallback() {
        let config = resolve(&full_env(), &defaults()).unwrap();
        let err = select_compiler(&config, "0.6.12").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoMatchingCompiler);
        assert_eq!(err.field(), Some(COMPILERS_FIELD));

        // prefix or range matches are not exact matches
        assert!(select_compiler(&config, "0.8").is_err());
        assert!(select_compiler(&config, "^0.8.25").is_err());
    }

    #[test]
    fn test_custom_chain_without_api_key() {
        let mut d = defaults();
        d.verification.custom_chains.push(crate::config::CustomChain {
            network: "kaia".to_string(),
            chain_id: 8217,
            urls: crate::config::ExplorerUrls {
                api_url: "https://api.example.org".to_string(),
                browser_url: "https://example.org".to_string(),
            },
        });
        let config = resolve(&full_env(), &d).unwrap();
        let verifier = config.verifier("kaia").unwrap();
        assert!(verifier.api_key().is_placeholder());
        assert_eq!(verifier.custom_chain().unwrap().chain_id, 8217);
    }

    #[test]
    fn test_custom_chain_urls_are_interpolated() {
        let mut d = defaults();
        d.verification.custom_chains.push(crate::config::CustomChain {
            network: "kaia".to_string(),
            chain_id: 8217,
            urls: crate::config::ExplorerUrls {
                api_url: "https://api.example.org/${SCOPE_HOST}".to_string(),
                browser_url: "https://${SCOPE_BROWSER}.example.org".to_string(),
            },
        });
        let env = full_env().with("SCOPE_HOST", "v1");
        let config = resolve(&env, &d).unwrap();
        let chain = config.verifier("kaia").unwrap().custom_chain().unwrap();

        assert_eq!(chain.api_url.expose(), "https://api.example.org/v1");
        assert!(!chain.api_url.is_placeholder());
        assert_eq!(chain.browser_url.unresolved(), ["SCOPE_BROWSER".to_string()]);
        assert!(chain.browser_url.is_placeholder());

        let json = serde_json::to_string(chain).unwrap();
        assert!(json.contains("https://api.example.org/${SCOPE_HOST}"));
        assert!(!json.contains("/v1"));
    }

    #[test]
    fn test_builtin_mainnet_scenario() {
        let config = resolve(&EnvSnapshot::empty(), &Defaults::builtin()).unwrap();
        assert!(config.network("mainnet").unwrap().credentials()[0].is_placeholder());
        assert_eq!(
            validate_for_use(&config, "mainnet", false).unwrap_err().kind(),
            ErrorKind::MissingCredential
        );
        validate_for_use(&config, "hardhat", false).unwrap();
    }

    #[test]
    fn test_builtin_network_names_round_trip() {
        let defaults = Defaults::builtin();
        let config = resolve(&EnvSnapshot::empty(), &defaults).unwrap();
        for name in defaults.networks.keys() {
            assert_eq!(config.network(name).unwrap().name(), name);
        }
    }

    fn env_strategy() -> impl Strategy<Value = EnvSnapshot> {
        prop::collection::btree_map(
            prop_oneof![
                Just("PRIVATE_KEY".to_string()),
                Just("INFURA_API_KEY".to_string()),
                Just("ETHERSCAN_KEY".to_string()),
                Just("SEPOLIA_RPC_URL".to_string()),
                "[A-Z]{1,8}",
            ],
            "[a-z0-9:/.]{0,24}",
            0..6,
        )
        .prop_map(EnvSnapshot::from_iter)
    }

    fn env_without_signer() -> impl Strategy<Value = EnvSnapshot> {
        prop::collection::btree_map(
            prop_oneof![
                Just("INFURA_API_KEY".to_string()),
                Just("ETHERSCAN_KEY".to_string()),
                "[A-Z]{1,8}",
            ],
            "[a-z0-9]{1,16}",
            0..4,
        )
        .prop_map(EnvSnapshot::from_iter)
    }

    proptest! {
        #[test]
        fn prop_resolve_is_deterministic(env in env_strategy()) {
            let d = Defaults::builtin();
            prop_assert_eq!(resolve(&env, &d).unwrap(), resolve(&env, &d).unwrap());
        }

        #[test]
        fn prop_every_declared_network_resolves_under_its_name(env in env_strategy()) {
            let d = Defaults::builtin();
            let config = resolve(&env, &d).unwrap();
            for name in d.networks.keys() {
                prop_assert_eq!(config.network(name).unwrap().name(), name.as_str());
            }
        }

        #[test]
        fn prop_missing_private_key_blocks_remote_networks(env in env_without_signer()) {
            let config = resolve(&env, &Defaults::builtin()).unwrap();
            for network in config.networks().filter(|n| !n.is_local()) {
                let err = validate_for_use(&config, network.name(), false).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::MissingCredential);
            }
        }
    }
}
