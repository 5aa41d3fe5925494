//! Built-in Defaults Tree
//!
//! The literal table the resolver ships with. Project files and
//! `CHAINRIG__*` variables are layered on top of it by the loader.

use serde_json::json;
use std::collections::BTreeMap;

use super::types::{
    AccountsDecl, CompilerProfile, CompilerSettings, CustomChain, Defaults, ExplorerUrls,
    ForkingDecl, NetworkDecl, NetworkKind, OptimizerDetails, OptimizerSettings, PathsConfig,
    VerificationDecl,
};
use crate::constants::{env_vars, networks};

impl Defaults {
    /// The built-in table of networks, explorers, compilers and tool settings
    pub fn builtin() -> Self {
        Self {
            default_network: networks::LOCAL.to_string(),
            networks: builtin_networks(),
            verification: builtin_verification(),
            compilers: builtin_compilers(),
            paths: PathsConfig::default(),
            reporting: builtin_reporting(),
        }
    }
}

fn var(name: &str) -> String {
    format!("${{{}}}", name)
}

fn signer() -> AccountsDecl {
    AccountsDecl::Keys(vec![var(env_vars::PRIVATE_KEY)])
}

fn remote(url: String, chain_id: Option<u64>) -> NetworkDecl {
    NetworkDecl {
        kind: NetworkKind::Remote,
        url: Some(url),
        accounts: signer(),
        chain_id,
        forking: None,
        verifier: None,
    }
}

fn infura(subdomain: &str) -> String {
    format!(
        "https://{}.infura.io/v3/{}",
        subdomain,
        var(env_vars::INFURA_API_KEY)
    )
}

fn builtin_networks() -> BTreeMap<String, NetworkDecl> {
    let mut decls = BTreeMap::new();

    decls.insert(
        networks::LOCAL.to_string(),
        NetworkDecl {
            kind: NetworkKind::Local,
            url: None,
            accounts: AccountsDecl::Generated { count: 10 },
            chain_id: None,
            forking: Some(ForkingDecl {
                url: Some("https://eth.llamarpc.com".to_string()),
                block_number: Some(19_810_683),
            }),
            verifier: None,
        },
    );
    decls.insert(
        "tenderly".to_string(),
        remote(
            "https://rpc.tenderly.co/fork/403aa1fd-52c2-443e-9cb5-5817e2776c3b".to_string(),
            None,
        ),
    );
    decls.insert("sepolia".to_string(), remote(infura("sepolia"), Some(11_155_111)));
    decls.insert("goerli".to_string(), remote(infura("goerli"), Some(5)));
    decls.insert("mainnet".to_string(), remote(infura("mainnet"), Some(1)));
    decls.insert(
        "mumbai".to_string(),
        NetworkDecl {
            verifier: Some("polygonMumbai".to_string()),
            ..remote(
                "https://matic-mumbai.chainstacklabs.com/".to_string(),
                Some(80_001),
            )
        },
    );
    decls.insert(
        "bsctestnet".to_string(),
        remote(
            "https://data-seed-prebsc-1-s1.binance.org:8545/".to_string(),
            Some(97),
        ),
    );
    decls.insert(
        "xlayer".to_string(),
        remote(
            "https://endpoints.omniatech.io/v1/xlayer/mainnet/public".to_string(),
            None,
        ),
    );
    decls.insert(
        "baobab".to_string(),
        NetworkDecl {
            verifier: Some("klaytn".to_string()),
            ..remote(
                "https://public-en-baobab.klaytn.net".to_string(),
                Some(1001),
            )
        },
    );
    decls.insert(
        "ip".to_string(),
        remote("https://testnet.storyrpc.io/".to_string(), None),
    );

    decls
}

fn builtin_verification() -> VerificationDecl {
    let etherscan = var(env_vars::ETHERSCAN_KEY);
    let bscscan = var(env_vars::BSCSCAN_KEY);
    let polygonscan = var(env_vars::POLYGONSCAN_KEY);

    let api_keys = [
        ("goerli", etherscan.as_str()),
        ("sepolia", etherscan.as_str()),
        ("mainnet", etherscan.as_str()),
        ("bscTestnet", bscscan.as_str()),
        ("bsctestnet", bscscan.as_str()),
        ("polygonMumbai", polygonscan.as_str()),
        ("polygonMainnet", polygonscan.as_str()),
        // klaytnscope accepts any non-empty key
        ("klaytn", "unnecessary"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    VerificationDecl {
        api_keys,
        custom_chains: vec![CustomChain {
            network: "klaytn".to_string(),
            chain_id: 1001,
            urls: ExplorerUrls {
                api_url: "https://api-baobab.klaytnscope.com/api".to_string(),
                browser_url: "https://baobab.klaytnscope.com".to_string(),
            },
        }],
    }
}

fn optimized(version: &str, via_ir: bool) -> CompilerProfile {
    CompilerProfile {
        version: version.to_string(),
        settings: CompilerSettings {
            optimizer: OptimizerSettings {
                enabled: true,
                runs: 200,
                details: OptimizerDetails { yul: true },
            },
            via_ir,
        },
    }
}

fn builtin_compilers() -> Vec<CompilerProfile> {
    vec![optimized("0.8.25", true), optimized("0.7.6", false)]
}

fn builtin_reporting() -> BTreeMap<String, serde_json::Value> {
    [
        (
            "mocha",
            json!({
                "timeout": 200000,
                "reporter": "mocha-multi-reporters",
                "reporterOptions": { "configFile": "./mocha-report.json" },
            }),
        ),
        (
            "docgen",
            json!({ "path": "./docs", "clear": true, "runOnCompile": false }),
        ),
        (
            "contractSizer",
            json!({ "alphaSort": true, "runOnCompile": true, "disambiguatePaths": false }),
        ),
        (
            "gasReporter",
            json!({ "currency": "ETH", "gasPrice": 18, "enabled": true, "excludeContracts": [] }),
        ),
        (
            "typechain",
            json!({ "outDir": "typechain-types", "target": "ethers-v6" }),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_default_network_is_local() {
        let defaults = Defaults::builtin();
        let local = &defaults.networks[&defaults.default_network];
        assert_eq!(local.kind, NetworkKind::Local);
        assert_eq!(local.accounts, AccountsDecl::Generated { count: 10 });
    }

    #[test]
    fn test_builtin_remote_networks_use_private_key() {
        let defaults = Defaults::builtin();
        for (name, decl) in &defaults.networks {
            if decl.kind == NetworkKind::Remote {
                assert_eq!(
                    decl.accounts,
                    AccountsDecl::Keys(vec!["${PRIVATE_KEY}".to_string()]),
                    "{} should sign with PRIVATE_KEY",
                    name
                );
                assert!(decl.forking.is_none());
            }
        }
    }

    #[test]
    fn test_builtin_compiler_order() {
        let defaults = Defaults::builtin();
        let versions: Vec<_> = defaults.compilers.iter().map(|c| c.version.as_str()).collect();
        assert_eq!(versions, vec!["0.8.25", "0.7.6"]);
        assert!(defaults.compilers[0].settings.via_ir);
        assert!(!defaults.compilers[1].settings.via_ir);
    }

    #[test]
    fn test_builtin_verifier_aliases_exist() {
        let defaults = Defaults::builtin();
        for decl in defaults.networks.values() {
            if let Some(key) = &decl.verifier {
                assert!(defaults.verification.api_keys.contains_key(key));
            }
        }
    }

    #[test]
    fn test_builtin_serializes_to_toml() {
        let text = toml::to_string_pretty(&Defaults::builtin()).unwrap();
        let back: Defaults = toml::from_str(&text).unwrap();
        assert_eq!(back.networks.len(), Defaults::builtin().networks.len());
        assert_eq!(back.compilers, Defaults::builtin().compilers);
    }
}
