//! Resolved Configuration
//!
//! The immutable result of resolution. Built once per invocation by
//! [`resolve()`](super::resolve()) and then only read through the accessors below.

use serde::Serialize;
use std::collections::BTreeMap;

use super::interpolate::Interpolated;
use super::resolve::select_compiler;
use crate::config::{CompilerProfile, NetworkKind, PathsConfig};
use crate::types::{ConfigError, Result};

// =============================================================================
// Network Profile
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub(super) name: String,
    pub(super) kind: NetworkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) url: Option<Interpolated>,
    pub(super) accounts: Accounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) chain_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) forking: Option<ForkingDescriptor>,
    pub(super) verifier: String,
}

impl NetworkProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }

    pub fn is_local(&self) -> bool {
        self.kind == NetworkKind::Local
    }

    /// RPC endpoint. Absent for the in-process network.
    pub fn url(&self) -> Option<&Interpolated> {
        self.url.as_ref()
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// Signer credentials; empty when accounts are generated locally
    pub fn credentials(&self) -> &[Interpolated] {
        match &self.accounts {
            Accounts::Keys(keys) => keys.as_slice(),
            Accounts::Generated { .. } => &[],
        }
    }

    /// First credential that resolved to a usable value
    pub fn usable_credential(&self) -> Option<&Interpolated> {
        self.credentials().iter().find(|c| !c.is_placeholder())
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn forking(&self) -> Option<&ForkingDescriptor> {
        self.forking.as_ref()
    }

    /// Explorer key this network verifies under
    pub fn verifier_key(&self) -> &str {
        &self.verifier
    }

    /// Every variable referenced by this network that the environment lacked
    pub fn unresolved_vars(&self) -> Vec<&str> {
        let mut vars: Vec<&str> = self
            .url
            .iter()
            .chain(self.credentials())
            .chain(self.forking.iter().map(|f| &f.url))
            .flat_map(|v| v.unresolved().iter().map(String::as_str))
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Accounts {
    Keys(Vec<Interpolated>),
    Generated { count: u32 },
}

/// Live chain snapshot a local network starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkingDescriptor {
    pub url: Interpolated,
    pub block_number: u64,
}

// =============================================================================
// Verifier Profile
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifierProfile {
    pub(super) name: String,
    pub(super) api_key: Interpolated,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) custom_chain: Option<ExplorerChain>,
}

impl VerifierProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api_key(&self) -> &Interpolated {
        &self.api_key
    }

    pub fn custom_chain(&self) -> Option<&ExplorerChain> {
        self.custom_chain.as_ref()
    }

    /// Variables referenced by the API key or explorer URLs that the
    /// environment lacked
    pub fn unresolved_vars(&self) -> Vec<&str> {
        let chain_urls = self
            .custom_chain
            .iter()
            .flat_map(|c| [&c.api_url, &c.browser_url]);
        let mut vars: Vec<&str> = std::iter::once(&self.api_key)
            .chain(chain_urls)
            .flat_map(|v| v.unresolved().iter().map(String::as_str))
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }
}

/// Explorer the verification tool does not know natively
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerChain {
    pub chain_id: u64,
    pub api_url: Interpolated,
    pub browser_url: Interpolated,
}

// =============================================================================
// Reporting Flags
// =============================================================================

/// Tool sections passed through to external tooling untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportingFlags(pub(super) BTreeMap<String, serde_json::Value>);

impl ReportingFlags {
    pub fn section(&self, tool: &str) -> Option<&serde_json::Value> {
        self.0.get(tool)
    }

    /// Boolean setting inside a tool section, e.g. `("gasReporter", "enabled")`
    pub fn flag(&self, tool: &str, key: &str) -> Option<bool> {
        self.section(tool)?.get(key)?.as_bool()
    }

    pub fn tools(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    pub(super) default_network: String,
    pub(super) networks: BTreeMap<String, NetworkProfile>,
    pub(super) compilers: Vec<CompilerProfile>,
    pub(super) verifiers: BTreeMap<String, VerifierProfile>,
    pub(super) paths: PathsConfig,
    pub(super) reporting: ReportingFlags,
}

impl ResolvedConfig {
    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    /// Profile of the network named `name`; exact, case-sensitive match
    pub fn network(&self, name: &str) -> Result<&NetworkProfile> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::unknown_network(name, "networks"))
    }

    /// `requested` if given, the default network otherwise
    pub fn active_network(&self, requested: Option<&str>) -> Result<&NetworkProfile> {
        self.network(requested.unwrap_or(&self.default_network))
    }

    pub fn networks(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn compiler_for(&self, version: &str) -> Result<&CompilerProfile> {
        select_compiler(self, version)
    }

    pub fn compilers(&self) -> &[CompilerProfile] {
        &self.compilers
    }

    /// Verifier registered under explorer key `name`
    pub fn verifier(&self, name: &str) -> Result<&VerifierProfile> {
        self.verifiers.get(name).ok_or_else(|| {
            ConfigError::missing_api_key(name, format!("verification.api_keys.{}", name))
        })
    }

    /// Verifier used when verifying on network `network`
    pub fn verifier_for_network(&self, network: &str) -> Result<&VerifierProfile> {
        let profile = self.network(network)?;
        let key = profile.verifier_key();
        self.verifiers.get(key).ok_or_else(|| {
            ConfigError::missing_api_key(network, format!("verification.api_keys.{}", key))
        })
    }

    pub fn verifiers(&self) -> impl Iterator<Item = &VerifierProfile> {
        self.verifiers.values()
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    pub fn reporting(&self) -> &ReportingFlags {
        &self.reporting
    }
}
