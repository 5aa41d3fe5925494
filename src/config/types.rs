//! Declared Configuration Types
//!
//! The raw defaults tree exactly as written by the project: templates such as
//! `https://sepolia.infura.io/v3/${INFURA_API_KEY}` are kept verbatim here and
//! only turned into values by the resolver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root of the declared configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Network used when none is requested explicitly
    pub default_network: String,

    /// Network declarations keyed by name
    pub networks: BTreeMap<String, NetworkDecl>,

    /// Block explorer API keys and custom chains
    pub verification: VerificationDecl,

    /// Compiler profiles in declaration order
    pub compilers: Vec<CompilerProfile>,

    /// Project path layout
    pub paths: PathsConfig,

    /// Tool sections passed through untouched (gas reporter, sizer, docgen, ...)
    pub reporting: BTreeMap<String, serde_json::Value>,
}

// =============================================================================
// Networks
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// In-process simulated chain; accounts are generated locally
    Local,
    /// Real or hosted chain reached over RPC
    #[default]
    Remote,
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkKind::Local => write!(f, "local"),
            NetworkKind::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDecl {
    pub kind: NetworkKind,

    /// RPC endpoint template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub accounts: AccountsDecl,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forking: Option<ForkingDecl>,

    /// Explorer key this network verifies under (defaults to the network name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,
}

/// Signer accounts as declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountsDecl {
    /// Private key templates, e.g. `${PRIVATE_KEY}`
    Keys(Vec<String>),
    /// Locally generated accounts (simulated network only)
    Generated { count: u32 },
}

impl Default for AccountsDecl {
    fn default() -> Self {
        AccountsDecl::Keys(Vec::new())
    }
}

/// Snapshot source for a simulated network. Both fields or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForkingDecl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

// =============================================================================
// Verification
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationDecl {
    /// API key templates keyed by explorer network name
    pub api_keys: BTreeMap<String, String>,

    /// Explorers the verification tool does not know natively
    pub custom_chains: Vec<CustomChain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomChain {
    pub network: String,
    pub chain_id: u64,
    pub urls: ExplorerUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerUrls {
    pub api_url: String,
    pub browser_url: String,
}

// =============================================================================
// Compilers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerProfile {
    pub version: String,

    #[serde(default)]
    pub settings: CompilerSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    pub optimizer: OptimizerSettings,

    /// Compile through the intermediate representation pipeline
    pub via_ir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
    pub details: OptimizerDetails,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: 200,
            details: OptimizerDetails::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerDetails {
    pub yul: bool,
}

// =============================================================================
// Paths
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub sources: PathBuf,
    pub tests: PathBuf,
    pub cache: PathBuf,
    pub artifacts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("./contracts"),
            tests: PathBuf::from("./tests"),
            cache: PathBuf::from("./cache"),
            artifacts: PathBuf::from("./artifacts"),
        }
    }
}

impl PathsConfig {
    /// Paths made absolute against a project root. Absolute entries are kept.
    pub fn rooted_at(&self, root: &std::path::Path) -> Self {
        let join = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p.strip_prefix("./").unwrap_or(p.as_path()))
            }
        };
        Self {
            sources: join(&self.sources),
            tests: join(&self.tests),
            cache: join(&self.cache),
            artifacts: join(&self.artifacts),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
