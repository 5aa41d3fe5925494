//! Unified Error Type System
//!
//! Every failure the resolver can produce is a [`ConfigError`]. Domain
//! variants carry the offending network name and a dotted field path
//! (e.g. `networks.sepolia.accounts`) so the operator knows exactly what to fix.
//!
//! ## Error Kinds
//!
//! - **MissingCredential**: active network has no usable signer
//! - **MissingApiKey**: verification requested without an explorer key
//! - **UnknownNetwork**: name not present in the resolved mapping
//! - **NoMatchingCompiler**: no declared compiler has the requested version
//! - **MalformedForkingDescriptor**: forking needs both URL and block height
//! - **InvalidEndpoint**: active network RPC URL is unresolved or unparsable
//!
//! None of these are transient. Nothing here is retried or downgraded.

use thiserror::Error;

// =============================================================================
// Error Kinds
// =============================================================================

/// Programmatic classification of a [`ConfigError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingCredential,
    MissingApiKey,
    UnknownNetwork,
    NoMatchingCompiler,
    MalformedForkingDescriptor,
    InvalidEndpoint,
    /// Layered configuration could not be extracted
    Load,
    Io,
    Serialize,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "MISSING_CREDENTIAL"),
            Self::MissingApiKey => write!(f, "MISSING_API_KEY"),
            Self::UnknownNetwork => write!(f, "UNKNOWN_NETWORK"),
            Self::NoMatchingCompiler => write!(f, "NO_MATCHING_COMPILER"),
            Self::MalformedForkingDescriptor => write!(f, "MALFORMED_FORKING_DESCRIPTOR"),
            Self::InvalidEndpoint => write!(f, "INVALID_ENDPOINT"),
            Self::Load => write!(f, "LOAD"),
            Self::Io => write!(f, "IO"),
            Self::Serialize => write!(f, "SERIALIZE"),
        }
    }
}

impl ErrorKind {
    /// Whether the error came from the resolver's domain checks
    /// rather than from reading or writing configuration sources
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Load | Self::Io | Self::Serialize)
    }
}

// =============================================================================
// Configuration Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    // -------------------------------------------------------------------------
    // Resolution / Validation Errors
    // -------------------------------------------------------------------------
    #[error("Missing credential for network '{network}': {field} has no usable signer key")]
    MissingCredential { network: String, field: String },

    #[error("Missing API key for network '{network}': {field} is not set")]
    MissingApiKey { network: String, field: String },

    #[error("Unknown network '{network}' (referenced by {field})")]
    UnknownNetwork { network: String, field: String },

    #[error("No compiler profile matches version {version} (checked {field})")]
    NoMatchingCompiler { version: String, field: String },

    #[error("Malformed forking descriptor on network '{network}': {field} {reason}")]
    MalformedForkingDescriptor {
        network: String,
        field: String,
        reason: String,
    },

    #[error("Invalid endpoint for network '{network}': {field} {reason}")]
    InvalidEndpoint {
        network: String,
        field: String,
        reason: String,
    },

    // -------------------------------------------------------------------------
    // Source Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl ConfigError {
    pub fn missing_credential(network: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingCredential {
            network: network.into(),
            field: field.into(),
        }
    }

    pub fn missing_api_key(network: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingApiKey {
            network: network.into(),
            field: field.into(),
        }
    }

    pub fn unknown_network(network: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownNetwork {
            network: network.into(),
            field: field.into(),
        }
    }

    pub fn malformed_forking(
        network: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedForkingDescriptor {
            network: network.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_endpoint(
        network: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEndpoint {
            network: network.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::MissingApiKey { .. } => ErrorKind::MissingApiKey,
            Self::UnknownNetwork { .. } => ErrorKind::UnknownNetwork,
            Self::NoMatchingCompiler { .. } => ErrorKind::NoMatchingCompiler,
            Self::MalformedForkingDescriptor { .. } => ErrorKind::MalformedForkingDescriptor,
            Self::InvalidEndpoint { .. } => ErrorKind::InvalidEndpoint,
            Self::Load(_) => ErrorKind::Load,
            Self::Io(_) => ErrorKind::Io,
            Self::Serialize(_) => ErrorKind::Serialize,
        }
    }

    /// Network the error refers to, if any
    pub fn network(&self) -> Option<&str> {
        match self {
            Self::MissingCredential { network, .. }
            | Self::MissingApiKey { network, .. }
            | Self::UnknownNetwork { network, .. }
            | Self::MalformedForkingDescriptor { network, .. }
            | Self::InvalidEndpoint { network, .. } => Some(network),
            _ => None,
        }
    }

    /// Dotted path of the offending field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingCredential { field, .. }
            | Self::MissingApiKey { field, .. }
            | Self::UnknownNetwork { field, .. }
            | Self::NoMatchingCompiler { field, .. }
            | Self::MalformedForkingDescriptor { field, .. }
            | Self::InvalidEndpoint { field, .. } => Some(field),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
