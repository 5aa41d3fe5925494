//! Configuration Resolver
//!
//! Declared defaults + environment snapshot -> immutable [`ResolvedConfig`].
//!
//! - [`resolve`]: interpolate every `${VAR}` template, never failing on unset variables
//! - [`validate_for_use`]: lazy checks for the one network actually selected
//! - [`validate_endpoint`]: opt-in RPC endpoint check for that network
//! - [`select_compiler`]: first exact version match, in declaration order

mod interpolate;
mod resolve;
mod resolved;

pub use interpolate::{Interpolated, referenced_vars, var_ref};
pub use resolve::{
    resolve, rpc_override_var, select_compiler, validate_endpoint, validate_for_use,
};
pub use resolved::{
    Accounts, ExplorerChain, ForkingDescriptor, NetworkProfile, ReportingFlags, ResolvedConfig,
    VerifierProfile,
};
