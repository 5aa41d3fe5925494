pub mod env;
pub mod error;

pub use env::EnvSnapshot;
pub use error::{ConfigError, ErrorKind, Result};
