//! `${VAR}` Template Interpolation
//!
//! Two phases are kept apart: the declared template is stored verbatim, and
//! the value produced from it against an [`EnvSnapshot`] is stored next to it.
//! Interpolation never fails. A variable the environment does not supply
//! becomes [`PLACEHOLDER_SENTINEL`] and is recorded as unresolved so that
//! validation can report it later.

use regex::{Captures, Regex};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

use crate::constants::PLACEHOLDER_SENTINEL;
use crate::types::EnvSnapshot;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("variable pattern is valid")
});

/// Names of all variables referenced by a template, in order of appearance
pub fn referenced_vars(template: &str) -> Vec<String> {
    VAR_PATTERN
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Template-form reference to a single variable
pub fn var_ref(name: &str) -> String {
    format!("${{{}}}", name)
}

/// A declared template together with the value it resolved to
///
/// The resolved value is held as a secret: it is what signer keys and API
/// keys end up in. `Debug` and `Serialize` only ever show the template.
#[derive(Clone)]
pub struct Interpolated {
    template: String,
    value: SecretString,
    unresolved: Vec<String>,
}

impl Interpolated {
    /// Interpolate `template` against `env`
    pub fn resolve(template: &str, env: &EnvSnapshot) -> Self {
        let mut unresolved = Vec::new();
        let value = VAR_PATTERN.replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            match env.get(name) {
                Some(v) => v.to_string(),
                None => {
                    if !unresolved.iter().any(|u| u == name) {
                        unresolved.push(name.to_string());
                    }
                    PLACEHOLDER_SENTINEL.to_string()
                }
            }
        });

        Self {
            template: template.to_string(),
            value: SecretString::from(value.into_owned()),
            unresolved,
        }
    }

    /// A value with no variables in it
    pub fn literal(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            value: SecretString::from(value.clone()),
            template: value,
            unresolved: Vec::new(),
        }
    }

    /// Declared form, e.g. `https://mainnet.infura.io/v3/${INFURA_API_KEY}`
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Resolved value. Avoid logging it.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    /// Variables the environment did not supply
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn is_templated(&self) -> bool {
        VAR_PATTERN.is_match(&self.template)
    }

    /// True when the value cannot be used as-is: some variable was missing
    /// or the result is blank.
    pub fn is_placeholder(&self) -> bool {
        !self.unresolved.is_empty() || self.expose().trim().is_empty()
    }
}

impl PartialEq for Interpolated {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
            && self.unresolved == other.unresolved
            && self.expose() == other.expose()
    }
}

impl Eq for Interpolated {}

impl std::fmt::Debug for Interpolated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Interpolated");
        s.field("template", &self.template);
        if self.is_templated() {
            s.field("value", &"[REDACTED]");
        } else {
            s.field("value", &self.template);
        }
        s.field("unresolved", &self.unresolved).finish()
    }
}

impl Serialize for Interpolated {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.template)
    }
}
