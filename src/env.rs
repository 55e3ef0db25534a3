//! Environment variable seam.
//!
//! Config loading reads variables through [`Env`] instead of touching
//! [`std::env`] directly, so tests can inject a fixed set of values without
//! mutating process-global state.

use std::collections::HashMap;

/// Environment variable reader backed either by the process environment or,
/// in tests, by an explicit map.
#[derive(Clone, Debug, Default)]
pub struct Env {
    fixed: Option<HashMap<String, String>>,
}

impl Env {
    /// Reader over the real process environment.
    pub fn process() -> Self {
        Self { fixed: None }
    }

    /// Reader over a fixed set of variables. Anything not listed is absent.
    pub fn fixed(vars: &[(&str, &str)]) -> Self {
        Self {
            fixed: Some(
                vars.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    /// Look up a variable. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match &self.fixed {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Whether a variable is present and non-empty.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
