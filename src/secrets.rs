use std::{collections::HashMap, env, fs, path::Path};

use eyre::Context;

/// Source of optional secret values, such as verification API keys.
pub trait SecretProvider {
    /// Looks up the secret named `key`, `None` when it is not configured.
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads secrets from process environment variables.
pub struct EnvSecrets;

impl SecretProvider for EnvSecrets {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}

/// Reads secrets from a JSON file holding a flat map of names to values.
#[derive(Debug, Default)]
pub struct VarsStore {
    values: HashMap<String, String>,
}

impl VarsStore {
    /// Loads the store at `path`. A missing file yields an empty store, so
    /// an unset secret behaves the same in both backends.
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).wrap_err("could not open secret variables store")?;
        let values = serde_json::from_str(&raw).wrap_err("malformed secret variables store")?;
        Ok(Self { values })
    }
}

impl SecretProvider for VarsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
