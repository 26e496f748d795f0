use std::fs;

use eyre::Context;

use crate::config::PrivateKey;

impl PrivateKey {
    /// Signing credentials configured for the deployer account.
    ///
    /// Yields at most one entry. An empty list means no credential was
    /// configured; the failure then surfaces when the deployment is signed,
    /// not here.
    pub fn accounts(&self) -> eyre::Result<Vec<String>> {
        if let Some(key) = &self.private_key {
            return Ok(vec![key.clone()]);
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return Ok(vec![key.trim().to_owned()]);
        }

        Ok(Vec::new())
    }
}
