use std::collections::HashMap;

use crate::secrets::SecretProvider;

/// Name of the target network as the verification service knows it.
pub const BSC_TESTNET: &str = "bscTestnet";

/// Explorer API keys for contract verification, keyed by network name.
///
/// Verification is optional and independent from deployment; a missing key
/// never fails resolution.
#[derive(Debug, Default)]
pub struct VerificationConfig {
    api_keys: HashMap<String, String>,
}

impl VerificationConfig {
    /// Resolves verification keys from `secrets`.
    pub fn resolve(secrets: &dyn SecretProvider) -> Self {
        let mut api_keys = HashMap::new();
        if let Some(key) = secrets.get("BSCSCAN_API_KEY") {
            api_keys.insert(BSC_TESTNET.to_owned(), key);
        }
        Self { api_keys }
    }

    /// The API key configured for `network`, if any.
    pub fn api_key(&self, network: &str) -> Option<&str> {
        self.api_keys.get(network).map(String::as_str)
    }
}
