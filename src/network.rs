use alloy::signers::local::PrivateKeySigner;
use eyre::{bail, eyre, Context};

/// Chain id of the BSC testnet.
pub const CHAIN_ID: u64 = 97;

/// Gas price for deployment transactions, in wei.
pub const GAS_PRICE: u128 = 10_000_000_000;

/// Resolved settings of the target network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL. Empty when none was configured.
    pub endpoint: String,
    /// Chain id the deployment transaction is bound to.
    pub chain_id: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Signing credentials of the deployer account, at most one.
    pub accounts: Vec<String>,
}

impl NetworkConfig {
    /// Resolves the BSC testnet configuration.
    ///
    /// A missing endpoint or signing credential is not an error at this
    /// stage; it surfaces once the network rejects the deployment.
    pub fn bsc_testnet(endpoint: Option<String>, accounts: Vec<String>) -> eyre::Result<Self> {
        let config = Self {
            endpoint: endpoint.unwrap_or_default(),
            chain_id: CHAIN_ID,
            gas_price: GAS_PRICE,
            accounts,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        if self.gas_price == 0 {
            bail!("gas price must be positive");
        }
        if self.accounts.len() > 1 {
            bail!(
                "expected at most one signing credential, got {}",
                self.accounts.len()
            );
        }
        Ok(())
    }

    /// The signing identity for the deployment, parsed from the first
    /// configured account.
    pub fn signer(&self) -> eyre::Result<PrivateKeySigner> {
        let key = self
            .accounts
            .first()
            .ok_or_else(|| eyre!("no signing credential configured; set PRIVATE_KEY"))?;
        key.parse().wrap_err("invalid signing credential")
    }
}
