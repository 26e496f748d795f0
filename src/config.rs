use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    network::NetworkConfig,
    secrets::{EnvSecrets, SecretProvider, VarsStore},
};

/// Main entrypoint to `easel`.
pub fn run() -> eyre::Result<()> {
    let config = Config::parse();
    config.command.run()
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Config {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(name = "deploy")]
    Deploy(Deploy),
}

impl Commands {
    pub fn run(&self) -> eyre::Result<()> {
        match self {
            Commands::Deploy(command) => command.run(),
        }
    }
}

/// Deploy the TokenizeArt multi-owner contract to the BSC testnet.
#[derive(Parser, Debug)]
pub struct Deploy {
    /// JSON-RPC endpoint of the target network.
    #[arg(short, long, env = "RPC_URL")]
    pub endpoint: Option<String>,

    #[command(flatten)]
    pub auth: PrivateKey,

    /// Primary owner of the deployed contract.
    #[arg(long, env = "OWNER_ADDRESS")]
    pub owner: Option<String>,

    /// Secondary owner of the deployed contract.
    #[arg(long, env = "OWNER_ADDRESS2")]
    pub owner2: Option<String>,

    /// Path to the contract's compiled artifact.
    #[arg(long, default_value = "contract/Only42.json")]
    pub artifact: PathBuf,

    /// Where the verification API key is read from.
    #[arg(long, value_enum, default_value = "env")]
    pub secrets: SecretSource,

    /// Path to the secret variables store, for `--secrets store`.
    #[arg(long, default_value = "vars.json")]
    pub vars_file: PathBuf,

    /// Seconds to wait for the network to confirm the deployment.
    #[arg(long, env = "ETH_TIMEOUT", default_value_t = 300)]
    pub timeout: u64,
}

impl Deploy {
    pub fn run(&self) -> eyre::Result<()> {
        crate::deployer::deploy(self)
    }

    /// Resolved settings of the target network.
    pub fn network(&self) -> eyre::Result<NetworkConfig> {
        NetworkConfig::bsc_testnet(self.endpoint.clone(), self.auth.accounts()?)
    }

    /// The configured source of verification secrets.
    pub fn secret_provider(&self) -> eyre::Result<Box<dyn SecretProvider>> {
        match self.secrets {
            SecretSource::Env => Ok(Box::new(EnvSecrets)),
            SecretSource::Store => Ok(Box::new(VarsStore::load(&self.vars_file)?)),
        }
    }
}

/// Signing credential of the deployer account.
#[derive(Parser, Debug, Default)]
pub struct PrivateKey {
    /// The deployer account's private key.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Path to a file holding the deployer account's private key.
    #[arg(long, conflicts_with = "private_key")]
    pub private_key_path: Option<PathBuf>,
}

/// Backend used to look up the verification API key.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum SecretSource {
    /// Process environment variables.
    Env,
    /// A JSON secret variables store on disk.
    Store,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Commands, Config, SecretSource};

    #[test]
    fn parses_deploy_command() {
        let config = Config::try_parse_from([
            "easel",
            "deploy",
            "--endpoint",
            "http://localhost:8545",
        ])
        .unwrap();
        let Commands::Deploy(deploy) = &config.command;
        assert_eq!(Some("http://localhost:8545"), deploy.endpoint.as_deref());
        assert_eq!(SecretSource::Env, deploy.secrets);
    }

    #[test]
    fn selects_the_secrets_store() {
        let config = Config::try_parse_from([
            "easel",
            "deploy",
            "--secrets",
            "store",
            "--vars-file",
            "secrets/vars.json",
        ])
        .unwrap();
        let Commands::Deploy(deploy) = &config.command;
        assert_eq!(SecretSource::Store, deploy.secrets);
        assert_eq!("secrets/vars.json", deploy.vars_file.to_string_lossy());
    }

    #[test]
    fn rejects_conflicting_credential_sources() {
        let result = Config::try_parse_from([
            "easel",
            "deploy",
            "--private-key",
            "0xabc",
            "--private-key-path",
            "key.txt",
        ]);
        assert!(result.is_err());
    }
}
