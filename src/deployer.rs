use std::time::Duration;

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    rpc::types::eth::TransactionRequest,
    sol,
    sol_types::SolConstructor,
};
use eyre::{bail, eyre, Context, ContextCompat};
use owo_colors::OwoColorize;
use tokio::{runtime::Builder, time};

use crate::{
    artifact::Artifact,
    config::Deploy,
    formatting::{format_gas, format_gas_price},
    verification::{self, VerificationConfig},
};

/// Name of the deployed contract.
pub const CONTRACT_NAME: &str = "Only42";

/// Number of owner signatures required to authorize actions on the deployed
/// contract.
pub const SIGNATURE_THRESHOLD: u64 = 2;

sol! {
    contract Only42 {
        constructor(address owner, address[] owners, uint256 required);
    }
}

/// Constructor arguments of the multi-owner contract.
///
/// The primary owner appears both standalone and as the first entry of the
/// owner list; the contract expects exactly this shape.
#[derive(Debug, PartialEq)]
pub struct DeploymentRequest {
    pub owner: Address,
    pub owners: Vec<Address>,
    pub required: u64,
}

impl DeploymentRequest {
    pub fn new(owner: Address, second_owner: Address) -> eyre::Result<Self> {
        let request = Self {
            owner,
            owners: vec![owner, second_owner],
            required: SIGNATURE_THRESHOLD,
        };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> eyre::Result<()> {
        if self.required == 0 {
            bail!("signature threshold must be positive");
        }
        if self.required as usize > self.owners.len() {
            bail!(
                "signature threshold {} exceeds the {} configured owners",
                self.required,
                self.owners.len()
            );
        }
        Ok(())
    }

    fn constructor_args(&self) -> Vec<u8> {
        Only42::constructorCall {
            owner: self.owner,
            owners: self.owners.clone(),
            required: U256::from(self.required),
        }
        .abi_encode()
    }
}

pub fn deploy(config: &Deploy) -> eyre::Result<()> {
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(deploy_impl(config))
}

async fn deploy_impl(config: &Deploy) -> eyre::Result<()> {
    let network = config.network()?;
    let secrets = config.secret_provider()?;
    let verification = VerificationConfig::resolve(secrets.as_ref());

    let signer = network.signer()?;
    let sender = signer.address();

    let owner = parse_address(config.owner.as_deref(), "OWNER_ADDRESS")?;
    let owner2 = parse_address(config.owner2.as_deref(), "OWNER_ADDRESS2")?;
    let request = DeploymentRequest::new(owner, owner2)?;

    println!("deployer: {}", sender.bright_magenta());
    println!("owner: {}", request.owner.bright_magenta());

    let rpc_url = network.endpoint.parse().wrap_err("invalid RPC endpoint")?;
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(rpc_url);

    let balance = provider.get_balance(sender).await?;
    if balance == U256::ZERO {
        bail!("no funds in account {} to pay for gas", sender.red());
    }

    let artifact = Artifact::load(&config.artifact, CONTRACT_NAME)?;
    let init_code = [artifact.bytecode, request.constructor_args()].concat();

    println!("gas price: {}", format_gas_price(network.gas_price));
    println!(
        "deploying `{}` to RPC: {}",
        artifact.contract_name,
        network.endpoint.bright_magenta()
    );

    let tx = TransactionRequest::default()
        .into_create()
        .with_input(init_code)
        .with_chain_id(network.chain_id)
        .with_gas_price(network.gas_price);

    let pending = provider.send_transaction(tx).await?;
    let receipt = time::timeout(Duration::from_secs(config.timeout), pending.get_receipt())
        .await
        .map_err(|_| {
            eyre!(
                "network did not confirm the deployment within {}s",
                config.timeout
            )
        })??;

    let address = receipt
        .contract_address()
        .wrap_err("failed to read contract address from tx receipt")?;
    println!(
        "`{}` deployed to: {}",
        artifact.contract_name,
        address.bright_purple()
    );
    println!(
        "deployment tx hash: {}",
        receipt.transaction_hash.bright_magenta()
    );
    println!("deployed with {}", format_gas(U256::from(receipt.gas_used)));

    match verification.api_key(verification::BSC_TESTNET) {
        Some(_) => println!(
            "verification key for {} is configured",
            verification::BSC_TESTNET.bright_green()
        ),
        None => println!(
            "no verification key for {}; contract verification will be skipped",
            verification::BSC_TESTNET.yellow()
        ),
    }

    Ok(())
}

fn parse_address(value: Option<&str>, var: &str) -> eyre::Result<Address> {
    let value = value.wrap_err_with(|| format!("{var} is not set"))?;
    value
        .parse()
        .wrap_err_with(|| format!("invalid address in {var}"))
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use alloy::primitives::{address, Address};
    use tempfile::NamedTempFile;

    use super::{deploy_impl, parse_address, DeploymentRequest, SIGNATURE_THRESHOLD};
    use crate::config::{Deploy, PrivateKey, SecretSource};

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const OWNER: Address = address!("1111111111111111111111111111111111111111");
    const OWNER2: Address = address!("2222222222222222222222222222222222222222");

    fn deploy_config(key: Option<&str>, endpoint: &str) -> Deploy {
        Deploy {
            endpoint: Some(endpoint.to_owned()),
            auth: PrivateKey {
                private_key: key.map(str::to_owned),
                private_key_path: None,
            },
            owner: Some(OWNER.to_string()),
            owner2: Some(OWNER2.to_string()),
            artifact: PathBuf::from("contract/Only42.json"),
            secrets: SecretSource::Env,
            vars_file: PathBuf::from("vars.json"),
            timeout: 1,
        }
    }

    #[test]
    fn duplicates_the_primary_owner_in_the_owner_list() {
        let request = DeploymentRequest::new(OWNER, OWNER2).unwrap();
        assert_eq!(OWNER, request.owner);
        assert_eq!(vec![OWNER, OWNER2], request.owners);
        assert_eq!(SIGNATURE_THRESHOLD, request.required);
    }

    #[test]
    fn encodes_constructor_args_in_order() {
        let request = DeploymentRequest::new(OWNER, OWNER2).unwrap();
        let expected = concat!(
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000000000000000000000000000000000000000000060",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
        );
        assert_eq!(expected, hex::encode(request.constructor_args()));
    }

    #[test]
    fn rejects_a_threshold_exceeding_the_owner_count() {
        let request = DeploymentRequest {
            owner: OWNER,
            owners: vec![OWNER],
            required: 2,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn redeployments_land_at_distinct_addresses() {
        // Created addresses depend on the deployer's nonce, so running the
        // deployment twice yields two distinct contract instances.
        assert_ne!(OWNER.create(0), OWNER.create(1));
    }

    #[test]
    fn missing_owner_is_an_error() {
        assert!(parse_address(None, "OWNER_ADDRESS").is_err());
        assert!(parse_address(Some("not-an-address"), "OWNER_ADDRESS").is_err());
    }

    #[tokio::test]
    async fn fails_without_a_signing_credential() {
        let config = deploy_config(None, "http://127.0.0.1:9");
        let error = deploy_impl(&config).await.unwrap_err();
        assert!(error.to_string().contains("no signing credential"));
    }

    #[tokio::test]
    async fn fails_on_an_unreachable_endpoint() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"contractName":"Only42","bytecode":"0x6080604052"}}"#
        )
        .unwrap();

        let mut config = deploy_config(Some(KEY), "http://127.0.0.1:9");
        config.artifact = file.path().to_path_buf();
        assert!(deploy_impl(&config).await.is_err());
    }
}
