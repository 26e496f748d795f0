use std::{fs, path::Path};

use eyre::{bail, Context};
use serde::Deserialize;

/// Compiled contract artifact, as emitted by the Solidity toolchain.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactFile {
    contract_name: String,
    bytecode: String,
}

/// Creation bytecode of a compiled contract.
#[derive(Debug)]
pub struct Artifact {
    pub contract_name: String,
    pub bytecode: Vec<u8>,
}

impl Artifact {
    /// Reads the compiled artifact for `name` at `path`.
    pub fn load(path: impl AsRef<Path>, name: &str) -> eyre::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).wrap_err_with(|| {
            eyre::eyre!("failed to read contract artifact {}", path.to_string_lossy())
        })?;
        let file: ArtifactFile =
            serde_json::from_str(&raw).wrap_err("malformed contract artifact")?;

        if file.contract_name != name {
            bail!("artifact is for `{}`, expected `{name}`", file.contract_name);
        }

        let bytecode = hex::decode(file.bytecode.trim_start_matches("0x"))
            .wrap_err("artifact bytecode is not valid hex")?;
        if bytecode.is_empty() {
            bail!("artifact for `{name}` has no bytecode; was the contract compiled?");
        }

        Ok(Self {
            contract_name: file.contract_name,
            bytecode,
        })
    }
}
