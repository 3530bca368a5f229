use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Bytes;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::web3::contracts::core::error::{ContractError, ContractResult};
use crate::web3::contracts::diamond::selectors::{ContractInterface, SelectorSet};
use crate::web3::contracts::helpers::utils::coerce_args;

const BUILD_INFO_DIR: &str = "build-info";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    abi: Vec<serde_json::Value>,
    #[serde(default)]
    bytecode: Option<RawBytecode>,
}

// Hardhat writes the creation code as a string, Foundry nests it under `object`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl RawBytecode {
    fn as_hex(&self) -> &str {
        match self {
            RawBytecode::Hex(hex) => hex,
            RawBytecode::Object { object } => object,
        }
    }
}

/// A compiled contract: its ABI, its ordered interface and its creation code.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub abi: JsonAbi,
    interface: ContractInterface,
    bytecode: Option<Bytes>,
}

impl Artifact {
    pub fn load(path: impl AsRef<Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|source| ContractError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(path, &contents)
    }

    pub fn from_slice(path: impl AsRef<Path>, contents: &[u8]) -> ContractResult<Self> {
        let path = path.as_ref();
        let parse_err = |source| ContractError::ArtifactParse {
            path: path.to_path_buf(),
            source,
        };

        let raw: RawArtifact = serde_json::from_slice(contents).map_err(parse_err)?;
        let name = raw
            .contract_name
            .clone()
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_default();

        // JsonAbi groups functions by name, so the declaration order is read
        // from the raw array instead.
        let functions = raw
            .abi
            .iter()
            .filter(|item| item.get("type").and_then(|t| t.as_str()) == Some("function"))
            .map(|item| serde_json::from_value::<Function>(item.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(parse_err)?;
        let abi: JsonAbi =
            serde_json::from_value(serde_json::Value::Array(raw.abi)).map_err(parse_err)?;

        let bytecode = match raw.bytecode.as_ref().map(RawBytecode::as_hex) {
            Some(code) if !code.trim_start_matches("0x").is_empty() => Some(
                hex::decode(code.trim_start_matches("0x"))
                    .map_err(|source| ContractError::InvalidBytecode {
                        name: name.clone(),
                        source,
                    })?
                    .into(),
            ),
            _ => None,
        };

        Ok(Self {
            interface: ContractInterface::new(name.clone(), &functions),
            name,
            path: path.to_path_buf(),
            abi,
            bytecode,
        })
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    pub fn selector_set(&self) -> SelectorSet<'_> {
        SelectorSet::build(&self.interface)
    }

    pub fn bytecode(&self) -> ContractResult<&Bytes> {
        self.bytecode
            .as_ref()
            .ok_or_else(|| ContractError::MissingBytecode(self.name.clone()))
    }

    pub fn is_deployable(&self) -> bool {
        self.bytecode.is_some()
    }

    /// Creation code followed by the ABI-encoded constructor arguments.
    pub fn deploy_code(&self, args: &[String]) -> ContractResult<Bytes> {
        let mut code = self.bytecode()?.to_vec();
        match &self.abi.constructor {
            Some(constructor) => {
                let values = coerce_args(&constructor.inputs, args)?;
                code.extend(
                    alloy::dyn_abi::JsonAbiExt::abi_encode_input(constructor, &values)?,
                );
            }
            None if !args.is_empty() => {
                return Err(ContractError::Encoding(format!(
                    "{} has no constructor but {} arguments were given",
                    self.name,
                    args.len()
                )))
            }
            None => {}
        }
        Ok(code.into())
    }
}

/// Looks up compiled artifacts by contract name below a build directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load(&self, name: &str) -> ContractResult<Artifact> {
        let path = self.find(name)?;
        log::debug!("Loading artifact {name} from {}", path.display());
        Artifact::load(path)
    }

    pub fn find(&self, name: &str) -> ContractResult<PathBuf> {
        self.artifact_paths()
            .into_iter()
            .find(|path| path.file_stem().is_some_and(|stem| stem == name))
            .ok_or_else(|| ContractError::ArtifactNotFound {
                name: name.to_string(),
                dir: self.root.clone(),
            })
    }

    /// Maps every contract name to its artifact path relative to the root.
    /// When two files share a name, the first in path order wins.
    pub fn index(&self) -> BTreeMap<String, PathBuf> {
        let mut index = BTreeMap::new();
        for path in self.artifact_paths() {
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let relative = path
                .strip_prefix(&self.root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| path.clone());
            index.entry(stem).or_insert(relative);
        }
        index
    }

    /// Artifact files in byte order of their full path, so `a.json` sorts
    /// before anything under `a/`.
    fn artifact_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR)
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable artifact entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                name.ends_with(".json") && !name.ends_with(".dbg.json")
            })
            .collect();
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web3::contracts::helpers::utils::get_selector;
    use serde_json::json;
    use std::fs;

    const GREETER_CODE: &str = "0x6080604052";

    fn owner_abi() -> serde_json::Value {
        json!([
            { "type": "constructor", "inputs": [{ "name": "_owner", "type": "address" }], "stateMutability": "nonpayable" },
            { "type": "function", "name": "setOwner", "inputs": [{ "name": "owner", "type": "address" }], "outputs": [], "stateMutability": "nonpayable" },
            { "type": "event", "name": "OwnerSet", "inputs": [{ "name": "owner", "type": "address", "indexed": true }], "anonymous": false },
            { "type": "function", "name": "init", "inputs": [{ "name": "data", "type": "bytes" }], "outputs": [], "stateMutability": "nonpayable" },
            { "type": "function", "name": "getOwner", "inputs": [], "outputs": [{ "name": "", "type": "address" }], "stateMutability": "view" }
        ])
    }

    fn write(dir: &Path, rel: &str, value: serde_json::Value) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn loads_hardhat_layout_in_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "contracts/Owner.sol/Owner.json",
            json!({ "contractName": "Owner", "abi": owner_abi(), "bytecode": GREETER_CODE }),
        );

        let artifact = Artifact::load(&path).unwrap();
        assert_eq!(artifact.name, "Owner");
        let signatures: Vec<&str> = artifact
            .interface()
            .functions()
            .iter()
            .map(|f| f.signature.as_str())
            .collect();
        assert_eq!(signatures, ["setOwner(address)", "init(bytes)", "getOwner()"]);
        assert_eq!(
            artifact.selector_set().selectors(),
            &[get_selector("setOwner(address)"), get_selector("getOwner()")]
        );
        assert_eq!(artifact.bytecode().unwrap().as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn loads_foundry_layout_and_falls_back_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "Owner.sol/Owner.json",
            json!({ "abi": owner_abi(), "bytecode": { "object": GREETER_CODE } }),
        );

        let artifact = Artifact::load(&path).unwrap();
        assert_eq!(artifact.name, "Owner");
        assert!(artifact.is_deployable());
    }

    #[test]
    fn interface_artifact_has_no_bytecode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "IProxy.sol/IProxy.json",
            json!({ "abi": [], "bytecode": "0x" }),
        );

        let artifact = Artifact::load(&path).unwrap();
        assert!(matches!(
            artifact.bytecode(),
            Err(ContractError::MissingBytecode(name)) if name == "IProxy"
        ));
    }

    #[test]
    fn deploy_code_appends_constructor_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "Owner.json",
            json!({ "abi": owner_abi(), "bytecode": GREETER_CODE }),
        );
        let artifact = Artifact::load(&path).unwrap();

        let owner = "0x00000000000000000000000000000000000000aa".to_string();
        let code = artifact.deploy_code(&[owner]).unwrap();
        assert_eq!(code.len(), 5 + 32);
        assert_eq!(code[code.len() - 1], 0xaa);

        assert!(matches!(
            artifact.deploy_code(&[]),
            Err(ContractError::Encoding(_))
        ));
    }

    #[test]
    fn store_finds_by_name_and_skips_debug_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/Owner.sol/Owner.dbg.json", json!({ "buildInfo": "x" }));
        write(
            dir.path(),
            "a/Owner.sol/Owner.json",
            json!({ "abi": owner_abi(), "bytecode": GREETER_CODE }),
        );
        write(dir.path(), "build-info/Owner.json", json!({ "input": {} }));

        let store = ArtifactStore::new(dir.path());
        let artifact = store.load("Owner").unwrap();
        assert!(artifact.path.ends_with("a/Owner.sol/Owner.json"));
        assert!(matches!(
            store.load("Missing"),
            Err(ContractError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn index_keeps_first_path_per_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "IERC20.sol/IERC20.json", json!({ "abi": [] }));
        write(dir.path(), "IERC20.sol/IERC173.json", json!({ "abi": [] }));
        write(dir.path(), "IERC173.sol/IERC173.json", json!({ "abi": [] }));
        write(dir.path(), "IProxy.sol/IProxy.json", json!({ "abi": [] }));

        let index = ArtifactStore::new(dir.path()).index();
        assert_eq!(index.len(), 3);
        assert_eq!(index["IERC173"], PathBuf::from("IERC173.sol/IERC173.json"));
        assert_eq!(index["IERC20"], PathBuf::from("IERC20.sol/IERC20.json"));
        assert_eq!(index["IProxy"], PathBuf::from("IProxy.sol/IProxy.json"));
    }

    #[test]
    fn sibling_file_wins_over_directory_of_same_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Greeter/Greeter.json", json!({ "abi": [] }));
        write(dir.path(), "Greeter.json", json!({ "abi": [] }));

        let store = ArtifactStore::new(dir.path());
        assert_eq!(store.index()["Greeter"], PathBuf::from("Greeter.json"));
        assert_eq!(store.find("Greeter").unwrap(), dir.path().join("Greeter.json"));
    }
}
