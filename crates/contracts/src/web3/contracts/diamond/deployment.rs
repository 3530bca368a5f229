use alloy::primitives::{Address, Bytes, TxHash};
use log::info;
use serde::{Deserialize, Serialize};

use crate::web3::contracts::core::artifact::Artifact;
use crate::web3::contracts::core::deployer::{DeployedContract, Deployer};
use crate::web3::contracts::core::error::{ContractError, ContractResult};
use crate::web3::contracts::diamond::cut::{CutEntry, DiamondCut, FacetCutAction};
use crate::web3::contracts::diamond::selectors::SelectorSet;
use crate::web3::contracts::helpers::utils::encode_function_call;
use crate::web3::contracts::implementations::diamond_contract::DiamondContract;

const DEPLOYER_PLACEHOLDER: &str = "{deployer}";
const FACET_PLACEHOLDER_PREFIX: &str = "{facet:";

fn default_true() -> bool {
    true
}

fn default_init_signature() -> String {
    "init()".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Facets wired by the proxy constructor are deployed but not cut in.
    #[serde(default = "default_true")]
    pub register: bool,
    #[serde(default)]
    pub only: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl FacetSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            register: true,
            only: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Selectors of `artifact` narrowed by `only`, then by `exclude`.
    pub fn selectors<'a>(&self, artifact: &'a Artifact) -> SelectorSet<'a> {
        let set = artifact.selector_set();
        let set = if self.only.is_empty() {
            set
        } else {
            set.get(&self.only)
        };
        set.remove(&self.exclude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializerSpec {
    pub contract: String,
    #[serde(default = "default_init_signature")]
    pub signature: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiamondLayout {
    pub proxy: String,
    #[serde(default)]
    pub proxy_args: Vec<String>,
    #[serde(default)]
    pub facets: Vec<FacetSpec>,
    #[serde(default)]
    pub init: Option<InitializerSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiamondDeployment {
    pub proxy: DeployedContract,
    pub facets: Vec<DeployedContract>,
    pub initializer: Option<DeployedContract>,
    pub cut: Vec<CutEntry>,
    pub cut_tx: TxHash,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacetUpgrade {
    pub diamond: Address,
    pub facet: Option<DeployedContract>,
    pub cut: Vec<CutEntry>,
    pub cut_tx: TxHash,
}

/// Substitutes `{deployer}` and `{facet:<Name>}` in constructor or init arguments.
pub fn resolve_placeholders(
    args: &[String],
    deployer: Address,
    facets: &[DeployedContract],
) -> ContractResult<Vec<String>> {
    args.iter()
        .map(|arg| {
            if arg == DEPLOYER_PLACEHOLDER {
                return Ok(deployer.to_string());
            }
            match arg
                .strip_prefix(FACET_PLACEHOLDER_PREFIX)
                .and_then(|rest| rest.strip_suffix('}'))
            {
                Some(name) => facets
                    .iter()
                    .find(|facet| facet.name == name)
                    .map(|facet| facet.address.to_string())
                    .ok_or_else(|| ContractError::UnknownFacet(name.to_string())),
                None => Ok(arg.clone()),
            }
        })
        .collect()
}

/// Builds an `Add` cut for every registered facet, in layout order.
pub fn build_cut(facets: &[(&FacetSpec, &Artifact, Address)]) -> DiamondCut {
    facets
        .iter()
        .filter(|(spec, _, _)| spec.register)
        .fold(DiamondCut::new(), |cut, (spec, artifact, address)| {
            cut.add(*address, &spec.selectors(artifact))
        })
}

/// Deploys every facet, then the proxy, and wires the facets in with one `diamondCut`.
pub async fn deploy_diamond(deployer: &Deployer, layout: &DiamondLayout) -> ContractResult<DiamondDeployment> {
    let account = deployer.account();

    let mut artifacts = Vec::with_capacity(layout.facets.len());
    let mut deployed_facets = Vec::with_capacity(layout.facets.len());
    for spec in &layout.facets {
        let args = resolve_placeholders(&spec.args, account, &deployed_facets)?;
        let (artifact, deployed) = deployer.deploy_named(&spec.name, &args).await?;
        info!(
            "{} exposes {} selectors",
            artifact.name,
            spec.selectors(&artifact).len()
        );
        artifacts.push(artifact);
        deployed_facets.push(deployed);
    }

    let proxy_args = resolve_placeholders(&layout.proxy_args, account, &deployed_facets)?;
    let (_, proxy) = deployer.deploy_named(&layout.proxy, &proxy_args).await?;

    let (initializer, init_calldata) = match &layout.init {
        Some(init) => {
            let args = resolve_placeholders(&init.args, account, &deployed_facets)?;
            let calldata = encode_function_call(&init.signature, &args)?;
            let (_, deployed) = deployer.deploy_named(&init.contract, &[]).await?;
            (Some(deployed), calldata)
        }
        None => (None, Bytes::new()),
    };

    let registered: Vec<_> = layout
        .facets
        .iter()
        .zip(&artifacts)
        .zip(&deployed_facets)
        .map(|((spec, artifact), deployed)| (spec, artifact, deployed.address))
        .collect();
    let cut = build_cut(&registered).with_init(
        initializer.as_ref().map(|i| i.address).unwrap_or(Address::ZERO),
        init_calldata,
    );

    let diamond = DiamondContract::new(proxy.address, deployer.provider().clone());
    let receipt = diamond.diamond_cut(&cut).await?;
    info!("Diamond {} cut in {}", proxy.address, receipt.transaction_hash);

    Ok(DiamondDeployment {
        proxy,
        facets: deployed_facets,
        initializer,
        cut: cut.entries().to_vec(),
        cut_tx: receipt.transaction_hash,
    })
}

/// Single-entry cut for `upgrade_facet`; fails when the filters leave nothing.
pub fn upgrade_cut(
    spec: &FacetSpec,
    artifact: &Artifact,
    facet_address: Address,
    action: FacetCutAction,
) -> ContractResult<DiamondCut> {
    let cut = DiamondCut::new().entry(facet_address, action, &spec.selectors(artifact));
    if cut.is_empty() {
        return Err(ContractError::EmptyCut(format!(
            "no selectors of {} left to {action}",
            spec.name
        )));
    }
    Ok(cut)
}

/// Adds, replaces or removes one facet's selectors on an existing diamond.
///
/// Add and Replace deploy a fresh copy of the facet; Remove only needs its ABI.
pub async fn upgrade_facet(
    deployer: &Deployer,
    diamond: Address,
    spec: &FacetSpec,
    action: FacetCutAction,
) -> ContractResult<FacetUpgrade> {
    let artifact = deployer.load_artifact(&spec.name)?;
    let facet = match action {
        FacetCutAction::Remove => None,
        FacetCutAction::Add | FacetCutAction::Replace => {
            let args = resolve_placeholders(&spec.args, deployer.account(), &[])?;
            Some(deployer.deploy(&artifact, &args).await?)
        }
    };

    let facet_address = facet.as_ref().map(|f| f.address).unwrap_or(Address::ZERO);
    let cut = upgrade_cut(spec, &artifact, facet_address, action)?;

    let receipt = DiamondContract::new(diamond, deployer.provider().clone())
        .diamond_cut(&cut)
        .await?;

    Ok(FacetUpgrade {
        diamond,
        facet,
        cut: cut.entries().to_vec(),
        cut_tx: receipt.transaction_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web3::contracts::helpers::utils::get_selector;
    use alloy::primitives::address;
    use serde_json::json;

    const CUT_FACET: Address = address!("00000000000000000000000000000000000000a1");
    const OWNERSHIP_FACET: Address = address!("00000000000000000000000000000000000000a2");

    fn artifact(name: &str, functions: &[(&str, &str)]) -> Artifact {
        let abi: Vec<_> = functions
            .iter()
            .map(|(fn_name, input)| {
                let inputs: Vec<_> = if input.is_empty() {
                    vec![]
                } else {
                    vec![json!({ "name": "", "type": input })]
                };
                json!({
                    "type": "function",
                    "name": fn_name,
                    "inputs": inputs,
                    "outputs": [],
                    "stateMutability": "nonpayable"
                })
            })
            .collect();
        let raw = json!({ "contractName": name, "abi": abi, "bytecode": "0x00" });
        Artifact::from_slice(format!("{name}.json"), raw.to_string().as_bytes()).unwrap()
    }

    fn deployed(name: &str, address: Address) -> DeployedContract {
        DeployedContract {
            name: name.to_string(),
            address,
            tx_hash: TxHash::ZERO,
        }
    }

    #[test]
    fn placeholders_resolve_to_deployed_addresses() {
        let account = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let facets = [deployed("DiamondCutFacet", CUT_FACET)];
        let args = vec![
            "{deployer}".to_string(),
            "{facet:DiamondCutFacet}".to_string(),
            "42".to_string(),
        ];

        let resolved = resolve_placeholders(&args, account, &facets).unwrap();
        assert_eq!(
            resolved,
            vec![account.to_string(), CUT_FACET.to_string(), "42".to_string()]
        );

        let missing = resolve_placeholders(&["{facet:Nope}".to_string()], account, &facets);
        assert!(matches!(missing, Err(ContractError::UnknownFacet(name)) if name == "Nope"));
    }

    #[test]
    fn cut_covers_registered_facets_with_filters() {
        let cut_artifact = artifact(
            "DiamondCutFacet",
            &[("diamondCut", "bytes"), ("init", "bytes")],
        );
        let ownership_artifact = artifact(
            "OwnershipFacet",
            &[
                ("init", "bytes"),
                ("owner", ""),
                ("transferOwnership", "address"),
                ("supportsInterface", "bytes4"),
            ],
        );

        let mut cut_spec = FacetSpec::new("DiamondCutFacet");
        cut_spec.register = false;
        let mut ownership_spec = FacetSpec::new("OwnershipFacet");
        ownership_spec.exclude = vec!["supportsInterface(bytes4)".to_string()];

        let cut = build_cut(&[
            (&cut_spec, &cut_artifact, CUT_FACET),
            (&ownership_spec, &ownership_artifact, OWNERSHIP_FACET),
        ]);

        assert_eq!(cut.entries().len(), 1);
        let entry = &cut.entries()[0];
        assert_eq!(entry.facet_address, OWNERSHIP_FACET);
        assert_eq!(entry.action, FacetCutAction::Add);
        assert_eq!(
            entry.selectors,
            vec![get_selector("owner()"), get_selector("transferOwnership(address)")]
        );
    }

    #[test]
    fn only_filter_applies_before_exclude() {
        let ownership_artifact = artifact(
            "OwnershipFacet",
            &[("owner", ""), ("transferOwnership", "address"), ("renounce", "")],
        );
        let mut spec = FacetSpec::new("OwnershipFacet");
        spec.only = vec!["owner".to_string(), "transferOwnership".to_string()];
        spec.exclude = vec!["owner()".to_string()];

        assert_eq!(
            spec.selectors(&ownership_artifact).selectors(),
            &[get_selector("transferOwnership(address)")]
        );
    }

    #[test]
    fn upgrade_cut_rejects_fully_filtered_facet() {
        let greeter = artifact("GreeterFacet", &[("greet", ""), ("setGreeting", "string")]);
        let mut spec = FacetSpec::new("GreeterFacet");
        spec.exclude = vec!["greet".to_string(), "setGreeting".to_string()];

        let err = upgrade_cut(&spec, &greeter, OWNERSHIP_FACET, FacetCutAction::Add).unwrap_err();
        assert!(matches!(&err, ContractError::EmptyCut(msg) if msg.contains("GreeterFacet")));
        assert_eq!(err.to_string(), "Nothing to cut: no selectors of GreeterFacet left to add");

        spec.exclude = vec!["greet".to_string()];
        let cut = upgrade_cut(&spec, &greeter, Address::ZERO, FacetCutAction::Remove).unwrap();
        assert_eq!(cut.entries().len(), 1);
        assert_eq!(cut.entries()[0].action, FacetCutAction::Remove);
        assert_eq!(cut.entries()[0].selectors, vec![get_selector("setGreeting(string)")]);
    }

    #[test]
    fn layout_parses_with_defaults() {
        let layout: DiamondLayout = serde_json::from_value(json!({
            "proxy": "Diamond",
            "proxy_args": ["{deployer}", "{facet:DiamondCutFacet}"],
            "facets": [
                { "name": "DiamondCutFacet", "register": false },
                { "name": "DiamondLoupeFacet" }
            ],
            "init": { "contract": "DiamondInit" }
        }))
        .unwrap();

        assert!(layout.facets[1].register);
        assert!(layout.facets[1].only.is_empty());
        let init = layout.init.unwrap();
        assert_eq!(init.signature, "init()");
        assert!(init.args.is_empty());
    }
}
