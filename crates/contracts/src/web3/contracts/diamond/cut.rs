use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, Bytes, Selector};
use alloy::sol_types::SolCall;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::web3::contracts::diamond::abi::IDiamondCut;
use crate::web3::contracts::diamond::selectors::SelectorSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetCutAction {
    Add = 0,
    Replace = 1,
    Remove = 2,
}

impl FacetCutAction {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for FacetCutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetCutAction::Add => write!(f, "add"),
            FacetCutAction::Replace => write!(f, "replace"),
            FacetCutAction::Remove => write!(f, "remove"),
        }
    }
}

impl FromStr for FacetCutAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(FacetCutAction::Add),
            "replace" => Ok(FacetCutAction::Replace),
            "remove" => Ok(FacetCutAction::Remove),
            other => Err(format!("unknown facet cut action: {other}")),
        }
    }
}

/// One facet registration inside a diamond cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutEntry {
    pub facet: String,
    pub facet_address: Address,
    pub action: FacetCutAction,
    pub selectors: Vec<Selector>,
}

impl From<&CutEntry> for IDiamondCut::FacetCut {
    fn from(entry: &CutEntry) -> Self {
        Self {
            facetAddress: entry.facet_address,
            action: entry.action.code(),
            functionSelectors: entry.selectors.clone(),
        }
    }
}

/// Ordered batch of facet changes applied by a single `diamondCut` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiamondCut {
    entries: Vec<CutEntry>,
    init: Address,
    init_calldata: Bytes,
}

impl DiamondCut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(self, facet_address: Address, selectors: &SelectorSet<'_>) -> Self {
        self.entry(facet_address, FacetCutAction::Add, selectors)
    }

    pub fn replace(self, facet_address: Address, selectors: &SelectorSet<'_>) -> Self {
        self.entry(facet_address, FacetCutAction::Replace, selectors)
    }

    /// Removal entries always target the zero address.
    pub fn remove(self, selectors: &SelectorSet<'_>) -> Self {
        self.entry(Address::ZERO, FacetCutAction::Remove, selectors)
    }

    pub fn entry(
        mut self,
        facet_address: Address,
        action: FacetCutAction,
        selectors: &SelectorSet<'_>,
    ) -> Self {
        let facet = selectors.interface().name().to_string();
        if selectors.is_empty() {
            warn!("Skipping {action} cut for {facet}: no selectors left");
            return self;
        }
        let facet_address = match action {
            FacetCutAction::Remove => Address::ZERO,
            FacetCutAction::Add | FacetCutAction::Replace => facet_address,
        };
        self.entries.push(CutEntry {
            facet,
            facet_address,
            action,
            selectors: selectors.to_vec(),
        });
        self
    }

    pub fn with_init(mut self, init: Address, calldata: Bytes) -> Self {
        self.init = init;
        self.init_calldata = calldata;
        self
    }

    pub fn entries(&self) -> &[CutEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn init(&self) -> Address {
        self.init
    }

    pub fn init_calldata(&self) -> &Bytes {
        &self.init_calldata
    }

    pub fn facet_cuts(&self) -> Vec<IDiamondCut::FacetCut> {
        self.entries.iter().map(Into::into).collect()
    }

    /// ABI-encoded `diamondCut(cut, init, calldata)` call.
    pub fn calldata(&self) -> Bytes {
        IDiamondCut::diamondCutCall {
            _diamondCut: self.facet_cuts(),
            _init: self.init,
            _calldata: self.init_calldata.clone(),
        }
        .abi_encode()
        .into()
    }
}
