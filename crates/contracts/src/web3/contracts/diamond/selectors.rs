use std::collections::HashSet;

use alloy::json_abi::Function;
use alloy::primitives::Selector;

use crate::web3::contracts::core::error::{ContractError, ContractResult};
use crate::web3::contracts::helpers::utils::get_selector;

/// Initializer signature that is never registered on a diamond.
pub const INITIALIZER_SIGNATURE: &str = "init(bytes)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub name: String,
    pub signature: String,
    pub selector: Selector,
}

impl From<&Function> for FunctionEntry {
    fn from(function: &Function) -> Self {
        Self {
            name: function.name.clone(),
            signature: function.signature(),
            selector: function.selector(),
        }
    }
}

/// Callable surface of one contract, in ABI declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterface {
    name: String,
    functions: Vec<FunctionEntry>,
}

impl ContractInterface {
    pub fn new<'f>(name: impl Into<String>, functions: impl IntoIterator<Item = &'f Function>) -> Self {
        Self {
            name: name.into(),
            functions: functions.into_iter().map(FunctionEntry::from).collect(),
        }
    }

    /// Builds an interface from human-readable signatures such as `setOwner(address)`.
    pub fn from_signatures<S: AsRef<str>>(
        name: impl Into<String>,
        signatures: &[S],
    ) -> ContractResult<Self> {
        let functions = signatures
            .iter()
            .map(|sig| {
                Function::parse(sig.as_ref()).map_err(|e| {
                    ContractError::Encoding(format!("invalid signature {}: {e}", sig.as_ref()))
                })
            })
            .collect::<ContractResult<Vec<_>>>()?;
        Ok(Self::new(name, &functions))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn functions(&self) -> &[FunctionEntry] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn entry(&self, selector: &Selector) -> Option<&FunctionEntry> {
        self.functions.iter().find(|f| f.selector == *selector)
    }

    pub fn selector_set(&self) -> SelectorSet<'_> {
        SelectorSet::build(self)
    }

    /// Resolves names to the selectors they designate in this interface.
    ///
    /// A name containing `(` is a full signature; a bare name matches every
    /// overload with that name. Names that match nothing are dropped.
    fn resolve<S: AsRef<str>>(&self, names: &[S]) -> HashSet<Selector> {
        let mut resolved = HashSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.contains('(') {
                match Function::parse(name) {
                    Ok(function) => {
                        let selector = function.selector();
                        if self.entry(&selector).is_some() {
                            resolved.insert(selector);
                        }
                    }
                    Err(e) => log::debug!("Ignoring unparseable signature {name}: {e}"),
                }
            } else {
                resolved.extend(
                    self.functions
                        .iter()
                        .filter(|f| f.name == name)
                        .map(|f| f.selector),
                );
            }
        }
        resolved
    }
}

/// Ordered selectors of one interface, with the initializer excluded.
///
/// Every derivation returns a fresh set bound to the same interface, so
/// `remove` and `get` can be chained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSet<'a> {
    interface: &'a ContractInterface,
    selectors: Vec<Selector>,
}

impl<'a> SelectorSet<'a> {
    pub fn build(interface: &'a ContractInterface) -> Self {
        let init = get_selector(INITIALIZER_SIGNATURE);
        let mut seen = HashSet::new();
        let selectors = interface
            .functions
            .iter()
            .map(|f| f.selector)
            .filter(|selector| *selector != init && seen.insert(*selector))
            .collect();
        Self {
            interface,
            selectors,
        }
    }

    /// Keeps every selector whose function is not named in `names`.
    pub fn remove<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let excluded = self.interface.resolve(names);
        self.filtered(|selector| !excluded.contains(selector))
    }

    /// Keeps only the selectors whose function is named in `names`.
    pub fn get<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let wanted = self.interface.resolve(names);
        self.filtered(|selector| wanted.contains(selector))
    }

    fn filtered(&self, keep: impl Fn(&Selector) -> bool) -> Self {
        Self {
            interface: self.interface,
            selectors: self.selectors.iter().copied().filter(|s| keep(s)).collect(),
        }
    }

    pub fn interface(&self) -> &'a ContractInterface {
        self.interface
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.selectors.contains(selector)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    /// Pairs each selector with the signature it was derived from.
    pub fn entries(&self) -> impl Iterator<Item = &'a FunctionEntry> + '_ {
        self.selectors
            .iter()
            .filter_map(|selector| self.interface.entry(selector))
    }

    pub fn to_vec(&self) -> Vec<Selector> {
        self.selectors.clone()
    }
}

impl<'s, 'a> IntoIterator for &'s SelectorSet<'a> {
    type Item = &'s Selector;
    type IntoIter = std::slice::Iter<'s, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner_interface() -> ContractInterface {
        ContractInterface::from_signatures(
            "OwnershipFacet",
            &["init(bytes)", "setOwner(address)", "getOwner()"],
        )
        .unwrap()
    }

    fn token_interface() -> ContractInterface {
        ContractInterface::from_signatures(
            "TokenFacet",
            &[
                "transfer(address,uint256)",
                "approve(address,uint256)",
                "balanceOf(address)",
                "mint(address,uint256)",
                "mint(address)",
                "totalSupply()",
            ],
        )
        .unwrap()
    }

    #[test]
    fn build_skips_initializer_and_keeps_order() {
        let interface = owner_interface();
        let set = SelectorSet::build(&interface);

        assert_eq!(
            set.selectors(),
            &[get_selector("setOwner(address)"), get_selector("getOwner()")]
        );
        assert!(!set.contains(&get_selector(INITIALIZER_SIGNATURE)));
    }

    #[test]
    fn build_without_initializer_keeps_every_function() {
        let interface = token_interface();
        let set = interface.selector_set();
        assert_eq!(set.len(), interface.len());
        let expected: Vec<Selector> = interface.functions().iter().map(|f| f.selector).collect();
        assert_eq!(set.to_vec(), expected);
    }

    #[test]
    fn build_on_empty_interface_is_empty() {
        let interface = ContractInterface::from_signatures::<&str>("Empty", &[]).unwrap();
        assert!(SelectorSet::build(&interface).is_empty());
    }

    #[test]
    fn only_exact_initializer_signature_is_excluded() {
        let interface =
            ContractInterface::from_signatures("Init", &["init()", "init(bytes)", "init(uint256)"])
                .unwrap();
        let set = interface.selector_set();
        assert_eq!(
            set.selectors(),
            &[get_selector("init()"), get_selector("init(uint256)")]
        );
    }

    #[test]
    fn remove_drops_named_function() {
        let interface = owner_interface();
        let set = interface.selector_set().remove(&["getOwner()"]);
        assert_eq!(set.selectors(), &[get_selector("setOwner(address)")]);
    }

    #[test]
    fn repeated_signatures_yield_one_selector() {
        let interface = ContractInterface::from_signatures(
            "Repeated",
            &["foo()", "foo()", "init(bytes)", "bar(uint256)"],
        )
        .unwrap();
        let set = interface.selector_set();

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.selectors(),
            &[get_selector("foo()"), get_selector("bar(uint256)")]
        );

        let kept = set.get(&["foo()"]);
        let dropped = set.remove(&["foo()"]);
        assert_eq!(kept.selectors(), &[get_selector("foo()")]);
        assert_eq!(dropped.selectors(), &[get_selector("bar(uint256)")]);
        assert_eq!(kept.len() + dropped.len(), set.len());
    }

    #[test]
    fn get_and_remove_partition_the_set() {
        let interface = token_interface();
        let set = interface.selector_set();
        let names = ["approve(address,uint256)", "totalSupply()", "burn(uint256)"];

        let kept = set.get(&names);
        let dropped = set.remove(&names);

        assert_eq!(kept.len() + dropped.len(), set.len());
        assert!(kept.iter().all(|s| !dropped.contains(s)));
        assert!(set.iter().all(|s| kept.contains(s) || dropped.contains(s)));
        assert_eq!(
            kept.selectors(),
            &[
                get_selector("approve(address,uint256)"),
                get_selector("totalSupply()")
            ]
        );
    }

    #[test]
    fn remove_is_idempotent_and_order_preserving() {
        let interface = token_interface();
        let set = interface.selector_set();
        let names = ["approve(address,uint256)"];

        let once = set.remove(&names);
        let twice = once.remove(&names);
        assert_eq!(once, twice);
        assert_eq!(
            once.selectors(),
            &[
                get_selector("transfer(address,uint256)"),
                get_selector("balanceOf(address)"),
                get_selector("mint(address,uint256)"),
                get_selector("mint(address)"),
                get_selector("totalSupply()"),
            ]
        );
    }

    #[test]
    fn unknown_names_are_ignored() {
        let interface = owner_interface();
        let set = interface.selector_set();
        assert_eq!(set.remove(&["doesNotExist()", "nope", "((("]), set);
        assert!(set.get(&["doesNotExist()"]).is_empty());
    }

    #[test]
    fn bare_name_matches_all_overloads() {
        let interface = token_interface();
        let minted = interface.selector_set().get(&["mint"]);
        assert_eq!(
            minted.selectors(),
            &[get_selector("mint(address,uint256)"), get_selector("mint(address)")]
        );
    }

    #[test]
    fn signatures_are_normalised_before_matching() {
        let interface = token_interface();
        let set = interface.selector_set().get(&["balanceOf(address owner)"]);
        assert_eq!(set.selectors(), &[get_selector("balanceOf(address)")]);
    }

    #[test]
    fn derived_sets_chain_on_the_same_interface() {
        let interface = token_interface();
        let set = interface
            .selector_set()
            .remove(&["mint"])
            .get(&["transfer(address,uint256)", "totalSupply()"]);

        assert!(std::ptr::eq(set.interface(), &interface));
        let signatures: Vec<&str> = set.entries().map(|e| e.signature.as_str()).collect();
        assert_eq!(signatures, ["transfer(address,uint256)", "totalSupply()"]);
    }
}
