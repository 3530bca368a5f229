use alloy::sol;

// EIP-2535 entry points. `action` is the FacetCutAction enum, which the ABI
// encodes as uint8.
sol! {
    #[allow(missing_docs)]
    interface IDiamondCut {
        struct FacetCut {
            address facetAddress;
            uint8 action;
            bytes4[] functionSelectors;
        }

        function diamondCut(FacetCut[] calldata _diamondCut, address _init, bytes calldata _calldata) external;
    }

    #[allow(missing_docs)]
    interface IDiamondLoupe {
        struct Facet {
            address facetAddress;
            bytes4[] functionSelectors;
        }

        function facets() external view returns (Facet[] memory facets_);
        function facetAddress(bytes4 _functionSelector) external view returns (address facetAddress_);
    }
}

/// ABI type of the `facets()` return value.
pub const FACETS_RETURN_TYPE: &str = "(address,bytes4[])[]";
