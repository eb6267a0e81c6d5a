//! ABI bindings for the contracts the relay talks to.

use alloy::primitives::{address, Address};
use alloy::sol;

/// Currency sentinel meaning "pay in the chain's native asset".
pub const NATIVE_CURRENCY: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

sol! {
    /// Thirdweb-style ERC-1155 drop.
    interface IDropERC1155 {
        struct AllowlistProof {
            bytes32[] proof;
            uint256 quantityLimitPerWallet;
            uint256 pricePerToken;
            address currency;
        }

        function claim(
            address receiver,
            uint256 tokenId,
            uint256 quantity,
            address currency,
            uint256 pricePerToken,
            AllowlistProof allowlistProof,
            bytes data
        ) external payable;
    }

    /// Thirdweb-style ERC-721 drop.
    interface IDropERC721 {
        struct AllowlistProof {
            bytes32[] proof;
            uint256 quantityLimitPerWallet;
            uint256 pricePerToken;
            address currency;
        }

        function claim(
            address receiver,
            uint256 quantity,
            address currency,
            uint256 pricePerToken,
            AllowlistProof allowlistProof,
            bytes data
        ) external payable;
    }

    /// On-chain random number picker.
    interface IRandomPicker {
        event NumberPicked(uint256 pickedNumber, uint256 totalItems, uint256 timestamp);

        function pickRandomNumber() external returns (uint256);
        function setTotalItems(uint256 newTotal) external;
        function getLastPicked() external view returns (uint256);
        function getTotalPicks() external view returns (uint256);
        function totalItems() external view returns (uint256);
        function lastPickedNumber() external view returns (uint256);
        function pickCount() external view returns (uint256);
    }
}
