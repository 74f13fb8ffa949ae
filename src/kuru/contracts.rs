// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Kuru router, KuruUtils and ERC20 bindings.

use alloy::sol;

// Kuru router: generic swap entry point over a route of markets
sol! {
    #[sol(rpc)]
    interface IKuruRouter {
        function anyToAnySwap(
            address[] calldata _marketAddresses,
            bool[] calldata _isBuy,
            bool[] calldata _nativeSend,
            address _debitToken,
            address _creditToken,
            uint256 _amount,
            uint256 _minAmountOut
        ) external payable returns (uint256);
    }
}

// KuruUtils: read-only price over a route, scaled by 1e18
sol! {
    #[sol(rpc)]
    interface IKuruUtils {
        function calculatePriceOverRoute(address[] calldata route, bool[] calldata isBuy)
            external view returns (uint256);
    }
}

// ERC20 for decimals and approval
sol! {
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
