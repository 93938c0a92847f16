//! Solidity interfaces of the deployed contracts

use alloy::sol;

sol! {
/// Owned, mintable & burnable ERC20 token
#[sol(rpc)]
interface IERC20Test {
    function name() external view returns (string);

    function symbol() external view returns (string);

    function decimals() external view returns (uint8);

    function totalSupply() external view returns (uint256);

    function balanceOf(address account) external view returns (uint256);

    function allowance(address owner, address spender) external view returns (uint256);

    function owner() external view returns (address);

    function transfer(address to, uint256 value) external returns (bool);

    function approve(address spender, uint256 value) external returns (bool);

    function transferFrom(address from, address to, uint256 value) external returns (bool);

    function mint(address to, uint256 amount) external;

    function burn(uint256 amount) external;

    function transferOwnership(address newOwner) external;
}

/// Greeter deployed ahead of the token
#[sol(rpc)]
interface IYourContract {
    function greeting() external view returns (string);
}
}
