use alloy::primitives::{address, Address};

pub const USDT_ETHEREUM_ADDRESS: Address = address!("dac17f958d2ee523a2206206994597c13d831ec7");
pub const USDC_BASE_ADDRESS: Address = address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913");
pub const USDC_BSC_ADDRESS: Address = address!("8ac76a51cc950d9822d68b83fe1ad97b32cd580d");

pub const DEFAULT_LEDGER_DIR: &str = "generate";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
