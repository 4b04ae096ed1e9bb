use std::path::PathBuf;

use alloy::sol;
use api::query::filter::SelectionCriteria;
use clap::Parser;
use colored::Colorize;
use config::general::Config;
use globals::DEFAULT_CONFIG_PATH;

mod api;
mod config;
mod errors;
mod globals;
mod logging;
mod menu;

/// Batch-generate EVM wallets and check their native and token balances.
#[derive(Parser, Debug)]
#[command(name = "walletbatch", version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long)]
    debug: bool,

    /// Only query the wallets with these ids
    #[arg(short, long, num_args = 1.., value_name = "ID")]
    equal: Vec<usize>,

    /// Only query wallets with an id greater than this (0 = no bound)
    #[arg(short, long, default_value_t = 0, value_name = "ID")]
    greater: usize,

    /// Only query wallets with an id less than this (0 = no bound)
    #[arg(short, long, default_value_t = 0, value_name = "ID")]
    less: usize,

    /// Config file; built-in networks and defaults are used when it is missing
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug)?;

    let config = Config::load_or_default(&cli.config)?;
    let criteria = SelectionCriteria::new(cli.equal, cli.greater, cli.less);

    tokio::select! {
        result = menu::run(config, criteria) => result,
        _ = tokio::signal::ctrl_c() => {
            // restore the cursor a pending prompt may have hidden
            print!("\x1B[?25h");
            println!("\n{}", " Interrupted, exiting.".bright_yellow());
            // a prompt may still be blocking a worker thread, don't wait for it
            std::process::exit(0);
        }
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract ERC20 {
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
    }
}
