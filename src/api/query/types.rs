use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use colored::Colorize;

use crate::errors::WalletError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub index: usize,
    pub address: Address,
    pub native_balance_raw: U256,
    pub token_balance_raw: U256,
    pub native_balance: String,
    pub token_balance: String,
}

#[derive(Debug)]
pub enum WalletOutcome {
    Queried(QueryResult),
    Skipped { index: usize, reason: WalletError },
}

impl WalletOutcome {
    pub fn index(&self) -> usize {
        match self {
            WalletOutcome::Queried(result) => result.index,
            WalletOutcome::Skipped { index, .. } => *index,
        }
    }

    pub fn is_queried(&self) -> bool {
        matches!(self, WalletOutcome::Queried(_))
    }
}

/// What one balance run did, wallet by wallet, in ledger order.
#[derive(Debug)]
pub struct RunReport {
    pub network_id: String,
    pub network_name: String,
    pub native_symbol: String,
    pub token_symbol: Option<String>,
    pub ledger_path: PathBuf,
    pub outcomes: Vec<WalletOutcome>,
}

impl RunReport {
    /// Wallets that passed the filter, whether or not their lookup succeeded.
    pub fn queried(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_queried()).count()
    }

    pub fn skipped(&self) -> usize {
        self.queried() - self.succeeded()
    }

    pub fn dashboard_title(&self) -> String {
        format!(
            " {} ({}) ",
            self.network_name,
            self.network_id.to_uppercase()
        )
    }

    pub fn dashboard_rows(&self) -> Vec<String> {
        let token_symbol = self.token_symbol.as_deref().unwrap_or("?");
        let mut rows: Vec<String> = self
            .outcomes
            .iter()
            .map(|outcome| match outcome {
                WalletOutcome::Queried(result) => format!(
                    "{} {} {} {} {} {}",
                    format!("{:>4}", result.index).bright_blue(),
                    result.address.to_string().yellow(),
                    "│".white(),
                    format!("{} {}", result.native_balance, self.native_symbol).purple(),
                    "/".white(),
                    format!("{} {}", result.token_balance, token_symbol).purple(),
                ),
                WalletOutcome::Skipped { reason, .. } => format!(
                    "{} {}",
                    format!("{:>4}", outcome.index()).bright_blue(),
                    format!("skipped: {reason}").red(),
                ),
            })
            .collect();

        rows.push(format!(
            "{} queried, {} ok, {} skipped -> {}",
            self.queried(),
            self.succeeded().to_string().green(),
            self.skipped().to_string().red(),
            self.ledger_path.display()
        ));
        rows
    }
}
