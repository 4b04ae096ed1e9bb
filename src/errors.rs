use std::{fmt, path::PathBuf};

use alloy::primitives::Address;
use thiserror::Error;

/// Which of the two balances a failed lookup was after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Native,
    Token,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Native => write!(f, "native"),
            Asset::Token => write!(f, "token"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WalletError {
    /// The node never answered a liveness check. Fatal for the run.
    #[error("could not connect to {endpoint} after {attempts} attempts")]
    Connection { endpoint: String, attempts: u32 },

    /// `symbol()` or `decimals()` on the token contract failed. Fatal for the run.
    #[error("failed to read token contract {token}: {reason}")]
    Metadata { token: Address, reason: String },

    /// Malformed private key. Only the affected wallet is skipped.
    #[error("cannot derive address from private key: {reason}")]
    Derivation { reason: String },

    /// A single balance call failed. Only the affected wallet is skipped.
    #[error("{asset} balance query for {address} failed: {reason}")]
    BalanceQuery {
        asset: Asset,
        address: Address,
        reason: String,
    },

    #[error("ledger {}: {reason}", .path.display())]
    Persistence { path: PathBuf, reason: String },

    #[error("unsupported network: {0}")]
    UnknownNetwork(String),
}

impl WalletError {
    /// Errors that end the whole query run rather than a single wallet.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::Metadata { .. } | Self::UnknownNetwork(_)
        )
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
