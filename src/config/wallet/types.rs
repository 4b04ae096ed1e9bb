use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One ledger line: a private key, optionally followed by the address derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletRecord {
    Unresolved { private_key: String },
    Resolved { private_key: String, address: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed record: {0}")]
pub struct MalformedRecord(pub String);

impl WalletRecord {
    pub fn unresolved(private_key: impl Into<String>) -> WalletRecord {
        WalletRecord::Unresolved {
            private_key: private_key.into(),
        }
    }

    pub fn private_key(&self) -> &str {
        match self {
            WalletRecord::Unresolved { private_key } => private_key,
            WalletRecord::Resolved { private_key, .. } => private_key,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletRecord::Unresolved { .. } => None,
            WalletRecord::Resolved { address, .. } => Some(address),
        }
    }

    pub fn with_address(self, address: impl Into<String>) -> WalletRecord {
        WalletRecord::Resolved {
            private_key: match self {
                WalletRecord::Unresolved { private_key } => private_key,
                WalletRecord::Resolved { private_key, .. } => private_key,
            },
            address: address.into(),
        }
    }
}

impl FromStr for WalletRecord {
    type Err = MalformedRecord;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.trim().split(',');
        let private_key = fields.next().unwrap_or_default().trim();
        let address = fields.next().map(str::trim);

        if fields.next().is_some() {
            return Err(MalformedRecord("expected at most two fields".to_string()));
        }
        if private_key.is_empty() {
            return Err(MalformedRecord("missing private key".to_string()));
        }

        match address {
            None => Ok(WalletRecord::unresolved(private_key)),
            Some("") => Err(MalformedRecord("empty address field".to_string())),
            Some(address) => Ok(WalletRecord::Resolved {
                private_key: private_key.to_string(),
                address: address.to_string(),
            }),
        }
    }
}

impl fmt::Display for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletRecord::Unresolved { private_key } => write!(f, "{private_key}"),
            WalletRecord::Resolved {
                private_key,
                address,
            } => write!(f, "{private_key},{address}"),
        }
    }
}
