use std::time::Duration;

use alloy::primitives::{Address, U256};
use tracing::debug;

use super::chain::ChainReader;
use super::connector::within;
use crate::errors::{Asset, WalletError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub decimals: u8,
}

/// Balance lookups for one token contract over an open connection. The
/// token's symbol and decimals are read once when the client is built.
/// Every call is bounded by `request_timeout`.
pub struct TokenContractClient<'a, C> {
    connection: &'a C,
    token: Address,
    request_timeout: Duration,
    metadata: TokenMetadata,
}

impl<'a, C: ChainReader> TokenContractClient<'a, C> {
    pub async fn resolve(
        connection: &'a C,
        token: Address,
        request_timeout: Duration,
    ) -> Result<Self, WalletError> {
        let metadata_error = |err: anyhow::Error| WalletError::Metadata {
            token,
            reason: format!("{err:#}"),
        };

        let symbol = within(request_timeout, connection.token_symbol(token))
            .await
            .map_err(metadata_error)?;
        let decimals = within(request_timeout, connection.token_decimals(token))
            .await
            .map_err(metadata_error)?;
        debug!("Token {token}: symbol {symbol}, {decimals} decimals");

        Ok(TokenContractClient {
            connection,
            token,
            request_timeout,
            metadata: TokenMetadata { symbol, decimals },
        })
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub async fn native_balance(&self, owner: Address) -> Result<U256, WalletError> {
        within(self.request_timeout, self.connection.native_balance(owner))
            .await
            .map_err(|err| balance_error(Asset::Native, owner, err))
    }

    pub async fn token_balance(&self, owner: Address) -> Result<U256, WalletError> {
        within(self.request_timeout, self.connection.token_balance(self.token, owner))
            .await
            .map_err(|err| balance_error(Asset::Token, owner, err))
    }
}

fn balance_error(asset: Asset, address: Address, err: anyhow::Error) -> WalletError {
    WalletError::BalanceQuery {
        asset,
        address,
        reason: format!("{err:#}"),
    }
}
