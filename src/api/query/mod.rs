pub mod filter;
pub mod types;

use std::time::Duration;

use alloy::primitives::Address;
use colored::Colorize;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use self::filter::SelectionCriteria;
use self::types::{QueryResult, RunReport, WalletOutcome};
use super::chain::{ChainReader, Dialer};
use super::connector::{connect, RetryPolicy};
use super::keys::derive_address;
use super::token::TokenContractClient;
use super::utils::format_amount;
use crate::config::general::Config;
use crate::config::network::NetworkProfile;
use crate::config::wallet::types::WalletRecord;
use crate::config::wallet::Ledger;
use crate::errors::WalletError;

/// Random wait inserted after every wallet lookup to stay under the
/// endpoint's rate limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    pub fn new(min: Duration, max: Duration) -> Pacing {
        Pacing {
            min: min.min(max),
            max: max.max(min),
        }
    }

    #[cfg(test)]
    pub fn none() -> Pacing {
        Pacing::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

/// One balance run over a ledger on a single network.
///
/// The run is strictly sequential: connect, read the token metadata once,
/// then walk the ledger wallet by wallet with a pacing delay in between.
/// Failing to connect or to read the metadata aborts the run; anything that
/// goes wrong for a single wallet is recorded in the report and the walk
/// continues.
pub struct BalanceQuery<'a, D> {
    dialer: &'a D,
    network_id: &'a str,
    profile: &'a NetworkProfile,
    retry: RetryPolicy,
    pacing: Pacing,
}

impl<'a, D: Dialer> BalanceQuery<'a, D> {
    pub fn new(
        dialer: &'a D,
        network_id: &'a str,
        profile: &'a NetworkProfile,
        retry: RetryPolicy,
        pacing: Pacing,
    ) -> Self {
        BalanceQuery {
            dialer,
            network_id,
            profile,
            retry,
            pacing,
        }
    }

    pub fn from_config(
        dialer: &'a D,
        config: &'a Config,
        network_id: &'a str,
    ) -> anyhow::Result<Self> {
        Ok(BalanceQuery::new(
            dialer,
            network_id,
            config.networks.get(network_id)?,
            config.query.retry_policy()?,
            config.query.pacing()?,
        ))
    }

    pub async fn run(
        &self,
        ledger: &Ledger,
        criteria: &SelectionCriteria,
    ) -> Result<RunReport, WalletError> {
        let mut report = RunReport {
            network_id: self.network_id.to_string(),
            network_name: self.profile.native_name.clone(),
            native_symbol: self.profile.native_symbol.clone(),
            token_symbol: None,
            ledger_path: ledger.path().to_path_buf(),
            outcomes: Vec::new(),
        };

        let records = ledger.load();
        if records.is_empty() {
            warn!("No wallets found in {}", ledger.path().display());
            return Ok(report);
        }
        debug!(
            "Loaded {} wallets, selecting {criteria}, pacing {:?}..{:?}",
            records.len(),
            self.pacing.min(),
            self.pacing.max()
        );

        let connection = connect(self.dialer, &self.profile.rpc_url, self.retry).await?;
        let client = TokenContractClient::resolve(
            &connection,
            self.profile.token_contract,
            self.retry.request_timeout,
        )
        .await?;
        report.token_symbol = Some(client.metadata().symbol.clone());

        for (position, record) in records.iter().enumerate() {
            let index = position + 1;
            if !criteria.matches(index) {
                continue;
            }
            let outcome = self.query_wallet(&client, index, record).await;
            report.outcomes.push(outcome);
        }

        info!(
            "{}",
            format!(
                "Queried {} wallets on {} ({}) -> {}",
                report.queried(),
                self.profile.native_name,
                self.network_id.to_uppercase(),
                ledger.path().display()
            )
            .green()
        );
        Ok(report)
    }

    async fn query_wallet<C: ChainReader>(
        &self,
        client: &TokenContractClient<'_, C>,
        index: usize,
        record: &WalletRecord,
    ) -> WalletOutcome {
        let address = match derive_address(record.private_key()) {
            Ok(address) => address,
            Err(reason) => {
                error!("id: {index} {reason}");
                return WalletOutcome::Skipped { index, reason };
            }
        };

        let outcome = match self.fetch_balances(client, index, address).await {
            Ok(result) => {
                debug!(
                    "id: {index} raw balances: {} / {}",
                    result.native_balance_raw, result.token_balance_raw
                );
                info!(
                    "id: {index} address: {} balance: {} {} / {} {}",
                    address.to_string().yellow(),
                    result.native_balance,
                    self.profile.native_symbol,
                    result.token_balance,
                    client.metadata().symbol
                );
                WalletOutcome::Queried(result)
            }
            Err(reason) => {
                error!("id: {index} {reason}");
                WalletOutcome::Skipped { index, reason }
            }
        };

        let delay = self.pacing.next_delay();
        debug!("Sleeping {:.2}s before the next wallet", delay.as_secs_f64());
        sleep(delay).await;

        outcome
    }

    async fn fetch_balances<C: ChainReader>(
        &self,
        client: &TokenContractClient<'_, C>,
        index: usize,
        address: Address,
    ) -> Result<QueryResult, WalletError> {
        let native_balance_raw = client.native_balance(address).await?;
        let token_balance_raw = client.token_balance(address).await?;

        Ok(QueryResult {
            index,
            address,
            native_balance: format_amount(native_balance_raw, self.profile.native_decimals),
            token_balance: format_amount(token_balance_raw, client.metadata().decimals),
            native_balance_raw,
            token_balance_raw,
        })
    }
}
