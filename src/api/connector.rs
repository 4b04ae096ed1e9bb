use std::future::Future;
use std::time::Duration;

use anyhow::anyhow;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::chain::{ChainReader, Dialer};
use crate::errors::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait between two attempts. Never applied after the last one.
    pub cooldown: Duration,
    /// Upper bound on any single RPC round trip, connection attempts included.
    pub request_timeout: Duration,
}

/// Runs one RPC call, failing it once `limit` has elapsed.
pub async fn within<T, F>(limit: Duration, call: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    timeout(limit, call)
        .await
        .map_err(|_| anyhow!("request timed out after {:.1}s", limit.as_secs_f64()))?
}

/// Dials `endpoint` and checks that it answers, retrying per `policy`.
/// Transport failures and stalled attempts only count as a failed attempt;
/// exhaustion is the only error returned.
pub async fn connect<D: Dialer>(
    dialer: &D,
    endpoint: &str,
    policy: RetryPolicy,
) -> Result<D::Connection, WalletError> {
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        match within(policy.request_timeout, try_connect(dialer, endpoint)).await {
            Ok(connection) => {
                info!("Connected to node: {endpoint}");
                return Ok(connection);
            }
            Err(err) => warn!("Connection attempt {attempt}/{attempts} to {endpoint} failed: {err:#}"),
        }

        if attempt < attempts {
            sleep(policy.cooldown).await;
        }
    }

    Err(WalletError::Connection {
        endpoint: endpoint.to_string(),
        attempts,
    })
}

async fn try_connect<D: Dialer>(dialer: &D, endpoint: &str) -> anyhow::Result<D::Connection> {
    let connection = dialer.dial(endpoint).await?;
    let chain_id = connection.chain_id().await?;
    debug!("{endpoint} reports chain id {chain_id}");
    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{MockChain, MockDialer};

    const ENDPOINT: &str = "http://127.0.0.1:9";

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            cooldown: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_endpoint_exhausts_every_attempt() {
        let dialer = MockDialer::new(MockChain::default()).refusing(usize::MAX);

        let err = connect(&dialer, ENDPOINT, policy(3)).await.err().unwrap();

        assert!(matches!(
            err,
            WalletError::Connection { ref endpoint, attempts: 3 } if endpoint == ENDPOINT
        ));
        let times = dialer.dial_times();
        assert_eq!(times.len(), 3);
        assert_eq!(times[1] - times[0], Duration::from_secs(2));
        assert_eq!(times[2] - times[1], Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn no_cooldown_after_the_last_attempt() {
        let dialer = MockDialer::new(MockChain::default()).refusing(usize::MAX);
        let started = tokio::time::Instant::now();

        let _ = connect(&dialer, ENDPOINT, policy(3)).await;

        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_refusals() {
        let dialer = MockDialer::new(MockChain::default()).refusing(2);

        let connection = connect(&dialer, ENDPOINT, policy(3)).await;

        assert!(connection.is_ok());
        assert_eq!(dialer.dial_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_liveness_check_counts_as_a_failed_attempt() {
        let dialer = MockDialer::new(MockChain::default().unresponsive());

        let err = connect(&dialer, ENDPOINT, policy(2)).await.err().unwrap();

        assert!(matches!(err, WalletError::Connection { attempts: 2, .. }));
        assert_eq!(dialer.dial_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_node_times_out_each_attempt() {
        let dialer = MockDialer::new(MockChain::default().stalled());
        let started = tokio::time::Instant::now();

        let err = connect(&dialer, ENDPOINT, policy(3)).await.err().unwrap();

        assert!(matches!(err, WalletError::Connection { attempts: 3, .. }));
        assert_eq!(dialer.dial_count(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(3 * 10 + 2 * 2));
    }

    #[tokio::test(start_paused = true)]
    async fn within_bounds_a_single_call() {
        let answer = within(Duration::from_secs(1), async { Ok(7) }).await.unwrap();
        assert_eq!(answer, 7);

        let err = within(Duration::from_secs(1), std::future::pending::<anyhow::Result<u8>>())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn zero_attempts_still_tries_once() {
        let dialer = MockDialer::new(MockChain::default());
        let policy = RetryPolicy {
            max_attempts: 0,
            cooldown: Duration::ZERO,
            request_timeout: Duration::from_secs(10),
        };

        assert!(connect(&dialer, ENDPOINT, policy).await.is_ok());
        assert_eq!(dialer.dial_count(), 1);
    }
}
