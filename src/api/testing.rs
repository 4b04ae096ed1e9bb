use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use anyhow::anyhow;
use async_trait::async_trait;
use tokio::time::Instant;

use super::chain::{ChainReader, Dialer};

/// In-memory chain with scripted balances and failure points.
#[derive(Default)]
pub struct MockChain {
    unresponsive: bool,
    stalled: bool,
    symbol: Option<String>,
    decimals: Option<u8>,
    native: HashMap<Address, U256>,
    token: HashMap<Address, U256>,
    failing_owners: HashSet<Address>,
    stalling_owners: HashSet<Address>,
    pub metadata_calls: AtomicUsize,
    pub balance_calls: AtomicUsize,
}

impl MockChain {
    pub fn with_token(symbol: &str, decimals: u8) -> MockChain {
        MockChain {
            symbol: Some(symbol.to_string()),
            decimals: Some(decimals),
            ..MockChain::default()
        }
    }

    pub fn unresponsive(mut self) -> MockChain {
        self.unresponsive = true;
        self
    }

    /// Accepts connections but never answers `chain_id`.
    pub fn stalled(mut self) -> MockChain {
        self.stalled = true;
        self
    }

    pub fn stalling_for(mut self, owner: Address) -> MockChain {
        self.stalling_owners.insert(owner);
        self
    }

    pub fn balances(mut self, owner: Address, native: u128, token: u128) -> MockChain {
        self.native.insert(owner, U256::from(native));
        self.token.insert(owner, U256::from(token));
        self
    }

    pub fn failing_for(mut self, owner: Address) -> MockChain {
        self.failing_owners.insert(owner);
        self
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainReader for Arc<MockChain> {
    async fn chain_id(&self) -> anyhow::Result<u64> {
        if self.stalled {
            return std::future::pending().await;
        }
        if self.unresponsive {
            return Err(anyhow!("request timed out"));
        }
        Ok(1)
    }

    async fn native_balance(&self, owner: Address) -> anyhow::Result<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.stalling_owners.contains(&owner) {
            return std::future::pending().await;
        }
        if self.failing_owners.contains(&owner) {
            return Err(anyhow!("429 Too Many Requests"));
        }
        Ok(self.native.get(&owner).copied().unwrap_or_default())
    }

    async fn token_symbol(&self, _token: Address) -> anyhow::Result<String> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.symbol.clone().ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn token_decimals(&self, _token: Address) -> anyhow::Result<u8> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.decimals.ok_or_else(|| anyhow!("execution reverted"))
    }

    async fn token_balance(&self, _token: Address, owner: Address) -> anyhow::Result<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.stalling_owners.contains(&owner) {
            return std::future::pending().await;
        }
        if self.failing_owners.contains(&owner) {
            return Err(anyhow!("429 Too Many Requests"));
        }
        Ok(self.token.get(&owner).copied().unwrap_or_default())
    }
}

/// Hands out the same [`MockChain`] on every dial, refusing the first
/// `refusals` attempts, and records when each dial happened.
pub struct MockDialer {
    pub chain: Arc<MockChain>,
    refusals: usize,
    dials: Mutex<Vec<Instant>>,
}

impl MockDialer {
    pub fn new(chain: MockChain) -> MockDialer {
        MockDialer {
            chain: Arc::new(chain),
            refusals: 0,
            dials: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing(mut self, refusals: usize) -> MockDialer {
        self.refusals = refusals;
        self
    }

    pub fn dial_times(&self) -> Vec<Instant> {
        self.dials.lock().unwrap().clone()
    }

    pub fn dial_count(&self) -> usize {
        self.dials.lock().unwrap().len()
    }
}

#[async_trait]
impl Dialer for MockDialer {
    type Connection = Arc<MockChain>;

    async fn dial(&self, endpoint: &str) -> anyhow::Result<Self::Connection> {
        let attempt = {
            let mut dials = self.dials.lock().unwrap();
            dials.push(Instant::now());
            dials.len()
        };
        if attempt <= self.refusals {
            return Err(anyhow!("error sending request for url ({endpoint}): connection refused"));
        }
        Ok(self.chain.clone())
    }
}
