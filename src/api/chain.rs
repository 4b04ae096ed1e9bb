use std::sync::Arc;

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::transports::BoxTransport;
use async_trait::async_trait;

use crate::ERC20;

/// Read-only view of a chain: the handful of calls a balance run makes.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn chain_id(&self) -> anyhow::Result<u64>;

    async fn native_balance(&self, owner: Address) -> anyhow::Result<U256>;

    async fn token_symbol(&self, token: Address) -> anyhow::Result<String>;

    async fn token_decimals(&self, token: Address) -> anyhow::Result<u8>;

    async fn token_balance(&self, token: Address, owner: Address) -> anyhow::Result<U256>;
}

/// Opens connections to an RPC endpoint. Opening does not imply the node is reachable.
#[async_trait]
pub trait Dialer: Send + Sync {
    type Connection: ChainReader;

    async fn dial(&self, endpoint: &str) -> anyhow::Result<Self::Connection>;
}

pub struct RpcChain<M> {
    client: Arc<M>,
}

impl<M: Provider> RpcChain<M> {
    pub fn new(client: Arc<M>) -> Self {
        RpcChain { client }
    }
}

#[async_trait]
impl<M: Provider + 'static> ChainReader for RpcChain<M> {
    async fn chain_id(&self) -> anyhow::Result<u64> {
        Ok(self.client.get_chain_id().await?)
    }

    async fn native_balance(&self, owner: Address) -> anyhow::Result<U256> {
        Ok(self.client.get_balance(owner).await?)
    }

    async fn token_symbol(&self, token: Address) -> anyhow::Result<String> {
        let contract = ERC20::new(token, self.client.clone());
        Ok(contract.symbol().call().await?._0)
    }

    async fn token_decimals(&self, token: Address) -> anyhow::Result<u8> {
        let contract = ERC20::new(token, self.client.clone());
        Ok(contract.decimals().call().await?._0)
    }

    async fn token_balance(&self, token: Address, owner: Address) -> anyhow::Result<U256> {
        let contract = ERC20::new(token, self.client.clone());
        Ok(contract.balanceOf(owner).call().await?._0)
    }
}

/// Dials http(s), ws(s) or ipc endpoints through alloy's builtin transports.
pub struct RpcDialer;

#[async_trait]
impl Dialer for RpcDialer {
    type Connection = RpcChain<RootProvider<BoxTransport>>;

    async fn dial(&self, endpoint: &str) -> anyhow::Result<Self::Connection> {
        let client = ProviderBuilder::new().on_builtin(endpoint).await?;
        Ok(RpcChain::new(Arc::new(client)))
    }
}
