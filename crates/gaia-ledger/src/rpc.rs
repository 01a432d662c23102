//! Solana JSON-RPC 2.0 client over HTTP.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::{LedgerClient, LedgerError, TransactionRecord};

pub struct SolanaRpc {
    client: reqwest::Client,
    rpc_url: String,
    commitment: String,
}

impl SolanaRpc {
    pub fn new(rpc_url: String, commitment: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url,
            commitment,
        }
    }

    /// Issue one JSON-RPC call and unwrap the `result` field.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, LedgerError> {
        debug!(method, "sending ledger RPC request");

        let resp = self
            .client
            .post(&self.rpc_url)
            .header("content-type", "application/json")
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "ledger RPC HTTP error");
            return Err(LedgerError::Parse(format!("HTTP {status}: {text}")));
        }

        let envelope: RpcEnvelope<T> = resp
            .json()
            .await
            .map_err(|e| LedgerError::Parse(e.to_string()))?;

        match (envelope.error, envelope.result) {
            (Some(err), _) => Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            }),
            (None, Some(result)) => Ok(result),
            // `result: null` is a legitimate answer (e.g. getBlockTime for a
            // slot with no known time); let the target type decide.
            (None, None) => serde_json::from_value(serde_json::Value::Null)
                .map_err(|_| LedgerError::Parse("response had neither result nor error".into())),
        }
    }
}

#[async_trait::async_trait]
impl LedgerClient for SolanaRpc {
    fn validate_address(&self, address: &str) -> bool {
        crate::is_valid_pubkey(address)
    }

    async fn get_balance(&self, address: &str) -> Result<u64, LedgerError> {
        let value: ContextValue<u64> = self
            .call(
                "getBalance",
                json!([address, { "commitment": self.commitment }]),
            )
            .await?;
        Ok(value.value)
    }

    async fn get_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        self.call(
            "getSignaturesForAddress",
            json!([address, { "limit": limit }]),
        )
        .await
    }

    async fn get_current_slot(&self) -> Result<u64, LedgerError> {
        self.call("getSlot", json!([{ "commitment": self.commitment }]))
            .await
    }

    async fn get_block_time(&self, slot: u64) -> Result<Option<i64>, LedgerError> {
        self.call("getBlockTime", json!([slot])).await
    }
}

// JSON-RPC wire types (deserialization only)

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Solana wraps some results in `{ "context": ..., "value": ... }`.
#[derive(Deserialize)]
struct ContextValue<T> {
    value: T,
}
