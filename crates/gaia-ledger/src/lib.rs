//! Ledger RPC adapter — balance, transaction history, and slot queries
//! against a Solana JSON-RPC endpoint.
//!
//! The `LedgerClient` trait is the seam the command router depends on;
//! tests substitute stub implementations for the HTTP client.

pub mod rpc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use rpc::SolanaRpc;

/// One confirmed signature entry, as `getSignaturesForAddress` reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub signature: String,
    pub slot: u64,
    /// Transaction error object, `null` for successful transactions.
    pub err: Option<serde_json::Value>,
    pub memo: Option<String>,
    pub block_time: Option<i64>,
    pub confirmation_status: Option<String>,
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Local validity check: does `address` decode to a 32-byte public key?
    /// No network I/O.
    fn validate_address(&self, address: &str) -> bool;

    /// Balance of `address` in the smallest unit (lamports).
    async fn get_balance(&self, address: &str) -> Result<u64, LedgerError>;

    /// Most recent `limit` transaction signatures for `address`, newest first.
    async fn get_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, LedgerError>;

    /// Current network slot.
    async fn get_current_slot(&self) -> Result<u64, LedgerError>;

    /// Estimated production time of `slot` as a unix timestamp, when known.
    async fn get_block_time(&self, slot: u64) -> Result<Option<i64>, LedgerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shared 32-byte-pubkey check used by `SolanaRpc` and reusable by stubs.
pub fn is_valid_pubkey(address: &str) -> bool {
    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == 32)
}
