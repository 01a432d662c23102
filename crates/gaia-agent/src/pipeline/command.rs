//! `/sol` command router — intercepted before the completion pipeline.
//!
//! A consumed command is a hard short-circuit: the completion service is
//! never called and memory is never touched for that message. Every ledger
//! call is wrapped so an RPC failure becomes one generic user-facing reply;
//! raw error text never reaches chat.

use gaia_core::config::{LAMPORTS_PER_SOL, TX_HISTORY_LIMIT};
use gaia_ledger::LedgerClient;
use tracing::warn;

/// Reserved command prefix. Must be the first whitespace-delimited token.
pub const COMMAND_PREFIX: &str = "/sol";

/// Generic reply for any ledger RPC failure.
const RPC_FAILURE_REPLY: &str = "RPC error, try again soon.";

/// Parsed command: subcommand name plus remaining arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Parse `text` as a command invocation.
///
/// Returns `None` unless the first token is exactly the command prefix
/// (case-sensitive, whitespace-delimited). A bare prefix parses to an
/// invocation with an empty name, which dispatch reports as unknown.
pub fn parse(text: &str) -> Option<CommandInvocation> {
    let mut parts = text.split_whitespace();
    if parts.next()? != COMMAND_PREFIX {
        return None;
    }
    Some(CommandInvocation {
        name: parts.next().unwrap_or_default().to_string(),
        args: parts.map(str::to_string).collect(),
    })
}

/// Run a parsed invocation against the ledger and produce the reply text.
pub async fn dispatch(
    invocation: &CommandInvocation,
    ledger: &dyn LedgerClient,
    speaker: &str,
) -> String {
    match invocation.name.as_str() {
        "balance" => {
            let Some(address) = invocation.args.first() else {
                return "Usage: /sol balance <wallet>".to_string();
            };
            if !ledger.validate_address(address) {
                return "❌ Invalid wallet address.".to_string();
            }
            match ledger.get_balance(address).await {
                Ok(lamports) => {
                    let sol = lamports as f64 / LAMPORTS_PER_SOL as f64;
                    format!("{speaker}, that wallet holds {sol} SOL.")
                }
                Err(e) => {
                    warn!(error = %e, address = %address, "balance query failed");
                    RPC_FAILURE_REPLY.to_string()
                }
            }
        }

        "tx" => {
            let Some(address) = invocation.args.first() else {
                return "Usage: /sol tx <wallet>".to_string();
            };
            match ledger.get_transactions(address, TX_HISTORY_LIMIT).await {
                Ok(records) => serde_json::to_string_pretty(&records).unwrap_or_else(|e| {
                    warn!(error = %e, "transaction dump render failed");
                    RPC_FAILURE_REPLY.to_string()
                }),
                Err(e) => {
                    warn!(error = %e, address = %address, "transaction query failed");
                    RPC_FAILURE_REPLY.to_string()
                }
            }
        }

        "slot" => match ledger.get_current_slot().await {
            Ok(slot) => format!("{speaker}, current slot: {slot}"),
            Err(e) => {
                warn!(error = %e, "slot query failed");
                RPC_FAILURE_REPLY.to_string()
            }
        },

        _ => "Unknown command.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaia_ledger::{LedgerError, TransactionRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counting stub: records how many network-facing calls were made.
    #[derive(Default)]
    struct StubLedger {
        valid: bool,
        balance: u64,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl LedgerClient for StubLedger {
        fn validate_address(&self, _address: &str) -> bool {
            self.valid
        }

        async fn get_balance(&self, _address: &str) -> Result<u64, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LedgerError::Rpc {
                    code: -32000,
                    message: "node is behind".into(),
                });
            }
            Ok(self.balance)
        }

        async fn get_transactions(
            &self,
            _address: &str,
            limit: usize,
        ) -> Result<Vec<TransactionRecord>, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..limit)
                .map(|i| TransactionRecord {
                    signature: format!("sig{i}"),
                    slot: 100 + i as u64,
                    err: None,
                    memo: None,
                    block_time: Some(1_700_000_000),
                    confirmation_status: Some("finalized".into()),
                })
                .collect())
        }

        async fn get_current_slot(&self) -> Result<u64, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LedgerError::Parse("bad payload".into()));
            }
            Ok(250_000_000)
        }

        async fn get_block_time(&self, _slot: u64) -> Result<Option<i64>, LedgerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(1_700_000_000))
        }
    }

    fn invocation(name: &str, args: &[&str]) -> CommandInvocation {
        CommandInvocation {
            name: name.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn parse_requires_exact_prefix_token() {
        assert!(parse("/sol balance abc").is_some());
        assert!(parse("/solana balance abc").is_none());
        assert!(parse("hello /sol").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn parse_splits_subcommand_and_args() {
        let inv = parse("/sol balance 4Nd1mBQtr").unwrap();
        assert_eq!(inv.name, "balance");
        assert_eq!(inv.args, vec!["4Nd1mBQtr"]);

        let bare = parse("/sol").unwrap();
        assert_eq!(bare.name, "");
        assert!(bare.args.is_empty());
    }

    #[tokio::test]
    async fn balance_converts_lamports_to_sol() {
        let ledger = StubLedger {
            valid: true,
            balance: 2_500_000_000,
            ..StubLedger::default()
        };
        let reply = dispatch(&invocation("balance", &["wallet"]), &ledger, "alice").await;
        assert!(reply.contains("2.5"), "reply was: {reply}");
        assert!(reply.starts_with("alice,"));
    }

    #[tokio::test]
    async fn balance_without_arg_is_usage_hint_and_no_calls() {
        let ledger = StubLedger::default();
        let reply = dispatch(&invocation("balance", &[]), &ledger, "alice").await;
        assert_eq!(reply, "Usage: /sol balance <wallet>");
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_address_never_fetches_balance() {
        let ledger = StubLedger {
            valid: false,
            ..StubLedger::default()
        };
        let reply = dispatch(&invocation("balance", &["junk"]), &ledger, "alice").await;
        assert_eq!(reply, "❌ Invalid wallet address.");
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rpc_failure_becomes_generic_reply() {
        let ledger = StubLedger {
            valid: true,
            fail: true,
            ..StubLedger::default()
        };
        let reply = dispatch(&invocation("balance", &["wallet"]), &ledger, "alice").await;
        assert_eq!(reply, RPC_FAILURE_REPLY);
        assert!(!reply.contains("node is behind"));
    }

    #[tokio::test]
    async fn tx_dumps_signature_records() {
        let ledger = StubLedger {
            valid: true,
            ..StubLedger::default()
        };
        let reply = dispatch(&invocation("tx", &["wallet"]), &ledger, "alice").await;
        assert!(reply.contains("sig0"));
        assert!(reply.contains("sig4"));
        assert!(!reply.contains("sig5"));
    }

    #[tokio::test]
    async fn slot_reports_numeric_value() {
        let ledger = StubLedger {
            valid: true,
            ..StubLedger::default()
        };
        let reply = dispatch(&invocation("slot", &[]), &ledger, "alice").await;
        assert_eq!(reply, "alice, current slot: 250000000");
    }

    #[tokio::test]
    async fn unknown_subcommand_is_terminal_reply() {
        let ledger = StubLedger::default();
        let reply = dispatch(&invocation("stake", &[]), &ledger, "alice").await;
        assert_eq!(reply, "Unknown command.");
        assert_eq!(ledger.calls.load(Ordering::SeqCst), 0);
    }
}
