pub mod command;
pub mod process;

use gaia_knowledge::KnowledgeBlob;
use gaia_ledger::LedgerClient;
use gaia_memory::MemoryStore;

use crate::provider::CompletionProvider;

/// Context interface the message pipeline requires from its host.
///
/// Implemented by the binary's `AppState`; defined here so the channel
/// adapter crate can stay generic over the host without a circular
/// dependency.
pub trait MessageContext: Send + Sync {
    fn provider(&self) -> &dyn CompletionProvider;
    fn ledger(&self) -> &dyn LedgerClient;
    fn memory(&self) -> &MemoryStore;
    fn knowledge(&self) -> &KnowledgeBlob;

    /// Model identifier passed to the completion provider.
    fn model(&self) -> &str;
    fn max_tokens(&self) -> u32;
    /// Number of recent turns rendered into the prompt.
    fn memory_window(&self) -> usize;
}
