use std::sync::Arc;

use tracing::info;

use gaia_agent::pipeline::MessageContext;
use gaia_agent::provider::CompletionProvider;
use gaia_agent::OpenAiProvider;
use gaia_core::config::GaiaConfig;
use gaia_core::identity::AgentIdentity;
use gaia_knowledge::KnowledgeBlob;
use gaia_ledger::{LedgerClient, SolanaRpc};
use gaia_memory::MemoryStore;
use gaia_telegram::TelegramAdapter;

/// Shared host state handed to the pipeline and channel adapter.
struct AppState {
    provider: Box<dyn CompletionProvider>,
    ledger: Box<dyn LedgerClient>,
    memory: MemoryStore,
    knowledge: KnowledgeBlob,
    model: String,
    max_tokens: u32,
    memory_window: usize,
}

impl MessageContext for AppState {
    fn provider(&self) -> &dyn CompletionProvider {
        &*self.provider
    }
    fn ledger(&self) -> &dyn LedgerClient {
        &*self.ledger
    }
    fn memory(&self) -> &MemoryStore {
        &self.memory
    }
    fn knowledge(&self) -> &KnowledgeBlob {
        &self.knowledge
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
    fn memory_window(&self) -> usize {
        self.memory_window
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gaia_bot=info,gaia_agent=info,gaia_telegram=info".into()),
        )
        .init();

    // config: explicit path via GAIA_CONFIG, else ./gaia.toml
    let config_path = std::env::var("GAIA_CONFIG").ok();
    let config = GaiaConfig::load(config_path.as_deref())?;

    let knowledge = gaia_knowledge::load(&config.knowledge.dir, &config.knowledge.files);
    let memory = MemoryStore::new(&config.memory.dir)?;
    info!(dir = %config.memory.dir, "memory store ready");

    let provider = Box::new(OpenAiProvider::new(
        config.openai.api_key.clone(),
        config.openai.base_url.clone(),
    ));
    let ledger = Box::new(SolanaRpc::new(
        config.solana.rpc_url.clone(),
        config.solana.commitment.clone(),
    ));

    let state = Arc::new(AppState {
        provider,
        ledger,
        memory,
        knowledge,
        model: config.agent.model.clone(),
        max_tokens: config.agent.max_tokens,
        memory_window: config.memory.window,
    });

    let identity = Arc::new(AgentIdentity::new());

    info!(model = %config.agent.model, "gaia agent starting");
    TelegramAdapter::new(&config.telegram, state, identity)
        .run()
        .await;

    Ok(())
}
