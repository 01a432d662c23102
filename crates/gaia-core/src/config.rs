use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Divisor from the ledger's smallest unit to its native unit (lamports → SOL).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
/// Number of transaction signatures returned by `/sol tx`.
pub const TX_HISTORY_LIMIT: usize = 5;

/// Top-level config (gaia.toml + GAIA_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaiaConfig {
    pub telegram: TelegramConfig,
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub solana: SolanaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Directory holding one JSON file per conversation.
    #[serde(default = "default_memory_dir")]
    pub dir: String,
    /// Number of most-recent turns rendered into the prompt.
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            dir: default_memory_dir(),
            window: default_window(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    #[serde(default = "default_knowledge_dir")]
    pub dir: String,
    /// Ordered list of files concatenated into the knowledge blob.
    #[serde(default = "default_knowledge_files")]
    pub files: Vec<String>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            dir: default_knowledge_dir(),
            files: default_knowledge_files(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolanaConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_commitment")]
    pub commitment: String,
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            commitment: default_commitment(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_memory_dir() -> String {
    "./memory".to_string()
}
fn default_window() -> usize {
    20
}
fn default_knowledge_dir() -> String {
    "./knowledge".to_string()
}
fn default_knowledge_files() -> Vec<String> {
    ["book0.txt", "book1.txt", "traits.txt", "rules.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}
fn default_commitment() -> String {
    "confirmed".to_string()
}

impl GaiaConfig {
    /// Load config from a TOML file with GAIA_* env var overrides.
    ///
    /// Env keys use double underscore as the section separator,
    /// e.g. `GAIA_TELEGRAM__BOT_TOKEN`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("gaia.toml");

        let config: GaiaConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("GAIA_").split("__"))
            .extract()
            .map_err(|e| crate::error::GaiaError::Config(e.to_string()))?;

        Ok(config)
    }
}
