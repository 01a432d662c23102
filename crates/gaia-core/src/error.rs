use thiserror::Error;

/// Bootstrap-level failures. Subsystems carry their own error types
/// (`MemoryError`, `LedgerError`, `ProviderError`); this covers what is left
/// once those are split out.
#[derive(Debug, Error)]
pub enum GaiaError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GaiaError>;
