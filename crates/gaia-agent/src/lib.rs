pub mod openai;
pub mod pipeline;
pub mod prompt;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::{ChatMessage, ChatRole, CompletionProvider, CompletionRequest, ProviderError};
