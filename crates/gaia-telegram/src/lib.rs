pub mod adapter;
pub mod context;
pub mod handler;
pub mod ingest;
pub mod mention;
pub mod send;
pub mod typing;

pub use adapter::TelegramAdapter;
pub use context::TelegramAppContext;
