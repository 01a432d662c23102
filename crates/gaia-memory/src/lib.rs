pub mod error;
pub mod store;
pub mod types;

pub use error::MemoryError;
pub use store::{recent_window, MemoryStore};
pub use types::{Role, Turn};
