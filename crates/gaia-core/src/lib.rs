pub mod config;
pub mod error;
pub mod identity;
pub mod types;

pub use error::{GaiaError, Result};
