//! Startup knowledge loader.
//!
//! Reads a fixed, ordered list of text files once at startup and concatenates
//! them into a single immutable blob with a `### <file>` header per section.
//! Missing files are skipped with a warning — the agent runs with whatever
//! knowledge is present.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

/// Immutable knowledge text, shared across the process for its lifetime.
#[derive(Debug, Clone)]
pub struct KnowledgeBlob(Arc<str>);

impl KnowledgeBlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read `files` from `dir` in order and assemble the knowledge blob.
///
/// Unreadable files (missing or otherwise) contribute nothing; the section
/// header is only emitted for files that were actually read.
pub fn load(dir: impl AsRef<Path>, files: &[String]) -> KnowledgeBlob {
    let dir = dir.as_ref();
    let mut content = String::new();
    let mut loaded = 0usize;

    for file in files {
        let path = dir.join(file);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                content.push_str(&format!("\n### {file}\n"));
                content.push_str(&text);
                content.push('\n');
                loaded += 1;
                info!(file = %file, bytes = text.len(), "knowledge file loaded");
            }
            Err(e) => {
                warn!(file = %file, error = %e, "knowledge file skipped");
            }
        }
    }

    info!(loaded, skipped = files.len() - loaded, "knowledge assembly complete");
    KnowledgeBlob(Arc::from(content))
}
