//! Crate-level error types for doclint.

use std::path::PathBuf;

/// Errors that abort a command outright. Per-file problems inside a scan are
/// never routed through here; checkers downgrade those to error findings so
/// one unreadable document cannot stop the rest of the run.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a report failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The configured project root does not exist or is not a directory.
    #[error("project root not found: {}", path.display())]
    RootNotFound {
        /// Path that was given as the project root.
        path: PathBuf,
    },

    /// The `.doclint.toml` override file exists but cannot be parsed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
