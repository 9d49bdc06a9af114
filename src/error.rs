/// Crate-level error types for spotcheck diagnostics.
use std::path::PathBuf;

/// Errors only arise at the edges: reading input, parsing config or records,
/// and talking to the admin API. Label and URL lookups never fail.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The admin API answered with a non-success status.
    #[error("action rejected: {method} {url} returned {status}")]
    ActionRejected {
        /// Response body, possibly empty.
        body: String,
        /// HTTP method of the rejected request.
        method: String,
        /// HTTP status code returned by the server.
        status: u16,
        /// Fully qualified request URL.
        url: String,
    },

    /// A referenced input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The HTTP transport failed before a response was received.
    #[error("http: {0}")]
    Http(
        /// The wrapped transport error.
        #[from]
        reqwest::Error,
    ),

    /// The configured server origin can't be used as a base URL.
    #[error("invalid server url {server}: {reason}")]
    InvalidServer {
        /// Why the origin was refused.
        reason: String,
        /// The configured origin.
        server: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// No record in the file has the requested id.
    #[error("mismatch {mismatch_id} not found in {}", file.display())]
    MismatchNotFound {
        /// File that was searched.
        file: PathBuf,
        /// Requested mismatch id.
        mismatch_id: i64,
    },

    /// Mismatch records could not be parsed.
    #[error("invalid mismatch records in {}: {reason}", file.display())]
    MismatchParse {
        /// File holding the records.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// JSON serialization of command output failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
