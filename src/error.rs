// Error types for the ambient surfaces (configuration and CLI I/O)
// The editing core itself is infallible: out-of-range edits clamp or no-op

use thiserror::Error;

/// Errors raised while loading, saving or validating layout configuration
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("failed to parse config {origin}: {source}")]
    ParseConfig {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value could not be serialized.
    #[error("toml serialization error: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    /// The configuration parsed but its values are unusable.
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
}

/// Result type alias using the crate Error type.
pub type Result<T> = std::result::Result<T, Error>;
