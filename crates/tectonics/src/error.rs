use std::path::PathBuf;

/// Failures that abort plate generation.
///
/// Oversaturated boundaries are not errors: the attempt loop retries and, if needed, accepts
/// the last attempt anyway. Only contract violations end up here.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("plate generation returned zero plates")]
    NoPlates,

    #[error("cannot generate plates on an empty {width}x{height} grid")]
    EmptyGrid { width: u32, height: u32 },

    #[error("no generation attempts were configured")]
    NoAttempts,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
