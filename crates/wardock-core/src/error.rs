use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config")]
    ConfigSerialize { source: toml::ser::Error },

    // ── Image identifiers ──
    #[error("image {part} must not be empty")]
    EmptyIdentifierPart { part: &'static str },
}
