use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("container engine CLI '{binary}' not found")]
    NotFound {
        binary: String,
        source: std::io::Error,
    },

    #[error("container engine command failed: {args:?}\n{stderr}")]
    CommandFailed { args: Vec<String>, stderr: String },

    #[error("container engine output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },

    #[error("build context path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("unexpected container engine version output")]
    VersionParse { source: serde_json::Error },

    // ── Connection settings ──
    #[error("TLS verification requested but DOCKER_CERT_PATH and HOME are unset")]
    CertPathUnset,

    #[error("TLS certificate not found at {path}")]
    MissingCertificate { path: PathBuf },
}
