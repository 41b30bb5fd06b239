use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Overrides the configured engine binary.
pub const ENGINE_ENV: &str = "WARDOCK_ENGINE";

const HOST_ENV: &str = "DOCKER_HOST";
const TLS_VERIFY_ENV: &str = "DOCKER_TLS_VERIFY";
const CERT_PATH_ENV: &str = "DOCKER_CERT_PATH";

/// Variables already turned into [`EngineSettings::global_args`]; the engine
/// process must not see them a second time.
pub(crate) const RESOLVED_ENV: [&str; 3] = [HOST_ENV, TLS_VERIFY_ENV, CERT_PATH_ENV];

/// How to reach the container engine, taken from the standard Docker
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub binary: String,
    pub host: Option<String>,
    pub tls: Option<TlsSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsSettings {
    pub ca_cert: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl EngineSettings {
    /// Reads the process environment.
    pub fn from_env(binary: &str) -> Result<Self, EngineError> {
        Self::from_lookup(binary, |key| {
            std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Like [`from_env`](Self::from_env), with variables resolved by `lookup`.
    pub fn from_lookup<F>(binary: &str, lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let binary = non_empty(ENGINE_ENV).unwrap_or_else(|| binary.to_owned());
        let host = non_empty(HOST_ENV);

        let tls_verify = non_empty(TLS_VERIFY_ENV).is_some_and(|v| v != "0");
        let tls = if tls_verify {
            let cert_dir = non_empty(CERT_PATH_ENV)
                .map(PathBuf::from)
                .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".docker")))
                .ok_or(EngineError::CertPathUnset)?;
            Some(TlsSettings::from_dir(&cert_dir)?)
        } else {
            None
        };

        tracing::debug!(
            binary = %binary,
            host = host.as_deref().unwrap_or("(default)"),
            tls = tls.is_some(),
            "resolved container engine settings"
        );

        Ok(Self { binary, host, tls })
    }

    /// Flags placed before the subcommand on every engine invocation.
    pub fn global_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(host) = &self.host {
            args.push("--host".to_owned());
            args.push(host.clone());
        }

        if let Some(tls) = &self.tls {
            args.push("--tlsverify".to_owned());
            for (flag, path) in [
                ("--tlscacert", &tls.ca_cert),
                ("--tlscert", &tls.cert),
                ("--tlskey", &tls.key),
            ] {
                args.push(flag.to_owned());
                args.push(path.to_string_lossy().into_owned());
            }
        }

        args
    }
}

impl TlsSettings {
    /// Expects `ca.pem`, `cert.pem` and `key.pem` in `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, EngineError> {
        let require = |name: &str| {
            let path = dir.join(name);
            if path.is_file() {
                Ok(path)
            } else {
                Err(EngineError::MissingCertificate { path })
            }
        };

        Ok(Self {
            ca_cert: require("ca.pem")?,
            cert: require("cert.pem")?,
            key: require("key.pem")?,
        })
    }
}
