use std::path::Path;
use std::process::Stdio;

use serde::Deserialize;

use crate::error::EngineError;
use crate::settings::{EngineSettings, RESOLVED_ENV};

/// Abstraction over the container engine for testability.
///
/// Production code uses [`DockerCli`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ContainerEngine: Send + Sync {
    /// Build the context directory's Dockerfile, tagging the result.
    /// Returns the image id reported by the engine.
    async fn build(&self, context_dir: &Path, tag: &str) -> Result<String, EngineError>;

    /// Remove an image by tag.
    async fn remove_image(&self, tag: &str) -> Result<(), EngineError>;

    /// Client and daemon versions.
    async fn version(&self) -> Result<EngineVersion, EngineError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineVersion {
    #[serde(rename = "Client")]
    pub client: Option<ComponentVersion>,
    #[serde(rename = "Server")]
    pub server: Option<ComponentVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentVersion {
    #[serde(rename = "Version")]
    pub version: String,
}

impl EngineVersion {
    pub fn parse(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::VersionParse { source: e })
    }
}

/// Drives a Docker-compatible CLI (`docker`, `podman`).
#[derive(Debug, Clone)]
pub struct DockerCli {
    settings: EngineSettings,
}

impl DockerCli {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn command_args<const N: usize>(&self, subcommand: [&str; N]) -> Vec<String> {
        let mut args = self.settings.global_args();
        args.extend(subcommand.iter().map(|s| (*s).to_owned()));
        args
    }

    async fn exec(&self, args: &[String]) -> Result<String, EngineError> {
        tracing::debug!(binary = %self.settings.binary, ?args, "running container engine");

        let mut command = tokio::process::Command::new(&self.settings.binary);
        for key in RESOLVED_ENV {
            command.env_remove(key);
        }

        let output = command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| EngineError::NotFound {
                binary: self.settings.binary.clone(),
                source: e,
            })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| EngineError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            Err(EngineError::CommandFailed {
                args: args.to_vec(),
                stderr: if stderr.is_empty() {
                    format!("exit code: {}", output.status)
                } else {
                    stderr
                },
            })
        }
    }
}

impl ContainerEngine for DockerCli {
    async fn build(&self, context_dir: &Path, tag: &str) -> Result<String, EngineError> {
        let context = context_dir
            .to_str()
            .ok_or_else(|| EngineError::InvalidPath(context_dir.to_path_buf()))?;

        let output = self
            .exec(&self.command_args(["build", "--tag", tag, "--quiet", "--", context]))
            .await?;

        Ok(output.trim().to_owned())
    }

    async fn remove_image(&self, tag: &str) -> Result<(), EngineError> {
        self.exec(&self.command_args(["rmi", tag])).await?;
        Ok(())
    }

    async fn version(&self) -> Result<EngineVersion, EngineError> {
        let output = self
            .exec(&self.command_args(["version", "--format", "{{json .}}"]))
            .await?;
        EngineVersion::parse(output.trim())
    }
}
