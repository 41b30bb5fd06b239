use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "wardock.toml";

/// wardock.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardockConfig {
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Image the web application runs on
    #[serde(default = "default_base_image")]
    pub base_image: String,
    /// Value of the MAINTAINER directive
    #[serde(default = "default_maintainer")]
    pub maintainer: String,
    /// Exec-form command of the CMD directive
    #[serde(default = "default_cmd")]
    pub cmd: Vec<String>,
    /// Directory inside the image the artifact is added to
    #[serde(default = "default_deploy_dir")]
    pub deploy_dir: String,
    /// Custom Dockerfile template. Must contain the `{{ADD_DIRECTIVE}}`
    /// slot on a line of its own. Relative paths resolve against the
    /// working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Container engine CLI (`docker`, `podman`, ...)
    #[serde(default = "default_engine_binary")]
    pub binary: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            maintainer: default_maintainer(),
            cmd: default_cmd(),
            deploy_dir: default_deploy_dir(),
            template: None,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_engine_binary(),
        }
    }
}

impl WardockConfig {
    /// Load from wardock.toml in the given directory, or return defaults if not found.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            let config = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Render the configuration as wardock.toml content.
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::ConfigSerialize { source: e })
    }
}

fn default_base_image() -> String {
    "tomcat".to_owned()
}

fn default_maintainer() -> String {
    "user".to_owned()
}

fn default_cmd() -> Vec<String> {
    vec!["catalina.sh".to_owned(), "run".to_owned()]
}

fn default_deploy_dir() -> String {
    "/usr/local/tomcat/webapps/".to_owned()
}

fn default_engine_binary() -> String {
    "docker".to_owned()
}
