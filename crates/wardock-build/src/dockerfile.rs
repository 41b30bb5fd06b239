use std::path::{Path, PathBuf};

use wardock_core::ImageConfig;

/// Marker line replaced by the artifact's `ADD` instruction.
pub const ADD_DIRECTIVE_SLOT: &str = "{{ADD_DIRECTIVE}}";

/// Dockerfile lines with exactly one [`ADD_DIRECTIVE_SLOT`] line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileTemplate {
    lines: Vec<String>,
    slot: usize,
}

impl DockerfileTemplate {
    /// Tomcat template built from `[image]` settings.
    pub fn builtin(config: &ImageConfig) -> Self {
        let cmd = serde_json::Value::from(config.cmd.clone()).to_string();
        Self {
            lines: vec![
                format!("FROM {}", config.base_image),
                format!("MAINTAINER {}", config.maintainer),
                ADD_DIRECTIVE_SLOT.to_owned(),
                format!("CMD {cmd}"),
            ],
            slot: 2,
        }
    }

    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        let slots: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.trim() == ADD_DIRECTIVE_SLOT)
            .map(|(i, _)| i)
            .collect();

        match slots.as_slice() {
            [] => Err(TemplateError::MissingSlot),
            [slot] => Ok(Self { lines, slot: *slot }),
            _ => Err(TemplateError::DuplicateSlot { count: slots.len() }),
        }
    }

    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let text = std::fs::read_to_string(path).map_err(|e| TemplateError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&text).map_err(|e| TemplateError::Invalid {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Template lines with the slot left in place.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Renders the Dockerfile that deploys one artifact.
#[derive(Debug, Clone)]
pub struct DockerfileGenerator {
    template: DockerfileTemplate,
    template_path: Option<PathBuf>,
    deploy_dir: String,
}

impl DockerfileGenerator {
    /// Uses the configured template file when set, the builtin one otherwise.
    pub fn new(config: &ImageConfig) -> Result<Self, TemplateError> {
        match &config.template {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using custom Dockerfile template");
                let mut generator =
                    Self::with_template(DockerfileTemplate::load(path)?, &config.deploy_dir);
                generator.template_path = Some(path.clone());
                Ok(generator)
            }
            None => Ok(Self::with_template(
                DockerfileTemplate::builtin(config),
                &config.deploy_dir,
            )),
        }
    }

    pub fn with_template(template: DockerfileTemplate, deploy_dir: &str) -> Self {
        Self {
            template,
            template_path: None,
            deploy_dir: deploy_dir.to_owned(),
        }
    }

    /// File the template was loaded from; `None` for the builtin or an
    /// in-memory template.
    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    pub fn render_lines(&self, artifact_name: &str) -> Vec<String> {
        let mut lines = self.template.lines.clone();
        lines[self.template.slot] = self.add_directive(artifact_name);
        lines
    }

    pub fn render(&self, artifact_name: &str) -> String {
        let mut out = self.render_lines(artifact_name).join("\n");
        out.push('\n');
        out
    }

    fn add_directive(&self, artifact_name: &str) -> String {
        if artifact_name.chars().any(char::is_whitespace) {
            let args = serde_json::Value::from(vec![artifact_name, self.deploy_dir.as_str()]);
            format!("ADD {args}")
        } else {
            format!("ADD {artifact_name} {}", self.deploy_dir)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Dockerfile template has no {{{{ADD_DIRECTIVE}}}} line")]
    MissingSlot,
    #[error("Dockerfile template has {count} {{{{ADD_DIRECTIVE}}}} lines, expected one")]
    DuplicateSlot { count: usize },
    #[error("failed to read Dockerfile template at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid Dockerfile template at {path}")]
    Invalid {
        path: PathBuf,
        source: Box<TemplateError>,
    },
}
