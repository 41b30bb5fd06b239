use std::path::{Path, PathBuf};

use crate::dockerfile::DockerfileGenerator;

/// File name the engine looks for in the build context.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Where an artifact gets built: its file name and its parent directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    dir: PathBuf,
    artifact_name: String,
}

impl BuildContext {
    /// A bare file name (`shop.war`) builds in the working directory.
    pub fn for_artifact(artifact: &Path) -> Result<Self, SynthError> {
        let file_name = artifact
            .file_name()
            .ok_or_else(|| SynthError::NoFileName(artifact.to_path_buf()))?;
        let artifact_name = file_name
            .to_str()
            .ok_or_else(|| SynthError::NonUtf8Name(artifact.to_path_buf()))?
            .to_owned();

        let dir = match artifact.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self { dir, artifact_name })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    pub fn dockerfile_path(&self) -> PathBuf {
        self.dir.join(DOCKERFILE_NAME)
    }
}

/// Writes the rendered Dockerfile into the context directory, replacing
/// any previous content.
pub fn write_dockerfile(
    context: &BuildContext,
    generator: &DockerfileGenerator,
) -> Result<PathBuf, SynthError> {
    let path = context.dockerfile_path();
    let created = !path.exists();

    std::fs::write(&path, generator.render(context.artifact_name())).map_err(|e| {
        SynthError::Write {
            path: path.clone(),
            source: e,
        }
    })?;

    if created {
        tracing::debug!(path = %path.display(), "new Dockerfile created");
    } else {
        tracing::debug!(path = %path.display(), "Dockerfile overwritten");
    }

    Ok(path)
}

#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("artifact path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("artifact file name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
    #[error("failed to write Dockerfile at {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_parent_directory() {
        let ctx = BuildContext::for_artifact(Path::new("/srv/app/target/app.war")).unwrap();
        assert_eq!(ctx.dir(), Path::new("/srv/app/target"));
        assert_eq!(ctx.artifact_name(), "app.war");
        assert_eq!(
            ctx.dockerfile_path(),
            PathBuf::from("/srv/app/target/Dockerfile")
        );
    }

    #[test]
    fn bare_file_name_uses_working_directory() {
        let ctx = BuildContext::for_artifact(Path::new("app.war")).unwrap();
        assert_eq!(ctx.dir(), Path::new("."));
        assert_eq!(ctx.dockerfile_path(), PathBuf::from("./Dockerfile"));
    }

    #[test]
    fn root_has_no_file_name() {
        let result = BuildContext::for_artifact(Path::new("/"));
        assert!(matches!(result, Err(SynthError::NoFileName(_))));
    }

    #[test]
    fn trailing_parent_component_has_no_file_name() {
        let result = BuildContext::for_artifact(Path::new("target/.."));
        assert!(matches!(result, Err(SynthError::NoFileName(_))));
    }
}
