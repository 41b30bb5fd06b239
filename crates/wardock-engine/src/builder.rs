use std::fmt;
use std::path::{Path, PathBuf};

use wardock_build::{
    BuildContext, DirectoryLocks, DockerfileGenerator, SynthError, TemplateError, write_dockerfile,
};
use wardock_core::{ImageIdentifier, WardockConfig};

use crate::engine::{ContainerEngine, DockerCli};
use crate::error::EngineError;
use crate::settings::EngineSettings;

/// Builds and removes web application images, parameterized over the
/// engine for testability.
pub struct WebAppImageBuilder<E: ContainerEngine = DockerCli> {
    engine: E,
    generator: DockerfileGenerator,
    locks: DirectoryLocks,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltImage {
    pub identifier: ImageIdentifier,
    pub image_id: String,
    pub dockerfile: PathBuf,
}

impl WebAppImageBuilder<DockerCli> {
    /// Connects to the engine described by the process environment.
    ///
    /// Fails immediately when the connection settings are unusable (for
    /// example TLS verification without certificates) or the configured
    /// template is invalid.
    pub fn from_env(config: &WardockConfig) -> Result<Self, ImageBuilderError> {
        let settings = EngineSettings::from_env(&config.engine.binary).map_err(|e| {
            tracing::error!(error = %e, "could not create the container engine client");
            ImageBuilderError::Connect { source: e }
        })?;
        let generator = DockerfileGenerator::new(&config.image).map_err(|e| {
            tracing::error!(error = %e, "could not load the Dockerfile template");
            ImageBuilderError::Template { source: e }
        })?;

        Ok(Self::with_engine(DockerCli::new(settings), generator))
    }
}

impl<E: ContainerEngine> WebAppImageBuilder<E> {
    pub fn with_engine(engine: E, generator: DockerfileGenerator) -> Self {
        Self {
            engine,
            generator,
            locks: DirectoryLocks::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn generator(&self) -> &DockerfileGenerator {
        &self.generator
    }

    // ── Build ──

    /// Writes a Dockerfile next to `artifact` and builds its directory as
    /// `creator/name:version` (`latest` when `version` is absent or empty).
    pub async fn build_image(
        &self,
        creator: &str,
        name: &str,
        version: Option<&str>,
        artifact: &Path,
    ) -> Result<BuiltImage, ImageBuilderError> {
        let image = identifier(creator, name, version)?;
        tracing::info!(image = %image, artifact = %artifact.display(), "building image");

        match self.build_in_context(&image, artifact).await {
            Ok(built) => {
                tracing::info!(image = %image, image_id = %built.image_id, "image built");
                Ok(built)
            }
            Err(e) => {
                tracing::error!(image = %image, error = %e, "could not create the docker image");
                Err(ImageBuilderError::Build {
                    image,
                    source: e,
                })
            }
        }
    }

    async fn build_in_context(
        &self,
        image: &ImageIdentifier,
        artifact: &Path,
    ) -> Result<BuiltImage, BuildFailure> {
        if !artifact.is_file() {
            return Err(BuildFailure::MissingArtifact(artifact.to_path_buf()));
        }

        let context = BuildContext::for_artifact(artifact)?;
        let _guard = self.locks.acquire(context.dir()).await;

        let dockerfile = write_dockerfile(&context, &self.generator)?;
        let image_id = self
            .engine
            .build(context.dir(), &image.to_string())
            .await?;

        Ok(BuiltImage {
            identifier: image.clone(),
            image_id,
            dockerfile,
        })
    }

    // ── Remove ──

    /// Removes `creator/name:version` and returns the identifier removed.
    /// Never touches the filesystem.
    pub async fn remove_image(
        &self,
        creator: &str,
        name: &str,
        version: Option<&str>,
    ) -> Result<ImageIdentifier, ImageBuilderError> {
        let image = identifier(creator, name, version)?;
        tracing::info!(image = %image, "removing image");

        match self.engine.remove_image(&image.to_string()).await {
            Ok(()) => {
                tracing::info!(image = %image, "image removed");
                Ok(image)
            }
            Err(e) => {
                tracing::error!(image = %image, error = %e, "could not remove the docker image");
                Err(ImageBuilderError::Remove {
                    image,
                    source: e,
                })
            }
        }
    }

    // ── Doctor ──

    /// Run all diagnostic checks without early return.
    pub async fn doctor(&self) -> DoctorReport {
        let (client, daemon) = check_engine(&self.engine).await;
        DoctorReport {
            client,
            daemon,
            template: check_template(&self.generator),
            config_file: CheckResult::default(),
        }
    }
}

impl WebAppImageBuilder<DockerCli> {
    /// Like [`doctor`](Self::doctor), but starting from the configuration
    /// rather than a constructed builder. Settings and template problems
    /// that would make [`from_env`](Self::from_env) fail are reported as
    /// failed checks instead.
    pub async fn diagnose(config: &WardockConfig) -> DoctorReport {
        let (client, daemon) = match EngineSettings::from_env(&config.engine.binary) {
            Ok(settings) => check_engine(&DockerCli::new(settings)).await,
            Err(e) => {
                tracing::warn!(error = %e, "container engine settings are unusable");
                (CheckResult::fail(&error_chain(&e)), CheckResult::fail("skipped"))
            }
        };

        let template = match DockerfileGenerator::new(&config.image) {
            Ok(generator) => check_template(&generator),
            Err(e) => {
                tracing::warn!(error = %e, "Dockerfile template is unusable");
                CheckResult::fail(&error_chain(&e))
            }
        };

        DoctorReport {
            client,
            daemon,
            template,
            config_file: CheckResult::default(),
        }
    }
}

async fn check_engine<E: ContainerEngine>(engine: &E) -> (CheckResult, CheckResult) {
    match engine.version().await {
        Ok(version) => (
            match version.client {
                Some(c) => CheckResult::ok(&c.version),
                None => CheckResult::fail("no client version reported"),
            },
            match version.server {
                Some(s) => CheckResult::ok(&s.version),
                None => CheckResult::fail("daemon not reachable"),
            },
        ),
        Err(e @ EngineError::NotFound { .. }) => {
            (CheckResult::fail(&e.to_string()), CheckResult::fail("skipped"))
        }
        Err(e) => (CheckResult::ok("installed"), CheckResult::fail(&e.to_string())),
    }
}

fn check_template(generator: &DockerfileGenerator) -> CheckResult {
    match generator.template_path() {
        Some(path) => CheckResult::ok(&path.display().to_string()),
        None => CheckResult::ok("builtin"),
    }
}

/// `outer: inner: ...`, so nested causes show up on one report line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

fn identifier(
    creator: &str,
    name: &str,
    version: Option<&str>,
) -> Result<ImageIdentifier, ImageBuilderError> {
    let image = ImageIdentifier::new(creator, name, version)
        .map_err(|e| ImageBuilderError::Identifier { source: e })?;

    if !image.is_engine_compatible() {
        tracing::warn!(
            image = %image,
            "image identifier does not match the engine's reference format; the engine may reject it"
        );
    }

    Ok(image)
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum ImageBuilderError {
    #[error("could not create the container engine client")]
    Connect { source: EngineError },

    #[error("could not load the Dockerfile template")]
    Template { source: TemplateError },

    #[error("invalid image identifier")]
    Identifier { source: wardock_core::Error },

    #[error("could not create the docker image [image-identifier]: {image}")]
    Build {
        image: ImageIdentifier,
        source: BuildFailure,
    },

    #[error("could not remove the docker image [image-identifier]: {image}")]
    Remove {
        image: ImageIdentifier,
        source: EngineError,
    },
}

impl ImageBuilderError {
    /// The identifier the failed operation was computed for, if any.
    pub fn image(&self) -> Option<&ImageIdentifier> {
        match self {
            Self::Build { image, .. } | Self::Remove { image, .. } => Some(image),
            Self::Connect { .. } | Self::Template { .. } | Self::Identifier { .. } => None,
        }
    }
}

/// Why a build did not produce an image.
#[derive(Debug, thiserror::Error)]
pub enum BuildFailure {
    #[error("artifact not found: {0}")]
    MissingArtifact(PathBuf),

    #[error("failed to prepare the Dockerfile")]
    Dockerfile(#[from] SynthError),

    #[error("container engine build failed")]
    Engine(#[from] EngineError),
}

// ── Doctor types ──

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub client: CheckResult,
    pub daemon: CheckResult,
    pub template: CheckResult,
    pub config_file: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.client.passed && self.daemon.passed && self.template.passed && self.config_file.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, check) in [
            ("Engine CLI", &self.client),
            ("Engine daemon", &self.daemon),
            ("Dockerfile template", &self.template),
            ("Config file", &self.config_file),
        ] {
            writeln!(f, "  [{}] {label:<20} {}", check.icon(), check.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}
