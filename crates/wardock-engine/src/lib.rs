pub mod builder;
pub mod engine;
pub mod error;
pub mod settings;

pub use builder::{
    BuildFailure, BuiltImage, CheckResult, DoctorReport, ImageBuilderError, WebAppImageBuilder,
};
pub use engine::{ComponentVersion, ContainerEngine, DockerCli, EngineVersion};
pub use error::EngineError;
pub use settings::{EngineSettings, TlsSettings};
