use std::path::{Path, PathBuf};

use wardock_build::{BuildContext, DockerfileGenerator, write_dockerfile};
use wardock_core::WardockConfig;

/// Generate the Dockerfile without contacting the container engine.
pub async fn dockerfile(artifact: &Path, to_stdout: bool) -> anyhow::Result<()> {
    let config = WardockConfig::load(&PathBuf::from("."))?;
    let generator = DockerfileGenerator::new(&config.image)?;
    let context = BuildContext::for_artifact(artifact)?;

    if to_stdout {
        print!("{}", generator.render(context.artifact_name()));
        return Ok(());
    }

    let path = write_dockerfile(&context, &generator)?;
    println!("Wrote {}", path.display());
    Ok(())
}
