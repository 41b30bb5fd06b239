use std::path::{Path, PathBuf};

use wardock_core::WardockConfig;
use wardock_engine::WebAppImageBuilder;

/// Generate the Dockerfile next to the artifact and build the image.
pub async fn build(
    creator: &str,
    name: &str,
    version: Option<&str>,
    artifact: &Path,
) -> anyhow::Result<()> {
    let config = WardockConfig::load(&PathBuf::from("."))?;
    let builder = WebAppImageBuilder::from_env(&config)?;

    println!("Building {creator}/{name} from {}...", artifact.display());
    let built = builder
        .build_image(creator, name, version, artifact)
        .await?;

    println!("Dockerfile: {}", built.dockerfile.display());
    println!();
    println!("Built {} ({})", built.identifier, built.image_id);

    Ok(())
}
