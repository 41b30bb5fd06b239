use std::path::PathBuf;

use wardock_core::WardockConfig;
use wardock_engine::WebAppImageBuilder;

pub async fn remove(creator: &str, name: &str, version: Option<&str>) -> anyhow::Result<()> {
    let config = WardockConfig::load(&PathBuf::from("."))?;
    let builder = WebAppImageBuilder::from_env(&config)?;

    let removed = builder.remove_image(creator, name, version).await?;

    println!("Removed {removed}");
    Ok(())
}
