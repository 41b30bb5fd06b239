use std::path::Path;

use wardock_core::{CONFIG_FILE_NAME, WardockConfig};

/// Write a wardock.toml with the default settings.
pub async fn init() -> anyhow::Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() {
        anyhow::bail!("{CONFIG_FILE_NAME} already exists; edit it directly or delete it to re-init");
    }

    let content = WardockConfig::default().to_toml_string()?;
    std::fs::write(path, content)?;

    println!("Created {CONFIG_FILE_NAME}");
    println!();
    println!("Next steps:");
    println!();
    println!("  1. Check the engine:");
    println!("     wardock doctor");
    println!();
    println!("  2. Build an image:");
    println!("     wardock build --creator <you> --name <app> target/<app>.war");

    Ok(())
}
