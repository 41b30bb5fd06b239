use std::path::Path;

use wardock_core::{CONFIG_FILE_NAME, WardockConfig};
use wardock_engine::{CheckResult, WebAppImageBuilder};

pub async fn doctor() -> anyhow::Result<()> {
    // A broken wardock.toml is reported below; the remaining checks run on defaults.
    let (config, config_file) = match WardockConfig::load(Path::new(".")) {
        Ok(config) if Path::new(CONFIG_FILE_NAME).exists() => (config, CheckResult::ok("Found")),
        Ok(config) => (
            config,
            CheckResult::fail("Not found (defaults in use; run `wardock init`)"),
        ),
        Err(e) => {
            let detail = format!("{:#}", anyhow::Error::new(e));
            tracing::warn!(error = %detail, "using default configuration");
            (WardockConfig::default(), CheckResult::fail(&detail))
        }
    };

    let mut report = WebAppImageBuilder::diagnose(&config).await;
    report.config_file = config_file;

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed, see above for details");
    }

    Ok(())
}
