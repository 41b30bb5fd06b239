//! Build Tomcat container images from web application archives.
//!
//! This is the unified facade crate that re-exports all wardock sub-crates.
//! Use feature flags to control which components are included.
//!
//! # Feature flags
//!
//! | Feature | Default | Crate | Description |
//! |---------|---------|-------|-------------|
//! | `core` | yes | [`wardock-core`](https://crates.io/crates/wardock-core) | Configuration and image identifiers |
//! | `build` | yes | [`wardock-build`](https://crates.io/crates/wardock-build) | Dockerfile synthesis |
//! | `engine` | yes | [`wardock-engine`](https://crates.io/crates/wardock-engine) | Container engine build / remove |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wardock::WardockConfig;
//! use wardock::engine::WebAppImageBuilder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WardockConfig::load(Path::new("."))?;
//! let builder = WebAppImageBuilder::from_env(&config)?;
//!
//! let built = builder
//!     .build_image("wso2", "shop", Some("1.0.0"), Path::new("target/shop.war"))
//!     .await?;
//! println!("built {}", built.identifier);
//!
//! builder.remove_image("wso2", "shop", Some("1.0.0")).await?;
//! # Ok(())
//! # }
//! ```

// Core types flattened into root namespace for convenience.
#[cfg(feature = "core")]
pub use wardock_core::*;

/// Dockerfile templates, synthesis, and per-directory locking.
///
/// See [`wardock-build`](https://crates.io/crates/wardock-build) for details.
#[cfg(feature = "build")]
pub mod build {
    pub use wardock_build::*;
}

/// Container engine abstraction and the image builder facade.
///
/// See [`wardock-engine`](https://crates.io/crates/wardock-engine) for details.
#[cfg(feature = "engine")]
pub mod engine {
    pub use wardock_engine::*;
}
