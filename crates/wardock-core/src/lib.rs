//! Core types and configuration for wardock.
//!
//! This crate defines the `wardock.toml` schema ([`WardockConfig`]),
//! container image identifiers ([`ImageIdentifier`]), and shared error types.

pub mod config;
pub mod error;
pub mod image;

pub use config::{CONFIG_FILE_NAME, EngineConfig, ImageConfig, WardockConfig};
pub use error::{Error, Result};
pub use image::{DEFAULT_VERSION, ImageIdentifier};
