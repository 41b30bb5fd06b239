//! Dockerfile synthesis for web application archives.
//!
//! # Build preparation
//!
//! ```text
//! wardock build target/shop.war
//!   1. Context    ── BuildContext::for_artifact() → target/
//!   2. Lock       ── DirectoryLocks::acquire(target/)
//!   3. Dockerfile ── DockerfileGenerator::render("shop.war") → target/Dockerfile
//!   4. Engine     ── docker build --tag <creator/name:version> target/
//! ```
//!
//! # Templates
//!
//! The builtin template deploys the archive into Apache Tomcat:
//!
//! ```text
//! FROM tomcat
//! MAINTAINER user
//! {{ADD_DIRECTIVE}}
//! CMD ["catalina.sh","run"]
//! ```
//!
//! A custom template (`[image] template = "..."`) may be any Dockerfile
//! with the `{{ADD_DIRECTIVE}}` slot on a line of its own, exactly once.

pub mod context;
pub mod dockerfile;
pub mod lock;

pub use context::{BuildContext, DOCKERFILE_NAME, SynthError, write_dockerfile};
pub use dockerfile::{ADD_DIRECTIVE_SLOT, DockerfileGenerator, DockerfileTemplate, TemplateError};
pub use lock::{DirectoryGuard, DirectoryLocks};
