mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wardock",
    about = "Build Tomcat container images from web application archives"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default wardock.toml
    Init,
    /// Generate a Dockerfile next to the artifact and build the image
    Build {
        #[command(flatten)]
        image: ImageArgs,
        /// Web application archive to deploy (e.g. target/shop.war)
        artifact: PathBuf,
    },
    /// Remove a previously built image
    Remove {
        #[command(flatten)]
        image: ImageArgs,
    },
    /// Generate the Dockerfile without building
    Dockerfile {
        /// Web application archive to deploy
        artifact: PathBuf,
        /// Print to stdout instead of writing next to the artifact
        #[arg(long)]
        stdout: bool,
    },
    /// Check container engine setup
    Doctor,
}

#[derive(Args)]
struct ImageArgs {
    /// Image creator (repository namespace)
    #[arg(long, short = 'c')]
    creator: String,
    /// Image name
    #[arg(long, short = 'n')]
    name: String,
    /// Image version (default: latest)
    #[arg(long = "version", short = 't', value_name = "VERSION")]
    version: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Engine connection settings may come from .env
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => tracing::debug!("no .env file"),
        Err(e) => return Err(e.into()),
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init().await?,
        Commands::Build { image, artifact } => {
            commands::build(
                &image.creator,
                &image.name,
                image.version.as_deref(),
                &artifact,
            )
            .await?
        }
        Commands::Remove { image } => {
            commands::remove(&image.creator, &image.name, image.version.as_deref()).await?
        }
        Commands::Dockerfile { artifact, stdout } => commands::dockerfile(&artifact, stdout).await?,
        Commands::Doctor => commands::doctor().await?,
    }

    Ok(())
}
