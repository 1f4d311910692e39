//! Command line entry point for the asset pipeline.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use hangar_pipeline::{CompressConfig, compress_all, headers};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Prepare ship models and deployment files for the hangar viewer.
#[derive(Parser, Debug)]
#[command(name = "hangar-pipeline", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress every catalog model with Draco.
    Compress {
        /// Directory containing the source models.
        #[arg(long, default_value = "models")]
        sources_dir: PathBuf,

        /// Viewer asset directory; models are written to its `models` folder.
        #[arg(long, default_value = "client/hangar-viewer/assets")]
        assets_dir: PathBuf,

        /// Compressor command, split on whitespace.
        #[arg(long, default_value = "npx gltf-pipeline")]
        tool: String,

        /// Also write a JSON report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Write the `_headers` file that allows the viewer to be embedded.
    Headers {
        /// Where to write the file.
        #[arg(long, default_value = "dist/_headers")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> hangar_pipeline::Result<()> {
    match cli.command {
        Command::Compress {
            sources_dir,
            assets_dir,
            tool,
            report,
        } => {
            let mut config = CompressConfig::new(sources_dir, assets_dir);
            config.tool = tool.split_whitespace().map(ToString::to_string).collect();

            tracing::info!(
                "Compressing models from {} into {}",
                config.sources_dir.display(),
                config.output_dir.display()
            );
            let summary = compress_all(&config)?;
            println!("{summary}");

            if let Some(path) = report {
                std::fs::write(&path, summary.to_json()?)
                    .map_err(|e| hangar_pipeline::Error::Io {
                        operation: "write",
                        path: path.clone(),
                        source: e,
                    })?;
                tracing::info!("Wrote report to {}", path.display());
            }
        }
        Command::Headers { out } => {
            headers::write_headers_file(&out)?;
            tracing::info!("Wrote embed headers to {}", out.display());
        }
    }
    Ok(())
}
