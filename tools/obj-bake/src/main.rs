//! obj-bake - OBJ to static C/C++ array converter
//!
//! Scans a directory for `*.obj` files and writes, per mesh, a `.h` with
//! `extern` declarations and a `.cpp` with the initialized vertex buffer,
//! stride and element arrays.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use obj_bake::{bake_all, check_all, Settings, ShadingPolicy};

#[derive(Parser)]
#[command(name = "obj-bake")]
#[command(about = "Bake OBJ meshes into static C/C++ vertex arrays")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every .obj file in the search path
    Build {
        #[command(flatten)]
        common: CommonArgs,

        /// Directory to put the output .cpp files in
        #[arg(short = 'c', long = "cpp-output-path")]
        cpp_output_path: Option<PathBuf>,

        /// Directory to put the output .h files in
        #[arg(short = 'i', long = "header-output-path")]
        header_output_path: Option<PathBuf>,
    },

    /// Parse every .obj file without writing anything
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Directory to search for .obj files
    #[arg(short, long = "search-path")]
    search_path: Option<PathBuf>,

    /// Use the first normal of each vertex as a single ambient term
    /// instead of averaging all of its normals
    #[arg(short = 'z', long = "simple-shading")]
    simple_shading: bool,

    /// Continue with the remaining files after a failure
    #[arg(long)]
    keep_going: bool,

    /// Config file (default: ./obj-bake.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl CommonArgs {
    /// Flags only override the config file when actually given
    fn settings(&self) -> Settings {
        Settings {
            search_path: self.search_path.clone(),
            shading: self.simple_shading.then_some(ShadingPolicy::Simple),
            keep_going: self.keep_going.then_some(true),
            ..Default::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            common,
            cpp_output_path,
            header_output_path,
        } => {
            let flags = Settings {
                source_output_path: cpp_output_path,
                header_output_path,
                ..common.settings()
            };
            let config = Settings::discover(common.config.as_deref())?
                .merge(flags)
                .into_bake_config()?;

            tracing::info!(
                "Baking {:?} ({:?} shading)",
                config.search_path,
                config.shading
            );
            let report = bake_all(&config)?;
            finish(report.converted.len(), report.failed.len())?;
        }

        Commands::Check { common } => {
            let settings = Settings::discover(common.config.as_deref())?.merge(common.settings());
            let search_path = settings.require_search_path()?;

            tracing::info!("Checking {:?}", search_path);
            let report = check_all(search_path, settings.shading(), settings.keep_going())?;
            finish(report.converted.len(), report.failed.len())?;
        }
    }

    Ok(())
}

fn finish(converted: usize, failed: usize) -> Result<()> {
    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, converted + failed);
    }
    tracing::info!("Done! {} files", converted);
    Ok(())
}
