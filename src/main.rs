use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod batch;
mod config;
mod download;
mod error;
mod export;
mod flickr;
mod logging;
mod utils;

use config::{Credentials, DownloadConfig, ExportConfig};

/// Build small square-image datasets from Flickr searches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download images matching a search term
    Download {
        /// The search term
        search: String,

        /// The output folder
        #[arg(long = "output_folder", default_value = config::DEFAULT_DOWNLOAD_DIR)]
        output_folder: PathBuf,

        /// The number of images
        #[arg(long = "n", default_value_t = config::DEFAULT_DOWNLOAD_COUNT)]
        n: usize,
    },
    /// Crop and resize images into fixed-size squares
    Export {
        /// Input glob pattern
        pattern: String,

        /// Output folder
        #[arg(long = "output_folder", default_value = config::DEFAULT_EXPORT_DIR)]
        output_folder: PathBuf,

        /// Square size in pixels
        #[arg(long, default_value_t = config::DEFAULT_SQUARE_SIZE,
              value_parser = clap::value_parser!(u32).range(1..))]
        size: u32,
    },
}

async fn run(command: Commands) -> error::Result<()> {
    match command {
        Commands::Download {
            search,
            output_folder,
            n,
        } => {
            let credentials = Credentials::from_env()?;
            let client = utils::http::build_client()?;
            let source = flickr::FlickrClient::new(client.clone(), credentials);
            let fetcher = utils::http::HttpFetcher::new(client);
            let config = DownloadConfig {
                search,
                count: n,
                output_dir: output_folder,
            };

            let summary = download::download_images(&source, &fetcher, &config).await?;
            summary.print("Download");
            println!("Done.");
        }
        Commands::Export {
            pattern,
            output_folder,
            size,
        } => {
            let config = ExportConfig {
                pattern,
                output_dir: output_folder,
                size,
            };

            let summary = export::export_squares(&config)?;
            summary.print("Export");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args.command).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
