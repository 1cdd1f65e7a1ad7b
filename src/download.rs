//! Search-and-download driver

use crate::batch::{BatchSummary, Outcome};
use crate::config::DownloadConfig;
use crate::error::{Error, Result};
use crate::flickr::{self, Photo, PhotoSource, SearchQuery};
use crate::utils::files::{ensure_output_dir, find_existing, write_download};
use crate::utils::http::ImageFetcher;
use crate::utils::names::sanitize_name;
use futures::StreamExt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Download up to `config.count` search results into `config.output_dir`.
///
/// Only a failure to create the output directory is returned as an error;
/// everything that goes wrong with a single result is recorded in the
/// summary and the loop moves on.
pub async fn download_images<S, F>(
    source: &S,
    fetcher: &F,
    config: &DownloadConfig,
) -> Result<BatchSummary>
where
    S: PhotoSource + ?Sized,
    F: ImageFetcher + ?Sized,
{
    ensure_output_dir(&config.output_dir)?;

    let query = SearchQuery::relevance(config.search.clone());
    let total = config.count;
    let mut summary = BatchSummary::new();

    info!(search = %config.search, count = total, "searching");

    let results = flickr::photos(source, &query).take(total).enumerate();
    futures::pin_mut!(results);

    while let Some((index, result)) = results.next().await {
        let (label, outcome) = match result {
            Ok(photo) => process_photo(&photo, fetcher, &config.output_dir).await,
            Err(e) => (String::from("<search page>"), Outcome::Failed(e)),
        };

        match &outcome {
            Outcome::Done(path) => {
                info!("{}/{} {} -> {}", index, total, label, path.display())
            }
            Outcome::Skipped(path) => info!(
                "{}/{} {} (file already downloaded as {})",
                index,
                total,
                label,
                path.display()
            ),
            Outcome::Failed(e) => warn!("{}/{} error: {} ({})", index, total, e, label),
        }
        summary.record(index, label, outcome);
    }

    Ok(summary)
}

/// Resolve, dedupe and fetch a single result. Returns the label (URL when it
/// could be resolved) with the outcome.
async fn process_photo<F>(photo: &Photo, fetcher: &F, output_dir: &Path) -> (String, Outcome)
where
    F: ImageFetcher + ?Sized,
{
    debug!(
        id = photo.id.as_deref().unwrap_or_default(),
        title = photo.title.as_deref().unwrap_or_default(),
        "resolving photo"
    );
    let url = match photo.image_url() {
        Ok(url) => url,
        Err(e) => {
            let label = photo.id.clone().unwrap_or_else(|| "<unknown photo>".into());
            return (label, Outcome::Failed(e));
        }
    };

    let outcome = match fetch_into(&url, fetcher, output_dir).await {
        Ok(outcome) => outcome,
        Err(e) => Outcome::Failed(e),
    };
    (url, outcome)
}

async fn fetch_into<F>(url: &str, fetcher: &F, output_dir: &Path) -> Result<Outcome>
where
    F: ImageFetcher + ?Sized,
{
    let name = sanitize_name(url);
    if name.is_empty() {
        return Err(Error::InvalidName(url.to_string()));
    }

    if let Some(existing) = find_existing(output_dir, &name) {
        return Ok(Outcome::Skipped(existing));
    }

    let bytes = fetcher.fetch(url).await?;
    let path = write_download(output_dir, &name, &bytes)?;
    Ok(Outcome::Done(path))
}
