//! Batch square export driver

use crate::batch::{BatchSummary, Outcome};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::utils::files::{basename, ensure_output_dir};
use crate::utils::images::{resize_and_crop_square, save_rgb};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Crop and resize every file matching `config.pattern` into
/// `config.output_dir`, keeping original file names.
///
/// An invalid pattern or an uncreatable output folder aborts the run;
/// per-file failures are recorded and skipped.
pub fn export_squares(config: &ExportConfig) -> Result<BatchSummary> {
    ensure_output_dir(&config.output_dir)?;

    let matches: Vec<_> = glob::glob(&config.pattern)?.collect();
    info!(pattern = %config.pattern, files = matches.len(), "exporting squares");

    let pb = ProgressBar::new(matches.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let mut summary = BatchSummary::new();
    for (index, entry) in matches.into_iter().enumerate() {
        let (label, outcome) = match entry {
            Ok(path) => {
                let label = path.display().to_string();
                match export_one(&path, &config.output_dir, config.size) {
                    Ok(target) => (label, Outcome::Done(target)),
                    Err(e) => (label, Outcome::Failed(e)),
                }
            }
            Err(e) => (e.path().display().to_string(), Outcome::Failed(e.into())),
        };

        if let Outcome::Failed(e) = &outcome {
            pb.suspend(|| warn!(file = %label, "{}", e));
        }
        summary.record(index, label, outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Export complete!");
    Ok(summary)
}

/// Open, square, and save one file. Returns the written path.
pub fn export_one(source: &Path, output_dir: &Path, size: u32) -> Result<PathBuf> {
    let target = output_dir.join(basename(source)?);
    let img = image::open(source)?;
    let square = resize_and_crop_square(img, size)?;
    save_rgb(&square, &target)?;
    Ok(target)
}
