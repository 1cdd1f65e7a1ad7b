use crate::error::{Error, Result};
use crate::utils::names::has_extension;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Create the output directory (and parents) if it is missing
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "created output directory");
    }
    Ok(())
}

/// Look for a previously saved copy of `name` inside `dir`.
///
/// Names without an extension get one appended after download, so for those
/// any `<name>.<ext>` file counts as a match.
pub fn find_existing(dir: &Path, name: &str) -> Option<PathBuf> {
    let exact = dir.join(name);
    if exact.is_file() {
        return Some(exact);
    }
    if has_extension(name) {
        return None;
    }

    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path.extension().is_some()
                && path.file_stem().and_then(|stem| stem.to_str()) == Some(name)
        })
}

/// Write downloaded bytes to `dir/name`, appending the detected image
/// extension when `name` has none.
pub fn write_download(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    if name.is_empty() {
        return Err(Error::InvalidName(name.to_string()));
    }

    let file_name = if has_extension(name) {
        name.to_string()
    } else {
        let format =
            image::guess_format(bytes).map_err(|_| Error::UnknownFormat(name.to_string()))?;
        let ext = format
            .extensions_str()
            .first()
            .ok_or_else(|| Error::UnknownFormat(name.to_string()))?;
        format!("{}.{}", name, ext)
    };

    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// File name component of `path`, used to mirror inputs into the output folder
pub fn basename(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name()
        .ok_or_else(|| Error::InvalidName(path.display().to_string()))
}
