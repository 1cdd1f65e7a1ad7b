//! Run configuration for the two pipelines

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "FLICKR_API_KEY";
pub const API_SECRET_VAR: &str = "FLICKR_API_SECRET";

pub const DEFAULT_DOWNLOAD_DIR: &str = "./images";
pub const DEFAULT_DOWNLOAD_COUNT: usize = 10;
pub const DEFAULT_EXPORT_DIR: &str = "moon64";
pub const DEFAULT_SQUARE_SIZE: u32 = 64;

/// Flickr API credentials
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    /// Read both credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both credentials through `lookup`; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(Error::MissingCredential(name))
        };

        Ok(Self {
            api_key: read(API_KEY_VAR)?,
            api_secret: read(API_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = |value: &str| if value.is_empty() { "" } else { "***" };
        f.debug_struct("Credentials")
            .field("api_key", &hidden(&self.api_key))
            .field("api_secret", &hidden(&self.api_secret))
            .finish()
    }
}

/// Settings for `download`
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub search: String,
    pub count: usize,
    pub output_dir: PathBuf,
}

/// Settings for `export`
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub pattern: String,
    pub output_dir: PathBuf,
    pub size: u32,
}
