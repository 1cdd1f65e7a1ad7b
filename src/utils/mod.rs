//! Utility modules for moon-data
//!
//! - `files`: output directories and saved-file lookups
//! - `http`: HTTP client and image fetching
//! - `images`: square cropping, resizing and saving
//! - `names`: filesystem-safe names from URIs

pub mod files;
pub mod http;
pub mod images;
pub mod names;
#[cfg(test)]
pub(crate) mod test_support;
