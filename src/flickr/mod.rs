//! Photo search against Flickr
//!
//! [`PhotoSource`] is one page of search results; [`photos`] chains pages
//! into a flat stream of [`Photo`]s.

use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;

pub mod api;

pub use api::FlickrClient;

/// Results requested per page
pub const PER_PAGE: u32 = 500;

/// Size suffix used when synthesizing a static URL (`b` = large, 1024px)
pub const SIZE_SUFFIX: &str = "b";

/// Search parameters sent with every page request
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    pub per_page: u32,
    pub sort: &'static str,
}

impl SearchQuery {
    /// Relevance-sorted search for `text`
    pub fn relevance(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            per_page: PER_PAGE,
            sort: "relevance",
        }
    }
}

/// Deserialize Flickr identifiers that may come back as numbers or strings
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// One search hit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Photo {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub server: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub farm: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Original-size URL, present when `extras=url_o` is granted
    #[serde(default)]
    pub url_o: Option<String>,
}

impl Photo {
    /// Direct image URL: `url_o` when supplied, otherwise the static-farm URL
    pub fn image_url(&self) -> Result<String> {
        if let Some(url) = self.url_o.as_deref().filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }

        let field = |value: &Option<String>, name: &'static str| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .ok_or(Error::MissingField(name))
        };

        Ok(format!(
            "https://farm{}.staticflickr.com/{}/{}_{}_{}.jpg",
            field(&self.farm, "farm")?,
            field(&self.server, "server")?,
            field(&self.id, "id")?,
            field(&self.secret, "secret")?,
            SIZE_SUFFIX
        ))
    }
}

/// One page of results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoPage {
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub perpage: u32,
    #[serde(default)]
    pub photo: Vec<Photo>,
}

impl PhotoPage {
    fn is_last(&self) -> bool {
        self.photo.is_empty() || self.page >= self.pages
    }
}

/// Anything that can answer paged photo searches
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch page `page` (1-based) of results for `query`
    async fn search_page(&self, query: &SearchQuery, page: u32) -> Result<PhotoPage>;
}

/// Walk every page of `query`, yielding photos in result order.
///
/// The stream ends after the last page, at the first empty page, or right
/// after yielding the error of a failed page request.
pub fn photos<'a, S>(source: &'a S, query: &'a SearchQuery) -> impl Stream<Item = Result<Photo>> + 'a
where
    S: PhotoSource + ?Sized,
{
    stream::unfold(Some(1u32), move |next| async move {
        let page = next?;
        match source.search_page(query, page).await {
            Ok(result) => {
                let following = if result.is_last() { None } else { Some(page + 1) };
                let items: Vec<Result<Photo>> = result.photo.into_iter().map(Ok).collect();
                Some((items, following))
            }
            Err(e) => Some((vec![Err(e)], None)),
        }
    })
    .flat_map(stream::iter)
}
