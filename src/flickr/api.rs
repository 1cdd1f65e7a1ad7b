use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::flickr::{PhotoPage, PhotoSource, SearchQuery};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Envelope around every REST response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    stat: String,
    #[serde(default)]
    photos: Option<PhotoPage>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

impl SearchResponse {
    fn into_page(self) -> Result<PhotoPage> {
        if self.stat != "ok" {
            return Err(Error::Api {
                code: self.code.unwrap_or(-1),
                message: self.message.unwrap_or_else(|| format!("stat={}", self.stat)),
            });
        }
        self.photos.ok_or(Error::MissingField("photos"))
    }
}

pub struct FlickrApi;

impl FlickrApi {
    fn get_api_url() -> &'static str {
        "https://api.flickr.com/services/rest/"
    }

    fn get_search_method() -> &'static str {
        "flickr.photos.search"
    }
}

/// Flickr REST client for `flickr.photos.search`
pub struct FlickrClient {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl FlickrClient {
    pub fn new(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            base_url: FlickrApi::get_api_url().to_string(),
        }
    }

    /// Point the client at a local stand-in for the REST endpoint
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn search_params(&self, query: &SearchQuery, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("method", FlickrApi::get_search_method().to_string()),
            ("api_key", self.credentials.api_key.clone()),
            ("text", query.text.clone()),
            ("extras", "url_o".to_string()),
            ("per_page", query.per_page.to_string()),
            ("sort", query.sort.to_string()),
            ("page", page.to_string()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
        ]
    }
}

#[async_trait]
impl PhotoSource for FlickrClient {
    async fn search_page(&self, query: &SearchQuery, page: u32) -> Result<PhotoPage> {
        debug!(text = %query.text, page, "requesting search page");

        let response_text = self
            .client
            .get(&self.base_url)
            .query(&self.search_params(query, page))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: SearchResponse = serde_json::from_str(&response_text)?;
        let result = response.into_page()?;
        debug!(
            page = result.page,
            pages = result.pages,
            perpage = result.perpage,
            count = result.photo.len(),
            "received search page"
        );
        Ok(result)
    }
}
