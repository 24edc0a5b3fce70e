use serde::Deserialize;

use super::http::describe_error;
use super::{ProviderClient, first_present, title_or_query, upstream_id};
use crate::error::SearchError;
use crate::models::{MediaResult, Provider};

/// Giphy v1 搜索接口
pub struct GiphyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    rating: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GiphyResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    data: Vec<GiphyItem>,
}

#[derive(Debug, Deserialize)]
struct GiphyItem {
    #[serde(default)]
    id: serde_json::Value,
    title: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    images: GiphyImages,
}

#[derive(Debug, Default, Deserialize)]
struct GiphyImages {
    original: Option<GiphyImage>,
    fixed_width_small: Option<GiphyImage>,
    preview_gif: Option<GiphyImage>,
}

#[derive(Debug, Deserialize)]
struct GiphyImage {
    url: Option<String>,
    mp4: Option<String>,
}

fn image_url(image: &Option<GiphyImage>) -> Option<&str> {
    image.as_ref().and_then(|i| i.url.as_deref())
}

impl GiphyClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            rating: rating.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// url 优先原图 mp4，其次原图 gif；预览依次取 fixed_width_small、preview_gif、原图
pub(crate) fn map_results(response: GiphyResponse, query: &str) -> Vec<MediaResult> {
    response
        .data
        .into_iter()
        .filter_map(|item| {
            let id = upstream_id(&item.id)?;
            let images = &item.images;
            let original_mp4 = images.original.as_ref().and_then(|i| i.mp4.as_deref());
            Some(MediaResult::new(
                Provider::Giphy,
                &id,
                title_or_query(item.title.as_deref(), query),
                first_present([original_mp4, image_url(&images.original)]),
                first_present([
                    image_url(&images.fixed_width_small),
                    image_url(&images.preview_gif),
                    image_url(&images.original),
                ]),
            ))
        })
        .collect()
}

impl ProviderClient for GiphyClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<MediaResult>, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("Giphy API key not configured, skipping");
            return Ok(Vec::new());
        };

        let url = format!("{}/v1/gifs/search", self.base_url);
        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", api_key),
                ("q", query),
                ("limit", limit.as_str()),
                ("rating", self.rating.as_str()),
            ])
            .send()
            .await
            .map_err(|e| describe_error("Giphy", e))?;

        if !response.status().is_success() {
            return Err(SearchError::UpstreamFailure(format!(
                "Giphy API error: {}",
                response.status().as_u16()
            )));
        }

        let body: GiphyResponse = response.json().await.map_err(|e| describe_error("Giphy", e))?;
        Ok(map_results(body, query))
    }

    fn provider(&self) -> Provider {
        Provider::Giphy
    }
}
