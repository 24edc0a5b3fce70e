use serde::Deserialize;

use super::http::describe_error;
use super::{ProviderClient, first_present, title_or_query, upstream_id};
use crate::error::SearchError;
use crate::models::{MediaResult, Provider};

/// Tenor v1 搜索接口
pub struct TenorClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TenorResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    results: Vec<TenorItem>,
}

#[derive(Debug, Deserialize)]
struct TenorItem {
    #[serde(default)]
    id: serde_json::Value,
    title: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    media: Vec<TenorMedia>,
}

#[derive(Debug, Default, Deserialize)]
struct TenorMedia {
    mp4: Option<TenorVariant>,
    gif: Option<TenorVariant>,
    tinygif: Option<TenorVariant>,
    nanomp4: Option<TenorVariant>,
    smallgif: Option<TenorVariant>,
}

#[derive(Debug, Deserialize)]
struct TenorVariant {
    url: Option<String>,
}

fn variant_url(variant: &Option<TenorVariant>) -> Option<&str> {
    variant.as_ref().and_then(|v| v.url.as_deref())
}

impl TenorClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// 取 media 的第一组：url 优先 mp4，其次 gif、tinygif；预览优先 nanomp4，其次 smallgif、gif
pub(crate) fn map_results(response: TenorResponse, query: &str) -> Vec<MediaResult> {
    let empty = TenorMedia::default();
    response
        .results
        .into_iter()
        .filter_map(|item| {
            let id = upstream_id(&item.id)?;
            let media = item.media.first().unwrap_or(&empty);
            Some(MediaResult::new(
                Provider::Tenor,
                &id,
                title_or_query(item.title.as_deref(), query),
                first_present([
                    variant_url(&media.mp4),
                    variant_url(&media.gif),
                    variant_url(&media.tinygif),
                ]),
                first_present([
                    variant_url(&media.nanomp4),
                    variant_url(&media.smallgif),
                    variant_url(&media.gif),
                ]),
            ))
        })
        .collect()
}

impl ProviderClient for TenorClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<MediaResult>, SearchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("Tenor API key not configured, skipping");
            return Ok(Vec::new());
        };

        let url = format!("{}/v1/search", self.base_url);
        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[("q", query), ("key", api_key), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| describe_error("Tenor", e))?;

        if !response.status().is_success() {
            return Err(SearchError::UpstreamFailure(format!(
                "Tenor API error: {}",
                response.status().as_u16()
            )));
        }

        let body: TenorResponse = response.json().await.map_err(|e| describe_error("Tenor", e))?;
        Ok(map_results(body, query))
    }

    fn provider(&self) -> Provider {
        Provider::Tenor
    }
}
