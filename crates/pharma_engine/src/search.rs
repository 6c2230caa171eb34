use std::time::{Duration, Instant};

use engine_logging::{engine_info, engine_warn};
use futures_util::StreamExt;
use url::Url;

use crate::payload::parse_products;
use crate::{FailureKind, FetchError, ProductRecord};

const SEARCH_PATH: &str = "buscar_productos";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound on the whole request, body included.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Runs one search. Blank keywords fail with [`FailureKind::EmptyKeyword`] without
    /// touching the network.
    async fn search(&self, keyword: &str) -> Result<Vec<ProductRecord>, FetchError>;
}

/// `{base_url}/buscar_productos?keyword={keyword}` with the keyword URL-encoded.
pub fn build_search_url(base_url: &str, keyword: &str) -> Result<Url, FetchError> {
    let base = format!("{}/{}", base_url.trim_end_matches('/'), SEARCH_PATH);
    let mut url =
        Url::parse(&base).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut().append_pair("keyword", keyword);
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestSearchClient {
    pub fn new(settings: SearchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn execute(&self, url: Url) -> Result<Vec<ProductRecord>, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        Ok(parse_products(&body))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(&self, keyword: &str) -> Result<Vec<ProductRecord>, FetchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(FetchError::new(FailureKind::EmptyKeyword, "keyword is empty"));
        }
        let url = build_search_url(&self.settings.base_url, keyword)?;
        engine_info!("Searching keyword_len={} url={}", keyword.len(), url);

        let started = Instant::now();
        let result = self.execute(url).await;

        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(records) => engine_info!(
                "Search finished products={} elapsed_ms={}",
                records.len(),
                elapsed_ms
            ),
            Err(err) => engine_warn!("Search failed after {} ms: {}", elapsed_ms, err),
        }
        result
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    // A connect timeout means the endpoint never answered, not that the budget ran out.
    if err.is_connect() {
        return FetchError::new(FailureKind::Network, err.to_string());
    }
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
