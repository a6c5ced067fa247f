//! PRIOR testnet HTTP API: wallet auth, faucet claims and swaps.

pub mod models;

use crate::config::PriorConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

pub use models::{
    AddressRequest, AuthResult, ErrorBody, FaucetClaim, SwapRequest, SwapResult, SwapTransaction,
    UserStats,
};

const AUTH_PATH: &str = "/auth";
const FAUCET_PATH: &str = "/faucet/claim";
const SWAP_PATH: &str = "/swap";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";
const SEC_CH_UA: &str = "\"Google Chrome\";v=\"135\", \"Not-A.Brand\";v=\"8\", \"Chromium\";v=\"135\"";

#[async_trait]
pub trait PriorApi: Send + Sync {
    async fn authenticate(&self, address: &str) -> Result<AuthResult, ApiError>;

    /// `Ok(FaucetClaim::Cooldown)` when the service refuses because of the
    /// 24 hour limit; any other refusal is an error.
    async fn claim_faucet(&self, address: &str) -> Result<FaucetClaim, ApiError>;

    /// HTTP 429 comes back as [`ApiError::RateLimited`]; retrying is the
    /// caller's decision.
    async fn submit_swap(&self, request: &SwapRequest) -> Result<SwapResult, ApiError>;
}

pub struct HttpApiClient {
    http_client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &PriorConfig) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .default_headers(browser_headers(&config.site_origin)?)
            .timeout(config.http_timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Request {
                endpoint: config.api_base_url.clone(),
                source: e,
            })?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POSTs `body` and returns the status plus raw body text.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(StatusCode, String), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request {
                endpoint: path.to_string(),
                source: e,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Request {
            endpoint: path.to_string(),
            source: e,
        })?;

        Ok((status, text))
    }
}

#[async_trait]
impl PriorApi for HttpApiClient {
    async fn authenticate(&self, address: &str) -> Result<AuthResult, ApiError> {
        let (status, body) = self
            .post(AUTH_PATH, &AddressRequest { address: address.to_string() })
            .await?;

        if !status.is_success() {
            return Err(error_for_status(AUTH_PATH, status, &body));
        }
        // Only the status matters here, keep a loose parse
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn claim_faucet(&self, address: &str) -> Result<FaucetClaim, ApiError> {
        let (status, body) = self
            .post(FAUCET_PATH, &AddressRequest { address: address.to_string() })
            .await?;
        faucet_outcome(status, &body)
    }

    async fn submit_swap(&self, request: &SwapRequest) -> Result<SwapResult, ApiError> {
        let (status, body) = self.post(SWAP_PATH, request).await?;

        if !status.is_success() {
            return Err(error_for_status(SWAP_PATH, status, &body));
        }
        decode(SWAP_PATH, &body)
    }
}

/// Header profile of the browser the web app expects.
pub fn browser_headers(site_origin: &str) -> Result<HeaderMap, ApiError> {
    let origin = site_origin.trim_end_matches('/');
    let invalid = |e: reqwest::header::InvalidHeaderValue| ApiError::Decode {
        endpoint: origin.to_string(),
        reason: format!("invalid header value: {}", e),
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(ORIGIN, HeaderValue::from_str(origin).map_err(invalid)?);
    headers.insert("priority", HeaderValue::from_static("u=1, i"));
    headers.insert(
        REFERER,
        HeaderValue::from_str(&format!("{}/", origin)).map_err(invalid)?,
    );
    headers.insert("sec-ch-ua", HeaderValue::from_static(SEC_CH_UA));
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"macOS\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("same-origin"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    Ok(headers)
}

/// Maps a non-2xx response to an error, pulling `message`/`retryAfter` out of
/// the body when it is JSON.
pub fn error_for_status(endpoint: &str, status: StatusCode, body: &str) -> ApiError {
    let parsed = ErrorBody::parse(body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return ApiError::RateLimited {
            endpoint: endpoint.to_string(),
            retry_after: parsed.retry_after_secs(),
        };
    }

    ApiError::Http {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message: parsed.text(),
    }
}

/// Interprets a faucet response. A 400 mentioning the 24 hour limit is a
/// cooldown, not a failure.
pub fn faucet_outcome(status: StatusCode, body: &str) -> Result<FaucetClaim, ApiError> {
    if status.is_success() {
        info!("Faucet claimed successfully");
        return Ok(FaucetClaim::Claimed);
    }

    if status == StatusCode::BAD_REQUEST {
        let parsed = ErrorBody::parse(body);
        if parsed.is_faucet_cooldown() {
            return Ok(FaucetClaim::Cooldown {
                time_remaining: parsed.time_remaining_text(),
            });
        }
    }

    Err(error_for_status(FAUCET_PATH, status, body))
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}
