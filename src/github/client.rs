//! REST client for GitHub's release and git-ref endpoints.

use async_trait::async_trait;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER,
    USER_AGENT,
};
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;

use super::ReleaseHost;
use super::throttle::{RetryDecision, RetryPolicy, RetrySignal};
use super::types::{GitRef, NewRelease, ReleaseUpdate, RemoteRelease, UploadedAsset};
use crate::error::{ApiError, Result, SyncError};
use crate::files::LocalAsset;

const API_BASE: &str = "https://api.github.com";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const AGENT: &str = concat!("gh_release_sync/", env!("CARGO_PKG_VERSION"));

/// Fallback delay when a rate-limit response carries no retry-after header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Client for one repository's release and ref endpoints
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    policy: RetryPolicy,
}

impl GitHubClient {
    /// Create a client for `owner/repo` authenticated with `token`
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self> {
        Self::with_base(API_BASE, token, owner, repo)
    }

    /// Create a client against a non-default API base (test servers)
    pub fn with_base(api_base: &str, token: &str, owner: &str, repo: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            SyncError::Config {
                reason: "Token contains characters not valid in an Authorization header"
                    .to_string(),
            }
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SyncError::Config {
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            policy: RetryPolicy::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_base, self.owner, self.repo, path)
    }

    /// Send a request, consulting the retry policy on rate-limit signals.
    async fn execute(&self, req: RequestBuilder) -> std::result::Result<Response, ApiError> {
        let mut attempt = 0u32;
        loop {
            let current = match req.try_clone() {
                Some(clone) => clone,
                // streaming bodies cannot be re-sent, skip retry support
                None => return Self::check(req.send().await?).await,
            };

            match Self::check(current.send().await?).await {
                Ok(resp) => return Ok(resp),
                Err(err) => {
                    let signal = match &err {
                        ApiError::RateLimited { retry_after } => RetrySignal::RateLimited {
                            retry_after: *retry_after,
                        },
                        ApiError::AbuseDetected => RetrySignal::AbuseDetected,
                        _ => return Err(err),
                    };

                    match self.policy.decide(attempt, &signal) {
                        RetryDecision::RetryAfter(delay) => {
                            log::warn!(
                                "request quota exhausted, retrying after {} seconds",
                                delay.as_secs()
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        RetryDecision::Abort => {
                            if matches!(signal, RetrySignal::AbuseDetected) {
                                log::warn!("abuse detection triggered, not retrying");
                            }
                            return Err(err);
                        }
                    }
                }
            }
        }
    }

    /// Map a response to the typed error taxonomy.
    async fn check(resp: Response) -> std::result::Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);
        let remaining = resp
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_default();

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            let lowered = message.to_ascii_lowercase();
            if lowered.contains("abuse") || lowered.contains("secondary rate limit") {
                return Err(ApiError::AbuseDetected);
            }
            if retry_after.is_some() || remaining == Some(0) {
                return Err(ApiError::RateLimited {
                    retry_after: retry_after.unwrap_or(DEFAULT_RETRY_AFTER),
                });
            }
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ReleaseHost for GitHubClient {
    async fn get_release_by_tag(&self, tag: &str) -> std::result::Result<RemoteRelease, ApiError> {
        let resp = self
            .execute(self.http.get(self.url(&format!("releases/tags/{tag}"))))
            .await?;
        Ok(resp.json().await?)
    }

    async fn list_releases(&self) -> std::result::Result<Vec<RemoteRelease>, ApiError> {
        let resp = self
            .execute(
                self.http
                    .get(self.url("releases"))
                    .query(&[("per_page", "100")]),
            )
            .await?;
        Ok(resp.json().await?)
    }

    async fn create_release(
        &self,
        new: &NewRelease,
    ) -> std::result::Result<RemoteRelease, ApiError> {
        let resp = self
            .execute(self.http.post(self.url("releases")).json(new))
            .await?;
        Ok(resp.json().await?)
    }

    async fn update_release(
        &self,
        release_id: u64,
        update: &ReleaseUpdate,
    ) -> std::result::Result<RemoteRelease, ApiError> {
        let resp = self
            .execute(
                self.http
                    .patch(self.url(&format!("releases/{release_id}")))
                    .json(update),
            )
            .await?;
        Ok(resp.json().await?)
    }

    async fn delete_release(&self, release_id: u64) -> std::result::Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("releases/{release_id}"))))
            .await?;
        Ok(())
    }

    async fn delete_asset(&self, asset_id: u64) -> std::result::Result<(), ApiError> {
        self.execute(
            self.http
                .delete(self.url(&format!("releases/assets/{asset_id}"))),
        )
        .await?;
        Ok(())
    }

    async fn upload_asset(
        &self,
        endpoint: &str,
        asset: &LocalAsset,
    ) -> std::result::Result<UploadedAsset, ApiError> {
        let mut target = url::Url::parse(endpoint).map_err(|e| ApiError::Endpoint {
            reason: format!("{endpoint}: {e}"),
        })?;
        target.query_pairs_mut().append_pair("name", &asset.name);

        log::debug!("uploading '{}' ({} bytes)", asset.name, asset.size);

        let resp = self
            .execute(
                self.http
                    .post(target)
                    .header(CONTENT_TYPE, asset.content_type)
                    .header(CONTENT_LENGTH, asset.size)
                    .body(asset.data.clone()),
            )
            .await?;
        Ok(resp.json().await?)
    }

    async fn get_tag_ref(&self, tag: &str) -> std::result::Result<GitRef, ApiError> {
        let resp = self
            .execute(self.http.get(self.url(&format!("git/ref/tags/{tag}"))))
            .await?;
        Ok(resp.json().await?)
    }

    async fn create_ref(&self, tag: &str, sha: &str) -> std::result::Result<(), ApiError> {
        let payload = serde_json::json!({
            "ref": format!("refs/tags/{tag}"),
            "sha": sha,
        });
        self.execute(self.http.post(self.url("git/refs")).json(&payload))
            .await?;
        Ok(())
    }

    async fn delete_ref(&self, tag: &str) -> std::result::Result<(), ApiError> {
        self.execute(self.http.delete(self.url(&format!("git/refs/tags/{tag}"))))
            .await?;
        Ok(())
    }
}
