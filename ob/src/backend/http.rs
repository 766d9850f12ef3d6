//! HTTP persistence client

use async_trait::async_trait;
use interviewclassifier::Category;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use super::{ApiError, BackendApi, ItemRecord, NewProfile, OnboardingReset, OnboardingStepUpdate, Profile, ProfileUpdate};
use crate::config::BackendConfig;

/// reqwest-backed persistence client
pub struct HttpBackend {
    base_url: Url,
    http: Client,
}

/// A user id usable as a single path segment
fn user_segment(user_id: &str) -> Result<&str, ApiError> {
    if user_id.is_empty() || user_id == "." || user_id == ".." || user_id.contains(['/', '\\']) {
        return Err(ApiError::InvalidUserId(user_id.to_string()));
    }
    Ok(user_id)
}

impl HttpBackend {
    /// Create a new client from configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        debug!(?config, "from_config: called");
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { base_url, http })
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn items_url(&self, category: Category, user_id: &str) -> Result<Url, ApiError> {
        let mut url = self.url(&[category.endpoint()]);
        url.query_pairs_mut().append_pair("user_id", user_segment(user_id)?);
        Ok(url)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        debug!(%method, %url, "request: called");
        let path = url.path().to_string();

        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.header("content-type", "application/json").json(body);
        }
        let response = builder.send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%path, "request: not found");
            return Err(ApiError::NotFound(path));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = %status.as_u16(), %message, "request: API error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, url: Url, body: &B) -> Result<(), ApiError> {
        self.request(method, url, Some(body)).await.map(|_| ())
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        let url = self.url(&["profiles", user_segment(user_id)?]);
        match self.request::<()>(Method::GET, url, None).await {
            Ok(response) => {
                let body = response.text().await?;
                Ok(Some(serde_json::from_str(&body)?))
            }
            Err(ApiError::NotFound(_)) => {
                debug!(%user_id, "get_profile: no profile");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<(), ApiError> {
        self.send(Method::POST, self.url(&["profiles"]), profile).await
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<(), ApiError> {
        let url = self.url(&["profiles", user_segment(user_id)?]);
        self.send(Method::PUT, url, update).await
    }

    async fn delete_profile(&self, user_id: &str) -> Result<(), ApiError> {
        let url = self.url(&["profiles", user_segment(user_id)?]);
        self.request::<()>(Method::DELETE, url, None).await.map(|_| ())
    }

    async fn update_onboarding_step(&self, user_id: &str, update: &OnboardingStepUpdate) -> Result<(), ApiError> {
        let url = self.url(&["onboarding", user_segment(user_id)?, "step"]);
        self.send(Method::PUT, url, update).await
    }

    async fn reset_onboarding(&self, user_id: &str, reset: &OnboardingReset) -> Result<(), ApiError> {
        let url = self.url(&["onboarding", user_segment(user_id)?]);
        self.send(Method::PUT, url, reset).await
    }

    async fn create_item(&self, category: Category, item: &ItemRecord) -> Result<(), ApiError> {
        self.send(Method::POST, self.url(&[category.endpoint()]), item).await
    }

    async fn delete_items(&self, category: Category, user_id: &str) -> Result<(), ApiError> {
        let url = self.items_url(category, user_id)?;
        self.request::<()>(Method::DELETE, url, None).await.map(|_| ())
    }
}
