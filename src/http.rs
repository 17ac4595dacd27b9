// Outbound HTTP plumbing shared by the provider adapters

use bytes::Bytes;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{CommunicationError, ConfigError};
use crate::model::ProviderId;

pub(crate) fn build_client(provider: &ProviderId, timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| ConfigError::Client {
            provider: provider.clone(),
            source,
        })
}

pub(crate) fn parse_base_url(config: &ProviderConfig) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidProvider {
        provider: config.id.clone(),
        reason,
    };

    let url = Url::parse(config.base_url.trim())
        .map_err(|e| invalid(format!("invalid base_url '{}': {}", config.base_url, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "base_url '{}' is not an http(s) base address",
            config.base_url
        )));
    }
    Ok(url)
}

// Append path segments to the base address, percent-encoding each one
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[derive(Debug)]
pub(crate) struct ProviderResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// Send a request and read the whole body. Transport failures and timeouts are tagged with the provider.
pub(crate) async fn execute(
    provider: &ProviderId,
    request: RequestBuilder,
    context: &str,
) -> Result<ProviderResponse, CommunicationError> {
    let response = request
        .send()
        .await
        .map_err(|e| CommunicationError::new(provider.clone(), context, e))?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| CommunicationError::new(provider.clone(), context, e))?;

    tracing::debug!(provider = %provider, status = status.as_u16(), bytes = body.len(), "{}", context);

    Ok(ProviderResponse { status, body })
}
