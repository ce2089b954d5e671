//! HTTP client for the public key provider.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;
use crate::functions::identity::Identity;
use crate::observability::metrics;
use crate::upstream::{KeyProvider, UpstreamError, UpstreamResult};

/// Fetches `<base_url>/<identity>.keys` over HTTP.
#[derive(Debug, Clone)]
pub struct GithubKeys {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl GithubKeys {
    /// Build a provider from the upstream section of the config.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(&config.base_url)?,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// URL queried for `identity`.
    pub fn keys_url(&self, identity: &Identity) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("{identity}.keys"))
    }

    async fn fetch(&self, identity: &Identity) -> Result<UpstreamResult, UpstreamError> {
        let url = self.keys_url(identity)?;
        tracing::debug!(identity = %identity, url = %url, "Fetching keys");

        let outcome = match tokio::time::timeout(self.timeout, self.send(url)).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(UpstreamError::Transport(e)),
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        };

        metrics::record_upstream(match &outcome {
            Ok(UpstreamResult::Keys(_)) => "ok",
            Ok(UpstreamResult::Failure(_)) => "failure",
            Err(UpstreamError::Timeout(_)) => "timeout",
            Err(_) => "transport",
        });
        outcome
    }

    async fn send(&self, url: Url) -> Result<UpstreamResult, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Ok(UpstreamResult::Failure(status));
        }
        Ok(UpstreamResult::Keys(response.text().await?))
    }
}

impl KeyProvider for GithubKeys {
    fn fetch_keys<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> BoxFuture<'a, Result<UpstreamResult, UpstreamError>> {
        self.fetch(identity).boxed()
    }
}

/// Parse the base URL so that `join` appends rather than replaces the last segment.
fn normalize_base(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> GithubKeys {
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        };
        GithubKeys::new(&config).unwrap()
    }

    #[test]
    fn keys_url_for_default_base() {
        let keys = provider("https://github.com");
        let identity = Identity::parse("cmoog").unwrap();
        assert_eq!(
            keys.keys_url(&identity).unwrap().as_str(),
            "https://github.com/cmoog.keys"
        );
    }

    #[test]
    fn keys_url_keeps_base_path() {
        let keys = provider("http://127.0.0.1:9000/mirror");
        let identity = Identity::parse("octo-cat").unwrap();
        assert_eq!(
            keys.keys_url(&identity).unwrap().as_str(),
            "http://127.0.0.1:9000/mirror/octo-cat.keys"
        );
    }

    #[test]
    fn rejects_relative_base() {
        let config = UpstreamConfig {
            base_url: "github.com".to_string(),
            ..UpstreamConfig::default()
        };
        assert!(matches!(GithubKeys::new(&config), Err(UpstreamError::Url(_))));
    }
}
