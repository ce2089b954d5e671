//! Upstream key provider subsystem.
//!
//! # Data Flow
//! ```text
//! Identity
//!     → client.rs (GET <base_url>/<identity>.keys, bounded by timeout)
//!     → UpstreamResult::Keys(text)     on 2xx
//!     → UpstreamResult::Failure(status) on any other status
//!     → UpstreamError                   on transport failure or timeout
//! ```
//!
//! # Design Decisions
//! - One outbound request per lookup; no retries, no caching
//! - `KeyProvider` is the seam between functions and the network
//! - Connection pooling is left to the HTTP client

pub mod client;

use axum::http::StatusCode;
use futures_util::future::BoxFuture;
use std::time::Duration;
use thiserror::Error;

use crate::functions::identity::Identity;

pub use client::GithubKeys;

/// Outcome of a lookup that reached the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamResult {
    /// Provider answered 2xx; the full body as text.
    Keys(String),
    /// Provider answered with a non-2xx status.
    Failure(StatusCode),
}

/// Lookup that never produced a provider response.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
}

/// Source of public keys for an identity.
pub trait KeyProvider: Send + Sync {
    fn fetch_keys<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> BoxFuture<'a, Result<UpstreamResult, UpstreamError>>;
}
