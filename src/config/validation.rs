//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default function names a registered slug)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Keep the upstream off the local network unless explicitly allowed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;
use url::{Host, Url};

use crate::config::schema::EdgeConfig;
use crate::functions::identity::is_valid_identity;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("upstream.base_url {0:?} is not an absolute http(s) url")]
    UpstreamUrl(String),

    #[error("upstream.base_url host {0:?} is on the local network")]
    LocalUpstream(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("keys.default_identity_url {0:?} is not an absolute http(s) url")]
    RedirectUrl(String),

    #[error("keys.fixed_identity {0:?} is not a valid username")]
    FixedIdentity(String),

    #[error("function slug {0:?} must be a single non-empty dns label")]
    InvalidSlug(String),

    #[error("function slug {0:?} is registered more than once")]
    DuplicateSlug(String),

    #[error("default_function {0:?} is not a registered slug")]
    UnknownDefault(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    match http_url(&config.upstream.base_url) {
        Some(url) => {
            if config.upstream.block_local_net && is_local(&url) {
                errors.push(ValidationError::LocalUpstream(
                    url.host_str().unwrap_or_default().to_string(),
                ));
            }
        }
        None => errors.push(ValidationError::UpstreamUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if http_url(&config.keys.default_identity_url).is_none() {
        errors.push(ValidationError::RedirectUrl(config.keys.default_identity_url.clone()));
    }
    if !is_valid_identity(&config.keys.fixed_identity) {
        errors.push(ValidationError::FixedIdentity(config.keys.fixed_identity.clone()));
    }

    let mut seen = HashSet::new();
    for function in &config.functions {
        let slug = function.slug.to_ascii_lowercase();
        if slug.is_empty() || slug.contains(['.', ':', '/']) {
            errors.push(ValidationError::InvalidSlug(function.slug.clone()));
        } else if !seen.insert(slug) {
            errors.push(ValidationError::DuplicateSlug(function.slug.clone()));
        }
    }

    if let Some(default) = config.default_slug() {
        if !seen.contains(&default.to_ascii_lowercase()) {
            errors.push(ValidationError::UnknownDefault(default.to_string()));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn http_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

/// Loopback or unspecified hosts.
fn is_local(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => is_local_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_local_ip(IpAddr::V6(ip)),
        None => false,
    }
}

fn is_local_ip(ip: IpAddr) -> bool {
    ip.is_loopback() || ip.is_unspecified()
}
