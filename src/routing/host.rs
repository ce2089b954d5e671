//! Host slug extraction.
//!
//! # Responsibilities
//! - Find the request authority (URI authority, else Host header)
//! - Reduce it to its first DNS label, lowercased
//!
//! # Design Decisions
//! - HTTP/2 carries `:authority` in the URI; HTTP/1.1 carries `Host`
//! - Port suffixes are ignored
//! - IP literals produce a slug that never matches a registration

use axum::http::{header, Request};

/// Authority of `req`, if it names one.
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    req.uri()
        .authority()
        .map(|authority| authority.as_str())
        .or_else(|| {
            req.headers()
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
        })
        .filter(|host| !host.is_empty())
}

/// First DNS label of `host`, lowercased: `Keys.Edge.Example:443` → `keys`.
pub fn host_slug(host: &str) -> String {
    host.split(['.', ':'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
