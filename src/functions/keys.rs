//! Key lookup for the username in the request path.
//!
//! # Request States
//! ```text
//! Received → Redirected                 (empty path)
//!          → Rejected                   (invalid username)
//!          → AwaitingUpstream → UpstreamFailed
//!                             → Rendered
//! ```

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::functions::render::render;
use crate::functions::{fetch_keys, FunctionContext, Identity, LookupError};

/// Handle one request for `path` (raw, still percent-encoded).
pub async fn handle(ctx: &FunctionContext, path: &str) -> Response {
    let raw = path.strip_prefix('/').unwrap_or(path);
    if raw.is_empty() {
        tracing::debug!(location = %ctx.default_identity_url, "Empty path, redirecting");
        return redirect(&ctx.default_identity_url);
    }

    match lookup(ctx, raw).await {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            match &e {
                LookupError::Invalid(_) => tracing::debug!(error = %e, "Rejected lookup"),
                LookupError::Transport { source, .. } => {
                    tracing::warn!(error = %e, cause = %source, "Upstream unreachable")
                }
                _ => tracing::warn!(error = %e, status = %e.status(), "Lookup failed"),
            }
            e.into_response()
        }
    }
}

/// Validate `raw`, fetch its keys and render the success body.
pub async fn lookup(ctx: &FunctionContext, raw: &str) -> Result<String, LookupError> {
    let identity = Identity::parse(raw)?;
    let keys = fetch_keys(ctx.provider.as_ref(), &identity).await?;
    Ok(render(&ctx.region, &identity, &keys))
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
