//! Greeting functions: `hello` and `goodbye`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::functions::render::{render_goodbye, render_hello};
use crate::functions::{fetch_keys, FunctionContext};

/// Keys of the fixed identity under a region greeting.
pub async fn hello(ctx: &FunctionContext) -> Response {
    match fetch_keys(ctx.provider.as_ref(), &ctx.fixed_identity).await {
        Ok(keys) => (StatusCode::OK, render_hello(&ctx.region, &keys)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, status = %e.status(), "hello lookup failed");
            e.into_response()
        }
    }
}

pub fn goodbye(ctx: &FunctionContext) -> Response {
    (StatusCode::OK, render_goodbye(&ctx.region)).into_response()
}
