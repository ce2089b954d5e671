//! Edge functions.
//!
//! # Data Flow
//! ```text
//! dispatch (http layer) picks a Function by host slug
//!     → keys.rs      path → Identity → provider → render
//!     → greeting.rs  hello (fixed identity) / goodbye (static)
//!     → error.rs     LookupError → status + body
//! ```
//!
//! # Design Decisions
//! - Functions are stateless; everything they read lives in `FunctionContext`
//! - Every failure is a response, never a panic or a propagated error
//! - Templates are pure functions in render.rs

pub mod error;
pub mod greeting;
pub mod identity;
pub mod keys;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

use axum::response::Response;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::EdgeConfig;
use crate::upstream::{KeyProvider, UpstreamError, UpstreamResult};

pub use error::LookupError;
pub use identity::{Identity, InvalidIdentity};

/// The functions this runtime can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    /// Key lookup for the username in the request path.
    Keys,
    /// Key lookup for the configured fixed username.
    Hello,
    /// Static greeting.
    Goodbye,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Keys => "keys",
            Function::Hello => "hello",
            Function::Goodbye => "goodbye",
        }
    }

    /// Run the function for one request.
    pub async fn invoke(self, ctx: &FunctionContext, path: &str) -> Response {
        match self {
            Function::Keys => keys::handle(ctx, path).await,
            Function::Hello => greeting::hello(ctx).await,
            Function::Goodbye => greeting::goodbye(ctx),
        }
    }
}

/// Everything a function invocation may read. Immutable and shared.
#[derive(Clone)]
pub struct FunctionContext {
    /// Deployment region, display only.
    pub region: String,
    /// Redirect target for an empty key lookup path.
    pub default_identity_url: String,
    /// Username served by `hello`.
    pub fixed_identity: Identity,
    pub provider: Arc<dyn KeyProvider>,
}

impl FunctionContext {
    /// Build from config. The fixed identity is checked by config validation;
    /// an invalid one is reported here as well.
    pub fn from_config(
        config: &EdgeConfig,
        provider: Arc<dyn KeyProvider>,
    ) -> Result<Self, InvalidIdentity> {
        Ok(Self {
            region: config.region.clone(),
            default_identity_url: config.keys.default_identity_url.clone(),
            fixed_identity: Identity::parse(&config.keys.fixed_identity)?,
            provider,
        })
    }
}

impl std::fmt::Debug for FunctionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionContext")
            .field("region", &self.region)
            .field("default_identity_url", &self.default_identity_url)
            .field("fixed_identity", &self.fixed_identity)
            .finish_non_exhaustive()
    }
}

/// Ask the provider for `identity`'s keys and map every non-success outcome.
pub(crate) async fn fetch_keys(
    provider: &dyn KeyProvider,
    identity: &Identity,
) -> Result<String, LookupError> {
    match provider.fetch_keys(identity).await {
        Ok(UpstreamResult::Keys(text)) => Ok(text),
        Ok(UpstreamResult::Failure(status)) => Err(LookupError::Upstream {
            identity: identity.clone(),
            status,
        }),
        Err(UpstreamError::Timeout(_)) => Err(LookupError::Timeout {
            identity: identity.clone(),
        }),
        Err(source) => Err(LookupError::Transport {
            identity: identity.clone(),
            source,
        }),
    }
}
