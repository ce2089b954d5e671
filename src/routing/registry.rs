//! Host slug → function lookup.
//!
//! # Responsibilities
//! - Store registered functions by slug
//! - Resolve a request host to a function
//! - Fall back to the default function, or report an explicit miss
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) slug lookup via HashMap

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::EdgeConfig;
use crate::functions::Function;
use crate::routing::host::host_slug;

/// Why no function could be chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("neither \"host\" nor \":authority\" found in header")]
    MissingHost,

    #[error("no function registered for host \"{0}\"")]
    UnknownHost(String),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        match self {
            DispatchError::MissingHost => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            DispatchError::UnknownHost(_) => {
                (StatusCode::NOT_FOUND, format!("{self}\n")).into_response()
            }
        }
    }
}

/// Registered functions keyed by lowercased host slug.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
    default: Option<Function>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `functions` and `default_function` config entries.
    pub fn from_config(config: &EdgeConfig) -> Self {
        let mut registry = Self::new();
        for entry in &config.functions {
            registry.register(&entry.slug, entry.kind);
        }
        registry.default = config.default_slug().and_then(|slug| registry.get(slug));
        registry
    }

    pub fn register(&mut self, slug: &str, function: Function) {
        self.functions.insert(slug.to_ascii_lowercase(), function);
    }

    pub fn get(&self, slug: &str) -> Option<Function> {
        self.functions.get(&slug.to_ascii_lowercase()).copied()
    }

    /// Choose the function for a request whose authority is `host`.
    pub fn resolve(&self, host: Option<&str>) -> Result<Function, DispatchError> {
        let Some(host) = host else {
            return self.default.ok_or(DispatchError::MissingHost);
        };

        let slug = host_slug(host);
        self.functions
            .get(&slug)
            .copied()
            .or(self.default)
            .ok_or(DispatchError::UnknownHost(slug))
    }
}
