//! In-memory key provider for unit tests.

use axum::http::StatusCode;
use axum::response::Response;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::functions::{FunctionContext, Identity};
use crate::upstream::{KeyProvider, UpstreamError, UpstreamResult};

#[derive(Debug, Clone, Copy)]
pub enum Canned {
    Keys(&'static str),
    Status(StatusCode),
    Timeout,
}

/// Answers from a fixed table and records every identity it is asked for.
#[derive(Debug, Default)]
pub struct StubProvider {
    answers: HashMap<String, Canned>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn with(mut self, identity: &str, answer: Canned) -> Self {
        self.answers.insert(identity.to_string(), answer);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl KeyProvider for StubProvider {
    fn fetch_keys<'a>(
        &'a self,
        identity: &'a Identity,
    ) -> BoxFuture<'a, Result<UpstreamResult, UpstreamError>> {
        self.calls.lock().unwrap().push(identity.to_string());
        let answer = self
            .answers
            .get(identity.as_str())
            .copied()
            .unwrap_or(Canned::Status(StatusCode::NOT_FOUND));

        async move {
            match answer {
                Canned::Keys(text) => Ok(UpstreamResult::Keys(text.to_string())),
                Canned::Status(status) => Ok(UpstreamResult::Failure(status)),
                Canned::Timeout => Err(UpstreamError::Timeout(Duration::from_secs(1))),
            }
        }
        .boxed()
    }
}

pub fn context(provider: Arc<StubProvider>) -> FunctionContext {
    FunctionContext {
        region: "ord".to_string(),
        default_identity_url: "https://keys.edge.cmoog.dev/cmoog".to_string(),
        fixed_identity: Identity::parse("cmoog").unwrap(),
        provider,
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
