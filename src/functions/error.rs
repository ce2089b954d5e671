//! Per-request lookup failures and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::functions::identity::{Identity, InvalidIdentity};
use crate::upstream::UpstreamError;

/// Terminal failure of a single lookup.
///
/// `Display` is the response body without its trailing newline.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Invalid(#[from] InvalidIdentity),

    #[error("failed to fetch keys for username \"{identity}\"")]
    Upstream {
        identity: Identity,
        status: StatusCode,
    },

    #[error("failed to fetch keys for username \"{identity}\"")]
    Transport {
        identity: Identity,
        #[source]
        source: UpstreamError,
    },

    #[error("failed to fetch keys for username \"{identity}\"")]
    Timeout { identity: Identity },
}

impl LookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::Invalid(_) => StatusCode::BAD_REQUEST,
            LookupError::Upstream { status, .. } => *status,
            LookupError::Transport { .. } => StatusCode::BAD_GATEWAY,
            LookupError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        (self.status(), format!("{self}\n")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let identity = Identity::parse("cmoog").unwrap();

        assert_eq!(
            LookupError::Invalid(InvalidIdentity("a--b".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LookupError::Upstream {
                identity: identity.clone(),
                status: StatusCode::NOT_FOUND,
            }
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::Timeout { identity }.status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn bodies() {
        let identity = Identity::parse("cmoog").unwrap();
        assert_eq!(
            LookupError::Invalid(InvalidIdentity("-x".into())).to_string(),
            "invalid username \"-x\""
        );
        assert_eq!(
            LookupError::Timeout { identity }.to_string(),
            "failed to fetch keys for username \"cmoog\""
        );
    }
}
