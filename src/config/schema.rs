//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the runtime.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::functions::Function;

/// Root configuration for the edge runtime.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Deployment region reported in greetings.
    pub region: String,

    /// Public key provider settings.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Key lookup function settings.
    pub keys: KeysConfig,

    /// Host slug → function registrations.
    pub functions: Vec<FunctionConfig>,

    /// Slug of the function serving hosts with no registration.
    /// An empty string turns the fallback off.
    pub default_function: Option<String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            region: DEFAULT_REGION.to_string(),
            upstream: UpstreamConfig::default(),
            timeouts: TimeoutConfig::default(),
            keys: KeysConfig::default(),
            functions: [Function::Keys, Function::Hello, Function::Goodbye]
                .into_iter()
                .map(|kind| FunctionConfig {
                    slug: kind.name().to_string(),
                    kind,
                })
                .collect(),
            default_function: Some(Function::Keys.name().to_string()),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl EdgeConfig {
    /// The fallback slug, if one is configured and non-empty.
    pub fn default_slug(&self) -> Option<&str> {
        self.default_function
            .as_deref()
            .filter(|slug| !slug.is_empty())
    }
}

/// Region reported when none is configured.
pub const DEFAULT_REGION: &str = "UNKNOWN";

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream key provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; keys are fetched from `<base_url>/<username>.keys`.
    pub base_url: String,

    /// Deadline for one lookup (headers and body) in seconds.
    pub timeout_secs: u64,

    /// Refuse loopback and unspecified upstream hosts.
    pub block_local_net: bool,

    /// User-Agent sent upstream.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://github.com".to_string(),
            timeout_secs: 10,
            block_local_net: true,
            user_agent: concat!("openedge/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Key lookup function settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Redirect target for an empty lookup path.
    pub default_identity_url: String,

    /// Username served by the `hello` function.
    pub fixed_identity: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            default_identity_url: "https://keys.edge.cmoog.dev/cmoog".to_string(),
            fixed_identity: "cmoog".to_string(),
        }
    }
}

/// One host slug registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FunctionConfig {
    /// First DNS label of the request host (e.g. "keys" for keys.edge.example).
    pub slug: String,

    /// Function serving that slug.
    pub kind: Function,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directives, used when RUST_LOG is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "openedge=info,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_all_functions() {
        let config = EdgeConfig::default();
        let slugs: Vec<_> = config.functions.iter().map(|f| f.slug.as_str()).collect();
        assert_eq!(slugs, vec!["keys", "hello", "goodbye"]);
        assert_eq!(config.default_function.as_deref(), Some("keys"));
        assert_eq!(config.region, "UNKNOWN");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: EdgeConfig = toml::from_str(
            r#"
            region = "ams"

            [upstream]
            timeout_secs = 3

            [[functions]]
            slug = "ssh"
            kind = "keys"
            "#,
        )
        .unwrap();

        assert_eq!(config.region, "ams");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.upstream.base_url, "https://github.com");
        assert_eq!(
            config.functions,
            vec![FunctionConfig {
                slug: "ssh".into(),
                kind: Function::Keys,
            }]
        );
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn empty_default_function_disables_fallback() {
        let config: EdgeConfig = toml::from_str("default_function = ''").unwrap();
        assert_eq!(config.default_slug(), None);

        assert_eq!(EdgeConfig::default().default_slug(), Some("keys"));
    }
}
