use serde::{Deserialize, Serialize};

/// API gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiGatewayConfig {
    pub bind_addr: String,
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default = "default_request_timeout_sec")]
    pub request_timeout_sec: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_request_timeout_sec() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            cors_enabled: false,
            request_timeout_sec: default_request_timeout_sec(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}
