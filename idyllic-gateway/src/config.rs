//! Gateway runtime configuration, read from CLI flags or the environment.

use std::net::SocketAddr;

use clap::{ArgAction, Parser};

/// Default cap on request body size, in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Settings for the `idyllic-gateway` server.
///
/// Every flag has an `IDYLLIC_*` environment variable fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "idyllic-gateway")]
#[command(about = "Idyllic REST API server")]
#[command(version)]
pub struct GatewayConfig {
    /// Address to listen on
    #[arg(long, env = "IDYLLIC_LISTEN_ADDR", default_value = "127.0.0.1:8000")]
    pub listen_addr: SocketAddr,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    #[arg(long, env = "IDYLLIC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Attach a permissive CORS layer
    #[arg(long, env = "IDYLLIC_CORS", default_value_t = true, action = ArgAction::Set)]
    pub cors: bool,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "IDYLLIC_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            log_level: "info".to_owned(),
            cors: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_config_defaults_match_cli_defaults() {
        let parsed = match GatewayConfig::try_parse_from(["idyllic-gateway"]) {
            Ok(c) => c,
            Err(e) => panic!("default args must parse: {e}"),
        };
        let default = GatewayConfig::default();
        assert_eq!(parsed.listen_addr, default.listen_addr);
        assert_eq!(parsed.log_level, default.log_level);
        assert_eq!(parsed.cors, default.cors);
        assert_eq!(parsed.max_body_bytes, default.max_body_bytes);
    }

    #[test]
    fn gateway_config_flags_override_defaults() {
        let parsed = match GatewayConfig::try_parse_from([
            "idyllic-gateway",
            "--listen-addr",
            "0.0.0.0:9000",
            "--cors",
            "false",
            "--max-body-bytes",
            "1024",
        ]) {
            Ok(c) => c,
            Err(e) => panic!("args must parse: {e}"),
        };
        assert_eq!(parsed.listen_addr, SocketAddr::from(([0, 0, 0, 0], 9000)));
        assert!(!parsed.cors);
        assert_eq!(parsed.max_body_bytes, 1024);
    }

    #[test]
    fn gateway_config_rejects_bad_address() {
        let result = GatewayConfig::try_parse_from(["idyllic-gateway", "--listen-addr", "nowhere"]);
        assert!(result.is_err(), "unparseable address must be rejected");
    }
}
