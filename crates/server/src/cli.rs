//! Command line and environment.

use crate::logging::LogFormat;
use clap::Parser;
use evolution_gateway_client::config::{API_KEY_VAR, BASE_URL_VAR, INSTANCE_VAR, REQUIRED_VARS};
use evolution_gateway_client::{ConfigError, GatewayConfig};

#[derive(Debug, Parser)]
#[command(
    name = "evolution-mcp",
    version,
    about = "MCP server for the Evolution API WhatsApp gateway (stdio)"
)]
pub struct Cli {
    /// Evolution API base URL, e.g. `https://evolution.example.com`
    #[arg(long, env = BASE_URL_VAR, hide_env_values = true)]
    pub base_url: Option<String>,

    /// Evolution API key, sent as the `apikey` header
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Instance name interpolated into every endpoint path
    #[arg(long, env = INSTANCE_VAR)]
    pub instance: Option<String>,

    /// Log filter directive (`RUST_LOG` syntax)
    #[arg(long, env = "EVOLUTION_MCP_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "EVOLUTION_MCP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolve gateway credentials. Empty values count as missing.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::new`].
    pub fn gateway_config(&self) -> Result<GatewayConfig, ConfigError> {
        GatewayConfig::new(
            self.base_url.clone(),
            self.api_key.clone(),
            self.instance.clone(),
        )
    }
}

/// Text printed to stderr before exiting on a configuration error.
#[must_use]
pub fn config_error_report(err: &ConfigError) -> String {
    let mut out = format!("Error: {err}\n\nRequired environment variables:\n");
    for var in REQUIRED_VARS {
        out.push_str("  ");
        out.push_str(var);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["evolution-mcp"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("args parse")
    }

    #[test]
    fn flags_build_a_gateway_config() {
        let cli = parse(&[
            "--base-url",
            "http://localhost:8080/",
            "--api-key",
            "k",
            "--instance",
            "main",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.log_format, LogFormat::Json);
        let cfg = cli.gateway_config().expect("valid config");
        assert_eq!(cfg.base_url(), "http://localhost:8080");
        assert_eq!(cfg.instance(), "main");
    }

    #[test]
    fn report_names_the_missing_variable_and_lists_all() {
        let err = ConfigError::Missing { var: API_KEY_VAR };
        let report = config_error_report(&err);
        assert!(
            report.starts_with("Error: Missing required environment variable: EVOLUTION_API_KEY")
        );
        for var in REQUIRED_VARS {
            assert!(report.contains(var));
        }
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory as _;
        Cli::command().debug_assert();
    }
}
