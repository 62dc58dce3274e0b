//! The `radiograph serve` command: run the web front-end.

use clap::Args;
use radiograph_core::{Config, Radiograph};
use std::sync::Arc;

use crate::server;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    apply_overrides(&args, &mut config);
    config.validate()?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(model = %config.gemini.model, "Starting Radiograph v{}", radiograph_core::VERSION);

    let radiograph = Arc::new(Radiograph::new(config)?);
    server::run(radiograph, &addr).await
}

fn apply_overrides(args: &ServeArgs, config: &mut Config) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        let args = ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9000),
        };
        apply_overrides(&args, &mut config);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = Config::default();
        let args = ServeArgs {
            host: None,
            port: None,
        };
        apply_overrides(&args, &mut config);
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
