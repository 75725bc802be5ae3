// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! calendly-mcp entry point - CLI and stdio server.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use calendly_mcp::config::{self, Credential, ServerConfig};
use calendly_mcp::mcp::{serve_stdio, McpServer};
use calendly_mcp::telemetry::{init_telemetry, TelemetryConfig, GLOBAL_METRICS};
use calendly_mcp::{CalendlyClient, ConfigError, ToolRegistry, VERSION};

/// calendly-mcp - Calendly scheduling tools for MCP clients.
#[derive(Parser)]
#[command(name = "calendly-mcp")]
#[command(author, version, about = "Calendly scheduling tools over the Model Context Protocol", long_about = None)]
struct Cli {
    /// Base URL for the Calendly API
    #[arg(long, env = "CALENDLY_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "CALENDLY_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "calendly_mcp=debug")
    #[arg(long)]
    log_level: Option<String>,

    /// Show debug output with span events
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for tool listings.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Subcommands for calendly-mcp.
#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,

    /// List the tools this server exposes
    Tools {
        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut telemetry = if cli.debug {
        TelemetryConfig::development()
    } else {
        TelemetryConfig::default()
    };
    if let Some(level) = &cli.log_level {
        telemetry = telemetry.with_filter(level.clone());
    }
    init_telemetry(&telemetry)?;

    match cli.command.as_ref().unwrap_or(&Commands::Serve) {
        Commands::Serve => serve(&cli).await,
        Commands::Tools { format } => {
            list_tools(&cli, *format)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("calendly-mcp {}", VERSION);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Apply command-line overrides to a config loaded from the environment.
fn apply_overrides(cli: &Cli, config: ServerConfig) -> Result<ServerConfig, ConfigError> {
    let mut config = config.with_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.as_str());
    }
    config.validate()?;
    Ok(config)
}

async fn serve(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = match ServerConfig::from_env().and_then(|c| apply_overrides(cli, c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!(
        base_url = %config.base_url,
        credential = config.credential.source(),
        "Starting calendly-mcp {}",
        VERSION
    );

    let client = Arc::new(CalendlyClient::new(&config)?);
    let registry = ToolRegistry::with_client(client)?;
    let server = McpServer::new(Arc::new(registry));

    serve_stdio(&server).await?;

    tracing::debug!("{}", GLOBAL_METRICS.snapshot().format_report());
    Ok(ExitCode::SUCCESS)
}

fn list_tools(cli: &Cli, format: OutputFormat) -> anyhow::Result<()> {
    // Listing never contacts the API, so a missing credential is fine here.
    let config = ServerConfig::from_env()
        .unwrap_or_else(|_| ServerConfig::new(Credential::ApiKey(String::new())));
    let config = apply_overrides(cli, config)?;
    let registry = ToolRegistry::with_client(Arc::new(CalendlyClient::new(&config)?))?;

    match format {
        OutputFormat::Json => {
            let tools = serde_json::json!({ "tools": registry.definitions() });
            println!("{}", serde_json::to_string_pretty(&tools)?);
        }
        OutputFormat::Text => {
            println!(
                "{}",
                format!("{} Calendly tools", registry.len()).bright_blue().bold()
            );
            for def in registry.definitions() {
                let summary = def.description.lines().next().unwrap_or_default();
                println!("  {} - {}", def.name.bright_white(), summary);
            }
        }
    }
    Ok(())
}
