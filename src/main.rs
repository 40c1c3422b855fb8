//! failover - inspect provider configuration and selection
//!
//! Loads a provider configuration the way the proxy does at startup and
//! reports status, validates files, or shows which provider and model the
//! router would pick.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use provider_failover::config::{ConfigSource, LegacyEnvConfig, load_provider_config};
use provider_failover::utils::logging::init_tracing;
use provider_failover::{BuildInfo, ModelType, ProviderManager, ProviderManagerConfig, ProviderStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::LazyLock;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| BuildInfo::current().to_string());

#[derive(Debug, Parser)]
#[command(name = "failover", version, long_version = LONG_VERSION.as_str())]
#[command(about = "Provider selection and failover inspection tool")]
struct Cli {
    /// Log level or filter directives (RUST_LOG overrides)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show provider configuration and health status
    Status {
        /// Provider configuration file (discovered when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the health report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load and validate a provider configuration file
    Validate {
        /// Provider configuration file
        #[arg(long)]
        config: PathBuf,
    },
    /// Show the provider and model successive requests would be routed to
    Select {
        /// Requested model name, classified into big/middle/small
        model_name: String,
        /// Provider configuration file (discovered when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of successive selections
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level, cli.log_json) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Status { config, json } => {
            let (config, source) = load(config).await?;
            let manager = ProviderManager::from_config(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manager.health_report())?);
            } else {
                print_provider_info(&config, &source, &manager);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { config } => {
            let loaded = ProviderManagerConfig::from_file(&config)
                .await
                .with_context(|| format!("failed to load {}", config.display()))?;
            let resolved = loaded
                .resolved()
                .context("failed to resolve environment references")?;
            println!(
                "{}: OK ({} provider(s), {} enabled, strategy {})",
                config.display(),
                resolved.providers.len(),
                resolved.enabled_providers().count(),
                resolved.fallback_strategy
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Select {
            model_name,
            config,
            count,
        } => {
            let (config, _) = load(config).await?;
            let manager = ProviderManager::from_config(&config)?;
            let model_type = ModelType::classify(&model_name);
            println!("{} -> {}", model_name, model_type);

            for i in 1..=count {
                match manager.select_initial(model_type) {
                    Some(selection) => {
                        println!("{:>3}: {} / {}", i, selection.provider_name(), selection.model)
                    }
                    None => {
                        println!("{:>3}: no provider available", i);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn load(explicit: Option<PathBuf>) -> anyhow::Result<(ProviderManagerConfig, ConfigSource)> {
    let root = std::env::current_dir().context("cannot determine working directory")?;
    let legacy = LegacyEnvConfig::from_env()?;
    let loaded = load_provider_config(explicit.as_deref(), &root, &legacy).await?;
    Ok(loaded)
}

fn print_provider_info(
    config: &ProviderManagerConfig,
    source: &ConfigSource,
    manager: &ProviderManager,
) {
    match source {
        ConfigSource::File(path) => println!("Configuration: {}", path.display()),
        ConfigSource::ExampleFile(path) => println!("Configuration: {} (example)", path.display()),
        ConfigSource::LegacyEnv => println!("Configuration: legacy environment variables"),
    }
    println!(
        "Strategy: {}  Health checks: {}  Circuit breaker: {} failures / {}s",
        config.fallback_strategy,
        match config.probe_interval() {
            Some(every) => format!("every {}s", every.as_secs()),
            None => "disabled".to_string(),
        },
        config.circuit_breaker.failure_threshold,
        config.circuit_breaker.recovery_timeout
    );
    println!();

    for report in manager.status() {
        println!("{} (priority {})", report.name, report.priority);
        for (label, models) in [
            ("BIG (opus)", &report.models.big),
            ("MIDDLE (sonnet)", &report.models.middle),
            ("SMALL (haiku)", &report.models.small),
        ] {
            if !models.is_empty() {
                println!("  {:<16} {}", label, models.join(", "));
            }
        }
        let marker = match report.status {
            ProviderStatus::Healthy => "ok",
            ProviderStatus::CircuitOpen => "!!",
        };
        println!("  [{}] status: {}", marker, report.status);
        println!();
    }

    println!("Overall: {}", manager.overall_health());
}
