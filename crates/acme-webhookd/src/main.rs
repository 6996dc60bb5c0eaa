// # acme-webhookd - cert-manager ACME DNS-01 webhook
//
// The daemon is a thin integration layer. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Registering and initializing solvers
// 4. Serving challenge requests until SIGTERM/SIGINT
//
// All challenge logic lives in the library crates.
//
// ## Configuration
//
// - `GROUP_NAME` (required): API group, must match the Issuer's
//   `webhook.groupName`
// - `WEBHOOK_LISTEN_ADDR`: bind address (default `0.0.0.0:8443`)
// - `WEBHOOK_LOG_LEVEL`: trace, debug, info, warn, error (default `info`)
//
// Cluster credentials are inferred the usual way (in-cluster service
// account, else `KUBECONFIG`).
//
// ## Example
//
// ```bash
// export GROUP_NAME=acme.example.com
// export WEBHOOK_LISTEN_ADDR=127.0.0.1:8443
//
// acme-webhookd
// ```

use acme_webhook_core::{SolverRegistry, WebhookConfig};
use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum WebhookExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<WebhookExitCode> for ExitCode {
    fn from(code: WebhookExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    // Missing GROUP_NAME ends here, before anything is served
    let config = match WebhookConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return WebhookExitCode::ConfigError.into();
        }
    };

    let log_level = match config.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return WebhookExitCode::ConfigError.into();
    }

    info!("Starting acme-webhookd for group {}", config.group_name);

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return WebhookExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let registry = match prepare_solvers().await {
            Ok(registry) => registry,
            Err(e) => {
                error!("Startup error: {:#}", e);
                return WebhookExitCode::ConfigError;
            }
        };

        match run_daemon(config, registry).await {
            Ok(()) => WebhookExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {:#}", e);
                WebhookExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Register built-in solvers and hand them the cluster credentials
async fn prepare_solvers() -> Result<SolverRegistry> {
    #[allow(unused_mut)]
    let mut registry = SolverRegistry::new();

    #[cfg(feature = "autodns")]
    {
        info!("Registering AutoDNS solver");
        acme_webhook_autodns::register(&mut registry);
    }

    if registry.is_empty() {
        anyhow::bail!("No solvers compiled in; enable at least one solver feature");
    }

    let cluster = kube::Config::infer()
        .await
        .context("Failed to load cluster credentials")?;

    registry
        .initialize_all(cluster)
        .await
        .context("Failed to initialize solvers")?;

    Ok(registry)
}

/// Serve challenges until a shutdown signal arrives
async fn run_daemon(config: WebhookConfig, registry: SolverRegistry) -> Result<()> {
    let registry = Arc::new(registry);

    acme_webhook_core::server::serve(&config, registry, async {
        match wait_for_shutdown().await {
            Ok(signal) => info!("Received shutdown signal: {}", signal),
            Err(e) => error!("Shutdown signal error: {}", e),
        }
    })
    .await?;

    info!("Shutting down acme-webhookd");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
