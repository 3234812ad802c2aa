//! bbsimd daemon entry point.
//!
//! Initializes logging, builds the simulated OLT topology, spawns the
//! mailbox actors and the indication egress, and serves the `OltService`
//! method table on the control endpoint until shutdown.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use bbsimd::{Config, EgressHandle, OltDevice, OltService, LISTEN_ADDRESS};
use openolt::OpenoltServer;

/// Initialize tracing/logging.
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Serves the control endpoint until shutdown.
async fn run(service: OltService, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    info!(
        address = %listener.local_addr().context("listener address")?,
        "OLT control endpoint ready"
    );

    tonic::transport::Server::builder()
        .add_service(OpenoltServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown_signal())
        .await
        .context("serving the OLT control endpoint")?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cfg = Config::parse();
    info!("--- Starting bbsimd ---");
    info!(
        olt_id = cfg.olt_id,
        nni_ports = cfg.nni_ports,
        pon_ports = cfg.pon_ports,
        onus_per_pon = cfg.onus_per_pon,
        "creating OLT topology"
    );

    let egress = EgressHandle::spawn();
    let olt = OltDevice::start(&cfg, egress.clone());
    let service = OltService::new(olt, egress);

    // Bind failure before the service exists is the one genuinely fatal
    // startup error.
    let listener = match tokio::net::TcpListener::bind(LISTEN_ADDRESS).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("OLT failed to listen on {}: {}", LISTEN_ADDRESS, e);
            return ExitCode::FAILURE;
        }
    };

    match run(service, listener).await {
        Ok(()) => {
            info!("bbsimd exiting normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("bbsimd error: {}", e);
            ExitCode::FAILURE
        }
    }
}
