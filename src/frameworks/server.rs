// Framework bootstrap for the simulation runtime.

use crate::domain::{DisplaySink, SimTuning, VehicleState};
use crate::frameworks::config;
use crate::interface_adapters::console::spawn_console;
use crate::interface_adapters::display::{BroadcastSink, frame_serializer};
use crate::interface_adapters::net::{control_handler, shutdown_handler, state_handler, ws_handler};
use crate::interface_adapters::state::AppState;
use crate::use_cases::lifecycle::wait_stopped;
use crate::use_cases::{Helm, Lifecycle, Simulation};

use axum::{
    Router,
    extract::ws::Utf8Bytes,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{broadcast, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Everything `run` needs once the loops are up.
struct Runtime {
    app_state: Arc<AppState>,
    simulation: Simulation,
    sink: Arc<BroadcastSink>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/state", get(state_handler))
        .route("/controls/{action}", post(control_handler))
        .route("/shutdown", post(shutdown_handler))
        .with_state(state)
}

/// Serves the simulation on `listener` until shutdown, then releases the display.
///
/// Returns an error if any loop failed.
pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    serve(listener, false).await
}

async fn serve(listener: tokio::net::TcpListener, console: bool) -> Result<()> {
    let address = listener.local_addr()?;
    let Runtime {
        app_state,
        simulation,
        sink,
    } = build_runtime()?;
    let lifecycle = simulation.lifecycle().clone();

    if console {
        spawn_console(app_state.helm.clone(), lifecycle.clone())?;
    }

    let app = router(app_state);
    tracing::info!(%address, "listening");

    let simulation = tokio::spawn(simulation.wait());
    let interrupt = {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received");
                lifecycle.request_shutdown();
            }
        })
    };

    // Serve until every loop has returned.
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(wait_stopped(lifecycle.subscribe()))
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        });
    if served.is_err() {
        lifecycle.request_shutdown();
    }

    let outcome = simulation.await.map_err(std::io::Error::other)?;
    interrupt.abort();
    sink.release();
    served?;

    outcome.map_err(|e| {
        tracing::error!(error = %e, "simulation failed");
        std::io::Error::other(e)
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    serve(listener, config::console_enabled()).await
}

fn build_runtime() -> Result<Runtime> {
    let tuning = SimTuning::default();
    let vehicle = Arc::new(VehicleState::new());
    let lifecycle = Lifecycle::new();
    let sink = Arc::new(BroadcastSink::new(config::FRAME_BROADCAST_CAPACITY));

    // Frames are serialized once and shared by every viewer.
    let (frame_bytes_tx, _frame_bytes_rx) =
        broadcast::channel::<Utf8Bytes>(config::FRAME_BROADCAST_CAPACITY);
    let (panel_latest_tx, panel_latest_rx) = watch::channel::<Utf8Bytes>(Utf8Bytes::from(""));
    tokio::spawn(frame_serializer(
        sink.subscribe(),
        frame_bytes_tx.clone(),
        panel_latest_tx,
        lifecycle.subscribe(),
    ));

    let display: Arc<dyn DisplaySink> = sink.clone();
    let helm = Arc::new(Helm::new(
        vehicle.clone(),
        display.clone(),
        lifecycle.clone(),
        tuning,
    ));

    let simulation = Simulation::start(
        vehicle.clone(),
        display,
        config::sim_settings(),
        tuning,
        lifecycle.clone(),
    )
    .map_err(std::io::Error::other)?;

    Ok(Runtime {
        app_state: Arc::new(AppState {
            helm,
            vehicle,
            lifecycle,
            frame_bytes_tx,
            panel_latest_rx,
        }),
        simulation,
        sink,
    })
}
