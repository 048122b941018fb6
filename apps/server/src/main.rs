use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use urania::ephemeris::{EphemerisMode, SwissEphemerisAdapter};
use urania_server::geocode::NominatimGeocoder;
use urania_server::zones::TzfLookup;
use urania_server::{chart_settings, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (settings, source) = urania_config::load_settings()?;
    match &source {
        Some(path) => log::info!("configuration loaded from {}", path.display()),
        None => log::info!("no configuration file found, using defaults"),
    }

    let mode: EphemerisMode = settings.ephemeris.mode.parse()?;
    let ephemeris = SwissEphemerisAdapter::new(mode, settings.ephemeris.path.clone())
        .context("failed to initialise Swiss Ephemeris")?;
    let geocoder =
        NominatimGeocoder::new(&settings.geocoder).context("failed to build geocoder client")?;
    let chart = chart_settings(&settings.chart)?;
    log::info!(
        "reporting {} bodies, orb {}°, {} houses",
        chart.bodies.len(),
        chart.aspects.orb(),
        chart.house_system
    );

    let state = Arc::new(AppState {
        ephemeris: Arc::new(ephemeris),
        geocoder: Arc::new(geocoder),
        zones: Arc::new(TzfLookup::new()),
        chart,
    });

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", settings.server.host, settings.server.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    log::info!("listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
