//! Capture Ingest - record or pick a landscape video and route it for upload.
//!
//! This is the core library behind the mobile uploader's capture screens.
//! It resolves camera ratios and preview geometry, runs the recording state
//! machine, validates picked media and decides where a video goes next.
//! Device and app services are reached through the traits in
//! [`capture::traits`], [`screens`] and [`ingest`].

pub mod capture;
pub mod config;
pub mod ingest;
pub mod recorder;
pub mod screens;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use config::CaptureConfig;
pub use utils::error::{CaptureError, CaptureResult};

/// Initialize tracing/logging for the host process
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capture_ingest_lib=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .context("tracing subscriber already installed")?;

    tracing::info!("Starting capture ingest v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
