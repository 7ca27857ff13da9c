//! Entry point for the confession reader.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load the confession document from JSON.
//! - Load user configuration from `conf/config.toml`.
//! - Open the annotation stores and launch the GUI.

mod annotations;
mod app;
mod config;
mod document;
mod position;
mod prefs;
mod storage;
mod theme;

use crate::annotations::AnnotationStore;
use crate::app::run_app;
use crate::config::load_config;
use crate::document::load_document;
use crate::position::PositionTracker;
use crate::prefs::Preferences;
use crate::storage::FileStore;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

const DEFAULT_DOCUMENT: &str = "content/confession.json";

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let document_path = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %document_path.display(),
        level = %config.log_level,
        data_dir = %config.data_dir,
        "Starting confession reader"
    );

    let document = load_document(&document_path)?;

    let data_dir = PathBuf::from(&config.data_dir);
    let annotations = AnnotationStore::load(Box::new(FileStore::new(data_dir.clone())));
    let positions = PositionTracker::new(Box::new(FileStore::new(data_dir.clone())));
    let prefs = Preferences::new(Box::new(FileStore::new(data_dir)));

    run_app(document, config, annotations, positions, prefs).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(raw) => PathBuf::from(raw),
        None => PathBuf::from(DEFAULT_DOCUMENT),
    };
    if !path.exists() {
        return Err(anyhow!("Document not found: {}", path.display()));
    }
    Ok(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
