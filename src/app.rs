use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::sync::watch;

use crate::earnings::EarningsSnapshot;
use crate::refresh::RefreshController;
use crate::settings::SettingsStore;

const SETTINGS_FILE: &str = "settings.json";

/// Initialize logging (reads RUST_LOG env var). Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

/// Default per-user data directory for the widget.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("sps"))
}

/// Wires the settings store and refresh loop together for an embedding
/// display shell.
pub struct App {
    settings: Arc<SettingsStore>,
    refresh: RefreshController,
}

impl App {
    pub fn bootstrap(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let settings_path = data_dir.join(SETTINGS_FILE);
        info!("sps starting up, settings at {}", settings_path.display());

        let settings = Arc::new(SettingsStore::open(settings_path));
        let refresh = RefreshController::new(settings.clone());

        Ok(Self { settings, refresh })
    }

    pub fn settings(&self) -> Arc<SettingsStore> {
        self.settings.clone()
    }

    /// Start the 1 Hz refresh loop; the display renders from the returned
    /// channel.
    pub fn start(&mut self) -> Result<watch::Receiver<EarningsSnapshot>> {
        self.refresh.start()
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.refresh.stop().await
    }
}
