use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::earnings::{compute_snapshot, EarningsSnapshot};
use crate::settings::SettingsStore;

use super::loop_worker::refresh_loop;

/// Owns the background refresh task. The display renders from the watch
/// receiver returned by [`start`](Self::start) and calls
/// [`stop`](Self::stop) on teardown.
pub struct RefreshController {
    settings: Arc<SettingsStore>,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl RefreshController {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self {
            settings,
            handle: None,
            cancel_token: None,
        }
    }

    /// Spawn the 1 Hz refresh loop. The channel starts out holding a
    /// snapshot for the current instant, so the display has something to
    /// paint before the first tick.
    pub fn start(&mut self) -> Result<watch::Receiver<EarningsSnapshot>> {
        if self.handle.is_some() {
            bail!("refresh loop already active");
        }

        let settings = self.settings.clone();
        let initial = compute_snapshot(&settings.settings(), Local::now().naive_local());
        let (tx, rx) = watch::channel(initial);

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(refresh_loop(settings, tx, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(rx)
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("refresh loop task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }
}
