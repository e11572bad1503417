//! Event loop for `polar`.
//!
//! Owns the dashboard state and wires together all background tasks:
//! - Refresh driver (generate → append → estimate on a fixed interval)
//! - Config file watcher (live reload on change)
//! - Ctrl-C handler (graceful shutdown)

use polar_config::{default_path, load as load_config, ConfigWatcher, PolarConfig};
use polar_core::{DashboardState, Message, Refresh, Result};
use polar_panels::PanelLayout;
use polar_sampler::DriverHandle;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the dashboard with the config at [`default_path`].  Returns after
/// Ctrl-C or when the refresh driver stops.
pub fn run() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_with(default_path()))
}

/// Async entry point: load `path`, start the driver and watcher, and render
/// every refresh to stdout until shutdown.
pub async fn run_with(path: PathBuf) -> Result<()> {
    let config = load_config(&path)?;
    info!(
        interval_secs = config.refresh.interval_secs,
        capacity = config.history.capacity,
        min = config.sampler.min,
        max = config.sampler.max,
        "starting dashboard"
    );

    let (driver, refreshes) = polar_sampler::spawn(&config)?;
    let (_watcher, reloads) = ConfigWatcher::spawn(&path);

    let dashboard = Dashboard::new(path, config, driver, std::io::stdout());
    event_loop(dashboard, refreshes, reloads).await
}

async fn event_loop<W: Write>(
    mut dashboard: Dashboard<W>,
    mut refreshes: mpsc::Receiver<Refresh>,
    mut reloads: mpsc::Receiver<()>,
) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let message = tokio::select! {
            refresh = refreshes.recv() => match refresh {
                Some(r) => Message::Refreshed(r),
                None => {
                    warn!("Refresh driver stopped; shutting down");
                    Message::Shutdown
                }
            },
            Some(()) = reloads.recv() => Message::ConfigReloaded,
            _ = &mut shutdown => Message::Shutdown,
        };

        if !dashboard.update(message)? {
            break;
        }
    }

    info!(cycles = dashboard.state.cycles, "dashboard stopped");
    Ok(())
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Dashboard state plus everything needed to render and reconfigure it.
struct Dashboard<W> {
    path:   PathBuf,
    state:  DashboardState,
    config: PolarConfig,
    layout: PanelLayout,
    driver: DriverHandle,
    out:    W,
}

impl<W: Write> Dashboard<W> {
    fn new(path: PathBuf, config: PolarConfig, driver: DriverHandle, out: W) -> Self {
        Self {
            path,
            state: DashboardState::default(),
            layout: PanelLayout::from_config(&config),
            config,
            driver,
            out,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    // ── Update ────────────────────────────────────────────────────────────────

    /// Apply one message.  Returns `false` once the loop should stop.
    fn update(&mut self, message: Message) -> Result<bool> {
        match message {
            Message::Refreshed(refresh) => {
                self.state.apply(refresh);
                self.draw()?;
            }
            Message::ConfigReloaded => self.reload(),
            Message::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    fn draw(&mut self) -> Result<()> {
        if let Some(frame) = self.layout.render(&self.state) {
            writeln!(self.out, "{frame}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Re-read the config file and push changed settings to the driver.
    ///
    /// Driver commands are queued without waiting, so a reload never stalls
    /// the loop that drains the driver's results.  If the driver refuses a
    /// command the previous config stays active and the next reload retries.
    fn reload(&mut self) {
        let config = match load_config(self.path()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };

        if config == self.config {
            debug!("Config file touched without changes");
            return;
        }

        if config.sampler != self.config.sampler || config.history != self.config.history {
            if let Err(e) = self
                .driver
                .reconfigure(config.sampler.clone(), config.history.capacity)
            {
                warn!("Could not reconfigure sampler, keeping previous config: {e}");
                return;
            }
        }

        if config.refresh != self.config.refresh {
            if let Err(e) = self.driver.set_interval(config.refresh.interval()) {
                warn!("Could not change refresh interval, keeping previous config: {e}");
                return;
            }
        }

        self.layout = PanelLayout::from_config(&config);
        self.config = config;
        info!("Config reloaded");
    }
}
