use crate::pipeline::Pipeline;
use polar_config::SamplerConfig;
use polar_core::{PolarError, Refresh, Result};
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Shortest interval the driver will run at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest interval the driver will run at (one day, as `refresh.interval_secs` allows).
pub const MAX_INTERVAL: Duration = Duration::from_secs(86_400);

/// Commands that may wait for the driver before new ones are refused.
const COMMAND_QUEUE: usize = 8;

/// Requests handled by the driver task between refresh cycles.
#[derive(Debug, Clone)]
pub enum DriverCommand {
    /// Change the refresh interval; the next cycle fires one new interval from now.
    SetInterval(Duration),
    /// Apply new sampler range/precision and history capacity.
    Reconfigure {
        sampler:  SamplerConfig,
        capacity: usize,
    },
}

/// Control handle for a running driver task.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    commands: mpsc::Sender<DriverCommand>,
}

/// Every method queues a command and returns immediately; none of them waits
/// on the driver.
impl DriverHandle {
    pub fn set_interval(&self, interval: Duration) -> Result<()> {
        self.send(DriverCommand::SetInterval(interval))
    }

    pub fn reconfigure(&self, sampler: SamplerConfig, capacity: usize) -> Result<()> {
        self.send(DriverCommand::Reconfigure { sampler, capacity })
    }

    fn send(&self, command: DriverCommand) -> Result<()> {
        self.commands.try_send(command).map_err(|e| match e {
            TrySendError::Full(command) => {
                warn!(?command, "driver command queue full; command dropped");
                PolarError::Sampler("refresh driver command queue is full".into())
            }
            TrySendError::Closed(_) => PolarError::Sampler("refresh driver has stopped".into()),
        })
    }
}

/// Spawn the periodic refresh driver: a single Tokio task that owns
/// `pipeline` and runs one cycle every `interval`, forwarding each
/// [`Refresh`] through the returned channel.
///
/// Cycles never overlap, and a cycle only starts once the receiver has
/// taken the previous result out of the single-slot channel.  A consumer
/// that falls behind therefore delays the driver instead of letting results
/// pile up.  Commands are applied between cycles.  The task stops when the
/// receiver is dropped.
///
/// `interval` is clamped to `[MIN_INTERVAL, MAX_INTERVAL]`.
pub fn spawn_driver<R>(
    pipeline: Pipeline<R>,
    interval: Duration,
) -> (DriverHandle, mpsc::Receiver<Refresh>)
where
    R: Rng + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);

    tokio::spawn(drive(pipeline, interval.clamp(MIN_INTERVAL, MAX_INTERVAL), tx, cmd_rx));

    (DriverHandle { commands: cmd_tx }, rx)
}

fn make_ticker(interval: Duration, start: Instant) -> Interval {
    let mut ticker = time::interval_at(start, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn drive<R: Rng>(
    mut pipeline: Pipeline<R>,
    interval: Duration,
    tx: mpsc::Sender<Refresh>,
    mut commands: mpsc::Receiver<DriverCommand>,
) {
    let mut ticker = make_ticker(interval, Instant::now());
    let mut commands_open = true;
    let mut cycle: u64 = 0;

    info!(interval = ?interval, "refresh driver started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // The slot frees up only when the receiver takes the last result.
                let Ok(permit) = tx.reserve().await else {
                    break; // all receivers dropped
                };
                let refresh = pipeline.tick();
                cycle += 1;
                debug!(
                    cycle,
                    value = refresh.latest.value,
                    buffered = refresh.history.len(),
                    slope = refresh.trend.map(|t| t.slope),
                    "refresh cycle"
                );
                permit.send(refresh);
            }
            cmd = commands.recv(), if commands_open => match cmd {
                Some(DriverCommand::SetInterval(new)) => {
                    let new = new.clamp(MIN_INTERVAL, MAX_INTERVAL);
                    info!(interval = ?new, "refresh interval changed");
                    ticker = make_ticker(new, Instant::now() + new);
                }
                Some(DriverCommand::Reconfigure { sampler, capacity }) => {
                    match pipeline.reconfigure(&sampler, capacity) {
                        Ok(()) => info!(
                            min = sampler.min,
                            max = sampler.max,
                            precision = sampler.precision,
                            capacity,
                            "sampler reconfigured"
                        ),
                        Err(e) => warn!("Sampler reconfigure rejected: {e}"),
                    }
                }
                None => commands_open = false,
            },
        }
    }

    debug!(cycles = cycle, "refresh driver stopped");
}
