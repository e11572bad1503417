use polar_core::{DashboardState, Panel, Reading, Trend, TrendLine};
use serde::Serialize;
use tracing::warn;

/// Emits one JSON object per refresh, for piping into other tools.
#[derive(Debug, Clone, Default)]
pub struct JsonPanel;

impl JsonPanel {
    pub fn new() -> Self {
        Self
    }
}

/// Wire shape of a JSON refresh frame.
#[derive(Debug, Serialize)]
struct Frame<'a> {
    cycle:     u64,
    latest:    &'a Reading,
    history:   &'a [Reading],
    trend:     Option<TrendLine>,
    direction: Option<Trend>,
    /// `[elapsed_secs, fitted_value]` per history entry.
    fitted:    Vec<(f64, f64)>,
}

impl Panel for JsonPanel {
    fn id(&self) -> &str {
        "json"
    }

    fn render(&self, state: &DashboardState) -> Option<String> {
        let latest = state.latest()?;
        let history = state.history();
        let trend = state.trend();
        let frame = Frame {
            cycle: state.cycles,
            latest,
            history,
            trend,
            direction: trend.map(|t| t.direction()),
            fitted: trend.map(|t| t.fitted(history)).unwrap_or_default(),
        };

        match serde_json::to_string(&frame) {
            Ok(json) => Some(json),
            Err(e) => {
                warn!("Failed to encode refresh frame: {e}");
                None
            }
        }
    }
}
