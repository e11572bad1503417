use crate::{format_timestamp, timestamp_format_or_default};
use polar_core::{DashboardState, Panel};

/// Displays the timestamp of the latest reading.
///
/// Format string is the `display.timestamp_format` strftime pattern.
#[derive(Debug, Clone)]
pub struct ClockPanel {
    format: String,
}

impl ClockPanel {
    pub fn new(format: &str) -> Self {
        Self { format: timestamp_format_or_default(format) }
    }
}

impl Panel for ClockPanel {
    fn id(&self) -> &str {
        "clock"
    }

    fn render(&self, state: &DashboardState) -> Option<String> {
        let latest = state.latest()?;
        let stamp = format_timestamp(&latest.timestamp, &self.format)?;
        Some(format!("Current Date and Time: {stamp}"))
    }
}
