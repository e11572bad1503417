use crate::format_value;
use polar_core::{DashboardState, Panel};

/// Displays the latest temperature reading, e.g. `-17.2 C`.
#[derive(Debug, Clone)]
pub struct TemperaturePanel {
    unit:      String,
    precision: usize,
}

impl TemperaturePanel {
    pub fn new(unit: impl Into<String>, precision: u32) -> Self {
        Self {
            unit:      unit.into(),
            precision: precision as usize,
        }
    }
}

impl Panel for TemperaturePanel {
    fn id(&self) -> &str {
        "temperature"
    }

    fn render(&self, state: &DashboardState) -> Option<String> {
        let latest = state.latest()?;
        Some(format!(
            "Current Temperature: {}",
            format_value(latest.value, self.precision, &self.unit)
        ))
    }
}
