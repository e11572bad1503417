//! Display consumers for refresh results.
//!
//! Every panel renders plain text from a [`DashboardState`]; the runtime
//! decides where that text goes.

pub mod clock;
pub mod json;
pub mod table;
pub mod temperature;
pub mod trend;

pub use clock::ClockPanel;
pub use json::JsonPanel;
pub use table::TablePanel;
pub use temperature::TemperaturePanel;
pub use trend::TrendPanel;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use polar_config::{OutputFormat, PolarConfig};
use polar_core::{DashboardState, Panel};
use std::fmt::{Display, Write};
use tracing::warn;

/// Timestamp pattern used when the configured one is unusable.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a value with `precision` decimals followed by `unit`.
pub fn format_value(value: f64, precision: usize, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.precision$}")
    } else {
        format!("{value:.precision$} {unit}")
    }
}

/// Format `ts` with a strftime pattern, `None` if the pattern is invalid.
pub fn format_timestamp<Tz>(ts: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", ts.format(format)).ok()?;
    Some(out)
}

/// `format` if chrono can parse it, otherwise [`DEFAULT_TIMESTAMP_FORMAT`].
pub fn timestamp_format_or_default(format: &str) -> String {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        warn!("Invalid timestamp format '{format}'; using '{DEFAULT_TIMESTAMP_FORMAT}'.");
        DEFAULT_TIMESTAMP_FORMAT.to_string()
    } else {
        format.to_string()
    }
}

/// Build the panel registered under `name`, or `None` if unknown.
pub fn build_panel(name: &str, config: &PolarConfig) -> Option<Box<dyn Panel>> {
    let display = &config.display;
    let precision = config.sampler.precision;
    let panel: Box<dyn Panel> = match name {
        "temperature" => Box::new(TemperaturePanel::new(&display.unit, precision)),
        "clock"       => Box::new(ClockPanel::new(&display.timestamp_format)),
        "trend"       => Box::new(TrendPanel::new(&display.unit, precision)),
        "table"       => Box::new(TablePanel::new(&display.unit, precision, &display.timestamp_format)),
        "json"        => Box::new(JsonPanel::new()),
        _ => return None,
    };
    Some(panel)
}

/// Ordered set of panels rendered after each refresh.
#[derive(Debug, Default)]
pub struct PanelLayout {
    title:  String,
    format: OutputFormat,
    panels: Vec<Box<dyn Panel>>,
}

impl PanelLayout {
    /// Build the layout from `[display]`.  JSON output always uses the single
    /// JSON panel; unknown panel names are logged and skipped.
    pub fn from_config(config: &PolarConfig) -> Self {
        let display = &config.display;
        let panels = match display.format {
            OutputFormat::Json => vec![Box::new(JsonPanel::new()) as Box<dyn Panel>],
            OutputFormat::Text => display
                .panels
                .iter()
                .filter_map(|name| {
                    let panel = build_panel(name, config);
                    if panel.is_none() {
                        warn!("Unknown panel '{name}' in config; skipping.");
                    }
                    panel
                })
                .collect(),
        };

        Self {
            title: display.title.clone(),
            format: display.format,
            panels,
        }
    }

    /// Panel ids in render order.
    pub fn ids(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.id()).collect()
    }

    /// Render every panel into one output block.  `None` when no panel has
    /// anything to show yet.
    pub fn render(&self, state: &DashboardState) -> Option<String> {
        let parts: Vec<String> = self.panels.iter().filter_map(|p| p.render(state)).collect();
        if parts.is_empty() {
            return None;
        }

        match self.format {
            OutputFormat::Json => Some(parts.join("\n")),
            OutputFormat::Text => {
                let mut out = String::new();
                if !self.title.is_empty() {
                    let _ = writeln!(out, "── {} ──", self.title);
                }
                out.push_str(&parts.join("\n"));
                Some(out)
            }
        }
    }
}
