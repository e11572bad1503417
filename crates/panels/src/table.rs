use crate::{format_timestamp, format_value, timestamp_format_or_default};
use polar_core::{DashboardState, Panel};
use std::fmt::Write;

/// Tabulates the buffered history, oldest first, with the fitted trend
/// value for each row.
#[derive(Debug, Clone)]
pub struct TablePanel {
    unit:      String,
    precision: usize,
    format:    String,
}

impl TablePanel {
    pub fn new(unit: impl Into<String>, precision: u32, format: &str) -> Self {
        Self {
            unit:      unit.into(),
            precision: precision as usize,
            format:    timestamp_format_or_default(format),
        }
    }
}

impl Panel for TablePanel {
    fn id(&self) -> &str {
        "table"
    }

    fn render(&self, state: &DashboardState) -> Option<String> {
        state.latest()?;
        let history = state.history();
        if history.is_empty() {
            return Some("History: empty".to_string());
        }

        let fitted = state
            .trend()
            .map(|line| line.fitted(history))
            .unwrap_or_default();

        let mut out = format!("History ({} readings):", history.len());
        for (i, reading) in history.iter().enumerate() {
            let stamp = format_timestamp(&reading.timestamp, &self.format)?;
            let value = format_value(reading.value, self.precision, &self.unit);
            // Fitted values carry one extra digit so the line is visible between readings.
            let fit = fitted
                .get(i)
                .map(|(_, y)| format_value(*y, self.precision + 1, &self.unit))
                .unwrap_or_else(|| "-".to_string());
            write!(out, "\n  {stamp} | {value} | fit {fit}").ok()?;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::state_with_trend;
    use polar_core::TrendLine;

    #[test]
    fn rows_are_oldest_first_with_fit() {
        let state = state_with_trend(
            &[(0, 5.0), (1, 7.0), (2, 9.0)],
            Some(TrendLine { slope: 2.0, intercept: 5.0 }),
        );
        let panel = TablePanel::new("C", 1, "%H:%M:%S");
        let rendered = panel.render(&state).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "History (3 readings):");
        assert_eq!(lines[1], "  06:00:00 | 5.0 C | fit 5.00 C");
        assert_eq!(lines[3], "  06:00:02 | 9.0 C | fit 9.00 C");
    }

    #[test]
    fn empty_history_after_refresh() {
        let state = state_with_trend(&[], None);
        let panel = TablePanel::new("C", 1, "%H:%M:%S");
        assert_eq!(panel.render(&state).as_deref(), Some("History: empty"));
    }
}
