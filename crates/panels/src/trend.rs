use crate::format_value;
use polar_core::{DashboardState, Panel};

/// Displays the trend line slope and direction over the buffered history.
#[derive(Debug, Clone)]
pub struct TrendPanel {
    unit:      String,
    precision: usize,
}

impl TrendPanel {
    pub fn new(unit: impl Into<String>, precision: u32) -> Self {
        Self {
            unit:      unit.into(),
            precision: precision as usize,
        }
    }
}

impl Panel for TrendPanel {
    fn id(&self) -> &str {
        "trend"
    }

    fn render(&self, state: &DashboardState) -> Option<String> {
        state.latest()?;
        let Some(line) = state.trend() else {
            return Some("Trend: unavailable".to_string());
        };
        Some(format!(
            "Trend: {:+.3} {}/s ({}) over {} readings, starting at {}",
            line.slope,
            self.unit,
            line.direction(),
            state.history().len(),
            format_value(line.intercept, self.precision, &self.unit),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{state_with, state_with_trend};
    use polar_core::TrendLine;

    #[test]
    fn renders_slope_and_direction() {
        let state = state_with_trend(
            &[(0, -17.0), (1, -16.9), (2, -16.8)],
            Some(TrendLine { slope: 0.1, intercept: -17.0 }),
        );
        let panel = TrendPanel::new("C", 1);
        assert_eq!(
            panel.render(&state).as_deref(),
            Some("Trend: +0.100 C/s (warming) over 3 readings, starting at -17.0 C")
        );
    }

    #[test]
    fn flat_single_reading() {
        let state = state_with(&[(0, -16.5)]);
        let rendered = TrendPanel::new("C", 1).render(&state).unwrap();
        assert!(rendered.contains("(steady)"), "{rendered}");
    }

    #[test]
    fn unavailable_without_history() {
        let state = state_with_trend(&[], None);
        assert_eq!(
            TrendPanel::new("C", 1).render(&state).as_deref(),
            Some("Trend: unavailable")
        );
    }
}
