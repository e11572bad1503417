pub mod error;
pub mod event;
pub mod grid;
pub mod panel;
pub mod state;

pub use error::{PolarError, Result};
pub use event::Message;
pub use grid::{grid_span, grid_value};
pub use panel::Panel;
pub use state::{DashboardState, HistorySnapshot, Reading, Refresh, Trend, TrendLine};
