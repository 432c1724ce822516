pub mod estimator;
pub mod types;

pub use estimator::{aggregate, compute_post_alert_returns, post_alert_windows, EventWindowEstimator};
pub use types::{
    EventWindowConfig, EventWindowReport, ReturnEstimate, ReturnStats, WindowCalendar,
    WindowReturn,
};
