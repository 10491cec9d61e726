//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod metric_card;
pub mod nav;
pub mod report_form;
pub mod report_list;
pub mod toast;

pub use chart::{StatusChart, WeeklyChart};
pub use metric_card::MetricCard;
pub use nav::Nav;
pub use report_form::ReportForm;
pub use report_list::ReportList;
pub use toast::Toast;
