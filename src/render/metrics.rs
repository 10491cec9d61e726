//! Dashboard metrics

use serde::Serialize;

use crate::report::{Report, Status};

/// Headline counts shown in the metric cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub active: usize,
    pub resolved: usize,
}

impl Metrics {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut metrics = Metrics {
            total: reports.len(),
            ..Default::default()
        };

        for report in reports {
            match report.status {
                Status::Active => metrics.active += 1,
                Status::Resolved => metrics.resolved += 1,
            }
        }

        metrics
    }

    /// Badge text, e.g. "1 report" or "5 reports"
    pub fn count_label(&self) -> String {
        format!(
            "{} report{}",
            self.total,
            if self.total == 1 { "" } else { "s" }
        )
    }
}
