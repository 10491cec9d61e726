//! Chart data and the charting port
//!
//! Business logic decides what each chart shows; a [`ChartPort`]
//! implementation decides how to draw it (canvas, SVG, test recorder).

use serde::Serialize;

use super::metrics::Metrics;
use crate::report::WeeklyStats;

pub const ACTIVE_COLOR: &str = "#f59e0b";
pub const RESOLVED_COLOR: &str = "#10b981";
pub const WEEKLY_COLOR: &str = "#3b82f6";

/// Labels, values and colours for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    pub colors: Vec<String>,
}

impl ChartSeries {
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    pub fn max(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Share of `index` in the whole series, 0-100
    pub fn percent(&self, index: usize) -> f64 {
        let total = self.total();
        match self.values.get(index) {
            Some(&v) if total > 0 => v as f64 / total as f64 * 100.0,
            _ => 0.0,
        }
    }

    /// Tooltip text, e.g. "Active: 3 (60.0%)"
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let label = self.labels.get(index)?;
        let value = self.values.get(index)?;
        Some(format!("{}: {} ({:.1}%)", label, value, self.percent(index)))
    }
}

/// Rendering backend for a single chart
pub trait ChartPort {
    /// Replace the data shown by the chart
    fn show_series(&mut self, series: &ChartSeries);

    /// Hide the chart and show its empty-state placeholder instead
    fn show_placeholder(&mut self);

    /// Flush pending changes to the screen
    fn render(&mut self);
}

/// What the chart should display
#[derive(Debug, Clone, PartialEq)]
pub enum ChartDisplay {
    Series(ChartSeries),
    Placeholder,
}

impl ChartDisplay {
    /// Push this display to a port and render it
    pub fn draw(&self, port: &mut dyn ChartPort) {
        match self {
            ChartDisplay::Series(series) => port.show_series(series),
            ChartDisplay::Placeholder => port.show_placeholder(),
        }
        port.render();
    }
}

/// Active vs. Resolved proportion chart
pub fn status_breakdown(metrics: &Metrics) -> ChartDisplay {
    if metrics.active == 0 && metrics.resolved == 0 {
        return ChartDisplay::Placeholder;
    }

    ChartDisplay::Series(ChartSeries {
        labels: vec!["Active".to_string(), "Resolved".to_string()],
        values: vec![metrics.active as u32, metrics.resolved as u32],
        colors: vec![ACTIVE_COLOR.to_string(), RESOLVED_COLOR.to_string()],
    })
}

/// Reports-per-weekday bar chart
///
/// Always shown, even for an all-zero week.
pub fn weekly_volume(weekly: &WeeklyStats) -> ChartDisplay {
    ChartDisplay::Series(ChartSeries {
        labels: WeeklyStats::labels(),
        values: weekly.counts().to_vec(),
        colors: vec![WEEKLY_COLOR.to_string(); 7],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        series: Option<ChartSeries>,
        placeholder: bool,
        renders: usize,
    }

    impl ChartPort for Recorder {
        fn show_series(&mut self, series: &ChartSeries) {
            self.series = Some(series.clone());
            self.placeholder = false;
        }

        fn show_placeholder(&mut self) {
            self.series = None;
            self.placeholder = true;
        }

        fn render(&mut self) {
            self.renders += 1;
        }
    }

    #[test]
    fn test_breakdown_percentages() {
        let metrics = Metrics { total: 5, active: 3, resolved: 2 };
        let ChartDisplay::Series(series) = status_breakdown(&metrics) else {
            panic!("expected a series");
        };

        assert_eq!(series.percent(0), 60.0);
        assert_eq!(series.percent(1), 40.0);
        assert_eq!(series.tooltip(0).unwrap(), "Active: 3 (60.0%)");
        assert_eq!(series.tooltip(1).unwrap(), "Resolved: 2 (40.0%)");
    }

    #[test]
    fn test_breakdown_empty_shows_placeholder() {
        let display = status_breakdown(&Metrics::default());
        assert_eq!(display, ChartDisplay::Placeholder);

        let mut port = Recorder::default();
        display.draw(&mut port);
        assert!(port.placeholder);
        assert!(port.series.is_none());
        assert_eq!(port.renders, 1);
    }

    #[test]
    fn test_weekly_volume() {
        let display = weekly_volume(&WeeklyStats([0, 2, 1, 0, 0, 4, 0]));
        let mut port = Recorder::default();
        display.draw(&mut port);

        let series = port.series.unwrap();
        assert_eq!(series.labels[5], "Sat");
        assert_eq!(series.values[5], 4);
        assert_eq!(series.max(), 4);
        assert_eq!(series.colors.len(), 7);
    }
}
