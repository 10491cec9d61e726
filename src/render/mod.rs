//! Render Loop
//!
//! Pure functions from the current snapshot to what the dashboard shows:
//! metrics, the two charts and the report list. Drawing is left to
//! [`RenderTarget`] and [`ChartPort`] implementations.

pub mod chart;
pub mod html;
pub mod list;
pub mod metrics;

pub use chart::{status_breakdown, weekly_volume, ChartDisplay, ChartPort, ChartSeries};
pub use list::{DeleteControl, ListView, Media, ReportRow, RowAction, StatusBadge};
pub use metrics::Metrics;

use crate::controller::Page;
use crate::form::FormView;
use crate::toast::Toast;

/// Metrics and list for the dashboard page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardView {
    pub metrics: Metrics,
    pub list: ListView,
}

/// Host surface the controller draws on
///
/// Implementations must only store what they are given: they are called
/// while the controller updates its state and must not call back into it.
pub trait RenderTarget {
    fn render_page(&mut self, page: Page);

    fn render_metrics(&mut self, metrics: &Metrics);

    fn render_list(&mut self, list: &ListView);

    fn render_toasts(&mut self, toasts: &[Toast]);

    fn render_form(&mut self, form: &FormView);
}

/// [`RenderTarget`] producing HTML strings
#[derive(Debug, Default)]
pub struct HtmlRenderTarget {
    pub page: Option<Page>,
    pub metrics_html: String,
    pub list_html: String,
    pub empty_state: bool,
    pub toasts_html: String,
    pub submit_label: String,
}

impl RenderTarget for HtmlRenderTarget {
    fn render_page(&mut self, page: Page) {
        self.page = Some(page);
    }

    fn render_metrics(&mut self, metrics: &Metrics) {
        self.metrics_html = html::render_metrics(metrics);
    }

    fn render_list(&mut self, list: &ListView) {
        self.empty_state = list.is_empty();
        self.list_html = html::render_list(list);
    }

    fn render_toasts(&mut self, toasts: &[Toast]) {
        self.toasts_html = toasts
            .iter()
            .map(|t| {
                format!(
                    r#"<div class="toast {}"><span>{}</span><span>{}</span></div>"#,
                    t.kind.bg_class(),
                    t.kind.icon(),
                    html::escape(&t.message)
                )
            })
            .collect();
    }

    fn render_form(&mut self, form: &FormView) {
        self.submit_label = form.submit.label().to_string();
    }
}
