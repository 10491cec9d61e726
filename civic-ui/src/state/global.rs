//! Global Application State
//!
//! The [`AppController`] owns all application state. The UI only mirrors
//! what the controller renders into Leptos signals, through the adapters
//! below, and sends user actions back to the controller.

use leptos::*;
use std::rc::Rc;

use civic_reporter::controller::{AppController, DeleteOutcome, Page, Ports};
use civic_reporter::form::FormView;
use civic_reporter::render::{ChartDisplay, ChartPort, ChartSeries, ListView, Metrics, RenderTarget};
use civic_reporter::toast::Toast;
use civic_reporter::{Config, ReportId, Status};

use crate::api::{get_api_base, GlooReportApi};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Owner of the report snapshot and every user action
    pub controller: AppController,
    /// Visible page
    pub page: RwSignal<Page>,
    /// Metric cards and count badge
    pub metrics: RwSignal<Metrics>,
    /// Report list rows
    pub list: RwSignal<ListView>,
    /// Visible toasts, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    /// Submit button and photo area
    pub form: RwSignal<FormView>,
    /// Active vs. Resolved doughnut
    pub status_chart: RwSignal<ChartDisplay>,
    /// Reports per weekday
    pub weekly_chart: RwSignal<ChartDisplay>,
    /// True until the first reload settles
    pub loading: RwSignal<bool>,
}

/// [`RenderTarget`] writing into signals
struct SignalTarget {
    page: RwSignal<Page>,
    metrics: RwSignal<Metrics>,
    list: RwSignal<ListView>,
    toasts: RwSignal<Vec<Toast>>,
    form: RwSignal<FormView>,
}

impl RenderTarget for SignalTarget {
    fn render_page(&mut self, page: Page) {
        self.page.set(page);
    }

    fn render_metrics(&mut self, metrics: &Metrics) {
        self.metrics.set(*metrics);
    }

    fn render_list(&mut self, list: &ListView) {
        self.list.set(list.clone());
    }

    fn render_toasts(&mut self, toasts: &[Toast]) {
        self.toasts.set(toasts.to_vec());
    }

    fn render_form(&mut self, form: &FormView) {
        self.form.set(form.clone());
    }
}

/// [`ChartPort`] publishing to a signal on `render`
struct SignalChart {
    pending: ChartDisplay,
    display: RwSignal<ChartDisplay>,
}

impl SignalChart {
    fn new(display: RwSignal<ChartDisplay>) -> Self {
        Self {
            pending: ChartDisplay::Placeholder,
            display,
        }
    }
}

impl ChartPort for SignalChart {
    fn show_series(&mut self, series: &ChartSeries) {
        self.pending = ChartDisplay::Series(series.clone());
    }

    fn show_placeholder(&mut self) {
        self.pending = ChartDisplay::Placeholder;
    }

    fn render(&mut self) {
        self.display.set(self.pending.clone());
    }
}

/// Provide global state to the component tree
pub fn provide_global_state(config: &Config) {
    let page = create_rw_signal(Page::default());
    let metrics = create_rw_signal(Metrics::default());
    let list = create_rw_signal(ListView::default());
    let toasts = create_rw_signal(Vec::new());
    let form = create_rw_signal(FormView::default());
    let status_chart = create_rw_signal(ChartDisplay::Placeholder);
    let weekly_chart = create_rw_signal(ChartDisplay::Placeholder);

    let base = get_api_base(config.api.normalized_base());
    tracing::info!(api_base = %base, "Using report API");

    let ports = Ports {
        target: Box::new(SignalTarget {
            page,
            metrics,
            list,
            toasts,
            form,
        }),
        status_chart: Box::new(SignalChart::new(status_chart)),
        weekly_chart: Box::new(SignalChart::new(weekly_chart)),
    };
    let controller = AppController::new(Rc::new(GlooReportApi::new(&base)), config, ports);

    provide_context(GlobalState {
        controller,
        page,
        metrics,
        list,
        toasts,
        form,
        status_chart,
        weekly_chart,
        loading: create_rw_signal(true),
    });
}

/// Milliseconds since the epoch, for the delete-confirm window
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl GlobalState {
    /// Initial render and first dashboard load
    pub fn start(&self) {
        let state = self.clone();
        spawn_local(async move {
            // Failures are already shown as toasts
            let _ = state.controller.start().await;
            state.loading.set(false);
        });
    }

    pub fn navigate(&self, page: Page) {
        let controller = self.controller.clone();
        spawn_local(async move {
            let _ = controller.navigate(page).await;
        });
    }

    pub fn set_status(&self, id: ReportId, status: Status) {
        let controller = self.controller.clone();
        spawn_local(async move {
            let _ = controller.set_status(&id, status).await;
        });
    }

    /// Press a delete control, scheduling the disarm timer when it arms
    pub fn press_delete(&self, id: ReportId) {
        let controller = self.controller.clone();
        spawn_local(async move {
            if let Ok(DeleteOutcome::Armed {
                generation,
                window_ms,
            }) = controller.press_delete(&id, now_ms()).await
            {
                gloo_timers::callback::Timeout::new(window_ms, move || {
                    controller.expire_delete(&id, generation);
                })
                .forget();
            }
        });
    }

    /// Remove a toast once its display time is over
    pub fn schedule_dismiss(&self, toast: &Toast) {
        let controller = self.controller.clone();
        let id = toast.id;
        gloo_timers::callback::Timeout::new(toast.duration_ms, move || {
            controller.dismiss_toast(id);
        })
        .forget();
    }
}
