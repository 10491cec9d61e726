//! Application controller
//!
//! Owns the application state (report store, current page, delete
//! confirmations, toasts, photo slot) and the injected ports. Every user
//! action goes through here: call the API, refresh the store on success,
//! re-run the render loop, and surface the outcome as a toast.
//!
//! The controller is single-threaded. State lives behind `Rc<RefCell<..>>`
//! and no borrow is ever held across an `.await`.

use futures_util::future::join;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::ReportApi;
use crate::config::Config;
use crate::confirm::{ConfirmBoard, Press};
use crate::error::{ClientError, ClientResult, FileError, ValidationError, NETWORK_ERROR_MESSAGE};
use crate::form::{
    FormView, PhotoCandidate, PhotoPolicy, PhotoSlot, ReadTicket, ReportDraft, SubmitButton,
};
use crate::render::{
    status_breakdown, weekly_volume, ChartPort, DashboardView, ListView, Metrics, RenderTarget,
};
use crate::report::{Report, ReportId, Status};
use crate::store::{ApplyOutcome, ReportStore};
use crate::toast::{Toast, ToastKind, ToastQueue};

/// The two mutually exclusive views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    Report,
    #[default]
    Dashboard,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Report => "Report Issue",
            Page::Dashboard => "Dashboard",
        }
    }
}

/// Result of a reload cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Snapshot replaced and all views re-rendered
    Applied,
    /// A newer reload superseded this one; nothing changed
    Superseded,
}

/// Result of pressing a delete control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Control armed; call [`AppController::expire_delete`] after `window_ms`
    Armed { generation: u64, window_ms: u32 },
    /// Report deleted and the dashboard reloaded
    Deleted,
}

/// State owned by the controller
struct AppState {
    store: ReportStore,
    page: Page,
    confirms: ConfirmBoard,
    toasts: ToastQueue,
    photo: PhotoSlot,
    submitting: bool,
    preview_chars: usize,
}

/// Injected rendering backends
pub struct Ports {
    pub target: Box<dyn RenderTarget>,
    pub status_chart: Box<dyn ChartPort>,
    pub weekly_chart: Box<dyn ChartPort>,
}

/// Single owner of the dashboard state
#[derive(Clone)]
pub struct AppController {
    api: Rc<dyn ReportApi>,
    state: Rc<RefCell<AppState>>,
    ports: Rc<RefCell<Ports>>,
}

impl AppController {
    pub fn new(api: Rc<dyn ReportApi>, config: &Config, ports: Ports) -> Self {
        let state = AppState {
            store: ReportStore::new(),
            page: Page::default(),
            confirms: ConfirmBoard::new(config.ui.delete_confirm_window_ms),
            toasts: ToastQueue::new(config.ui.toast_duration_ms),
            photo: PhotoSlot::new(PhotoPolicy::new(&config.upload)),
            submitting: false,
            preview_chars: config.ui.description_preview_chars,
        };

        Self {
            api,
            state: Rc::new(RefCell::new(state)),
            ports: Rc::new(RefCell::new(ports)),
        }
    }

    // ============ Accessors ============

    pub fn page(&self) -> Page {
        self.state.borrow().page
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> Vec<Report> {
        self.state.borrow().store.reports().to_vec()
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_reports(self.state.borrow().store.reports())
    }

    pub fn dashboard_view(&self) -> DashboardView {
        let state = self.state.borrow();
        DashboardView {
            metrics: Metrics::from_reports(state.store.reports()),
            list: ListView::build(state.store.reports(), &state.confirms, state.preview_chars),
        }
    }

    pub fn form_view(&self) -> FormView {
        let state = self.state.borrow();
        FormView {
            submit: SubmitButton {
                busy: state.submitting,
            },
            photo: state.photo.state().clone(),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.borrow().toasts.visible().to_vec()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().submitting
    }

    // ============ Navigation ============

    /// Draw the initial page and load the dashboard
    pub async fn start(&self) -> ClientResult<ReloadOutcome> {
        tracing::info!("Civic reporter dashboard starting");
        self.render_form();
        self.navigate(Page::Dashboard).await
    }

    /// Switch views; entering the dashboard always reloads it
    pub async fn navigate(&self, page: Page) -> ClientResult<ReloadOutcome> {
        self.state.borrow_mut().page = page;
        self.ports.borrow_mut().target.render_page(page);
        tracing::debug!(page = page.label(), "Navigated");

        match page {
            Page::Dashboard => self.reload().await,
            Page::Report => Ok(ReloadOutcome::Applied),
        }
    }

    // ============ Reload ============

    /// Fetch the full list and weekly stats, replace the snapshot, re-render
    ///
    /// Only the most recently issued reload may change the snapshot.
    pub async fn reload(&self) -> ClientResult<ReloadOutcome> {
        let token = self.state.borrow_mut().store.begin_reload();
        tracing::debug!(token = token.value(), "Reload started");

        let (list, weekly) = join(self.api.list_reports(), self.api.weekly_stats()).await;

        let reports = match list {
            Ok(reports) => reports,
            Err(e) => {
                if !self.state.borrow().store.is_current(token) {
                    return Ok(ReloadOutcome::Superseded);
                }
                tracing::error!(error = %e, "Failed to load reports");
                self.notify(ToastKind::Error, e.user_message("Failed to load reports"));
                return Err(e);
            }
        };

        let weekly_error = {
            let mut state = self.state.borrow_mut();
            if state.store.apply(token, reports) == ApplyOutcome::Stale {
                return Ok(ReloadOutcome::Superseded);
            }

            let weekly_error = match weekly {
                Ok(stats) => {
                    state.store.apply_weekly(token, stats);
                    None
                }
                Err(e) => Some(e),
            };

            let AppState { store, confirms, .. } = &mut *state;
            confirms.retain(store.reports().iter().map(|r| &r.id));
            weekly_error
        };

        self.render_dashboard();

        if let Some(e) = weekly_error {
            tracing::warn!(error = %e, "Failed to load weekly stats");
            self.notify(ToastKind::Error, e.user_message("Failed to load weekly stats"));
        }

        tracing::info!(count = self.state.borrow().store.len(), "Reports reloaded");
        Ok(ReloadOutcome::Applied)
    }

    /// Metrics, both charts, then the list, in that order
    fn render_dashboard(&self) {
        let view = self.dashboard_view();
        let weekly = *self.state.borrow().store.weekly();

        let ports = &mut *self.ports.borrow_mut();
        ports.target.render_metrics(&view.metrics);
        status_breakdown(&view.metrics).draw(ports.status_chart.as_mut());
        weekly_volume(&weekly).draw(ports.weekly_chart.as_mut());
        ports.target.render_list(&view.list);
    }

    fn render_list(&self) {
        let list = self.dashboard_view().list;
        self.ports.borrow_mut().target.render_list(&list);
    }

    fn render_form(&self) {
        let form = self.form_view();
        self.ports.borrow_mut().target.render_form(&form);
    }

    fn render_toasts(&self) {
        let toasts = self.toasts();
        self.ports.borrow_mut().target.render_toasts(&toasts);
    }

    // ============ Notifications ============

    /// Show a toast; the host dismisses it after `duration_ms`
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) -> Toast {
        let toast = self.state.borrow_mut().toasts.push(kind, message);
        self.render_toasts();
        toast
    }

    pub fn dismiss_toast(&self, id: u64) {
        if self.state.borrow_mut().toasts.dismiss(id) {
            self.render_toasts();
        }
    }

    /// Last-resort handler for errors nobody caught: logged, never shown
    pub fn report_uncaught(&self, message: &str) {
        tracing::error!(error = message, "Uncaught error");
    }

    // ============ Submission ============

    /// Validate and submit the form with the attached photo, if any
    ///
    /// On success the photo slot is cleared and the dashboard is shown.
    /// On failure the caller keeps the draft so nothing typed is lost.
    pub async fn submit(&self, draft: &ReportDraft) -> ClientResult<Report> {
        if self.is_submitting() {
            tracing::debug!("Submit ignored: request already in flight");
            return Err(ValidationError::SubmissionInFlight.into());
        }

        let new_report = match draft.validate() {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "Report validation failed");
                self.notify(ToastKind::Error, e.to_string());
                return Err(e.into());
            }
        };

        if self.state.borrow().photo.state().is_reading() {
            let e = ValidationError::PhotoLoading;
            tracing::warn!("Submit blocked: photo still loading");
            self.notify(ToastKind::Error, e.to_string());
            return Err(e.into());
        }

        let photo = self.state.borrow().photo.upload().cloned();
        self.set_submitting(true);

        let result = self.api.create_report(&new_report, photo.as_ref()).await;

        self.set_submitting(false);

        match result {
            Ok(report) => {
                tracing::info!(
                    report_id = %report.id,
                    issue_type = %report.issue_type,
                    with_photo = photo.is_some(),
                    "Report submitted"
                );
                self.notify(ToastKind::Success, "Report submitted successfully!");
                self.state.borrow_mut().photo.clear();
                self.render_form();
                // Reload failures are already surfaced as toasts
                let _ = self.navigate(Page::Dashboard).await;
                Ok(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "Submit failed");
                let fallback = if e.is_network() {
                    NETWORK_ERROR_MESSAGE
                } else {
                    "Failed to submit report"
                };
                self.notify(ToastKind::Error, e.user_message(fallback));
                Err(e)
            }
        }
    }

    fn set_submitting(&self, busy: bool) {
        self.state.borrow_mut().submitting = busy;
        self.render_form();
    }

    // ============ Photo ============

    /// Validate a picked or dropped file
    ///
    /// On success the host reads the file and reports back with
    /// [`photo_loaded`](Self::photo_loaded) or [`photo_failed`](Self::photo_failed).
    pub fn select_photo(&self, candidate: &PhotoCandidate) -> Result<ReadTicket, FileError> {
        let result = self.state.borrow_mut().photo.select(candidate);
        if let Err(e) = &result {
            tracing::warn!(file = %candidate.file_name, error = %e, "Photo rejected");
            self.notify(ToastKind::Error, e.to_string());
        }
        self.render_form();
        result
    }

    pub fn photo_loaded(&self, ticket: ReadTicket, preview_url: String, bytes: Vec<u8>) {
        let applied = self
            .state
            .borrow_mut()
            .photo
            .preview_ready(ticket, preview_url, bytes);
        if applied {
            self.render_form();
        } else {
            tracing::debug!("Dropping preview of a superseded photo selection");
        }
    }

    pub fn photo_failed(&self, ticket: ReadTicket, reason: &str) {
        if self.state.borrow_mut().photo.read_failed(ticket) {
            let e = FileError::Unreadable(reason.to_string());
            tracing::error!(error = reason, "Failed to read photo");
            self.notify(ToastKind::Error, e.to_string());
            self.render_form();
        }
    }

    pub fn remove_photo(&self) {
        self.state.borrow_mut().photo.clear();
        self.render_form();
    }

    // ============ Status ============

    /// Request a status change, then reload
    pub async fn set_status(&self, id: &ReportId, status: Status) -> ClientResult<()> {
        match self.api.set_status(id, status).await {
            Ok(()) => {
                tracing::info!(report_id = %id, status = %status, "Status updated");
                self.notify(ToastKind::Success, format!("Report marked as {}", status));
                let _ = self.reload().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(report_id = %id, error = %e, "Failed to update status");
                self.notify(ToastKind::Error, e.user_message("Failed to update status"));
                Err(e)
            }
        }
    }

    /// Flip a report between Active and Resolved based on the snapshot
    pub async fn toggle_status(&self, id: &ReportId) -> ClientResult<Status> {
        let current = self
            .state
            .borrow()
            .store
            .reports()
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.status);

        let Some(current) = current else {
            tracing::warn!(report_id = %id, "Toggle requested for unknown report");
            self.notify(ToastKind::Error, "Failed to update status");
            return Err(ClientError::Server {
                status: 404,
                message: None,
            });
        };

        let target = current.toggled();
        self.set_status(id, target).await?;
        Ok(target)
    }

    // ============ Delete ============

    /// Handle a click on the delete control of `id`
    ///
    /// The first click arms the control; a second click within the window
    /// deletes the report.
    pub async fn press_delete(&self, id: &ReportId, now_ms: i64) -> ClientResult<DeleteOutcome> {
        let (press, window_ms) = {
            let mut state = self.state.borrow_mut();
            let press = state.confirms.press(id, now_ms);
            (press, state.confirms.window_ms())
        };
        self.render_list();

        match press {
            Press::Armed { generation } => {
                tracing::debug!(report_id = %id, generation, "Delete armed");
                Ok(DeleteOutcome::Armed {
                    generation,
                    window_ms,
                })
            }
            Press::Confirmed => self.delete(id).await.map(|_| DeleteOutcome::Deleted),
        }
    }

    /// Timer callback for an armed delete control
    pub fn expire_delete(&self, id: &ReportId, generation: u64) -> bool {
        let expired = self.state.borrow_mut().confirms.expire(id, generation);
        if expired {
            self.render_list();
        }
        expired
    }

    async fn delete(&self, id: &ReportId) -> ClientResult<()> {
        match self.api.delete_report(id).await {
            Ok(()) => {
                tracing::info!(report_id = %id, "Report deleted");
                self.notify(ToastKind::Success, "Report deleted successfully");
                let _ = self.reload().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(report_id = %id, error = %e, "Failed to delete report");
                self.notify(ToastKind::Error, e.user_message("Failed to delete report"));
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for AppController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AppController")
            .field("page", &state.page)
            .field("reports", &state.store.len())
            .field("submitting", &state.submitting)
            .finish()
    }
}
