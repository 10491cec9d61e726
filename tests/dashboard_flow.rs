//! End-to-end dashboard behaviour with an in-memory backend and recording ports

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use civic_reporter::api::ReportApi;
use civic_reporter::confirm::{ARMED_LABEL, IDLE_LABEL};
use civic_reporter::form::{FormView, PhotoCandidate, PhotoState, ReportDraft};
use civic_reporter::render::{
    ChartPort, ChartSeries, HtmlRenderTarget, ListView, Metrics, RenderTarget,
};
use civic_reporter::toast::{Toast, ToastKind};
use civic_reporter::{
    AppController, ClientError, ClientResult, Config, DeleteOutcome, FileError, IssueType,
    NewReport, Page, PhotoUpload, Ports, ReloadOutcome, Report, ReportId, Status,
    ValidationError, WeeklyStats,
};

const MIB: u64 = 1024 * 1024;

// ============ Fake backend ============

#[derive(Default)]
struct FakeApi {
    reports: RefCell<Vec<Report>>,
    weekly: Cell<WeeklyStats>,
    next_id: Cell<u64>,
    created: RefCell<Vec<(NewReport, Option<PhotoUpload>)>>,
    list_calls: Cell<usize>,
    delete_calls: Cell<usize>,
    list_gate: RefCell<Option<oneshot::Receiver<()>>>,
    fail_list: Cell<bool>,
    fail_weekly: Cell<bool>,
    create_error: RefCell<Option<ClientError>>,
}

impl FakeApi {
    fn with_reports(reports: Vec<Report>) -> Self {
        let api = FakeApi::default();
        api.next_id.set(reports.len() as u64 + 100);
        *api.reports.borrow_mut() = reports;
        api
    }
}

#[async_trait(?Send)]
impl ReportApi for FakeApi {
    async fn list_reports(&self) -> ClientResult<Vec<Report>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_list.get() {
            return Err(ClientError::Network("connection refused".to_string()));
        }

        let snapshot = self.reports.borrow().clone();
        let gate = self.list_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(snapshot)
    }

    async fn create_report(
        &self,
        report: &NewReport,
        photo: Option<&PhotoUpload>,
    ) -> ClientResult<Report> {
        self.created
            .borrow_mut()
            .push((report.clone(), photo.cloned()));

        if let Some(e) = self.create_error.borrow().clone() {
            return Err(e);
        }

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let created = Report {
            id: ReportId::from(id),
            issue_type: IssueType::from_label(&report.issue_type),
            description: report.description.clone(),
            location: report.location.clone(),
            status: Status::Active,
            image_url: photo.map(|p| format!("/static/uploads/{}", p.file_name)),
            time_ago: "Just now".to_string(),
            created_at: None,
        };
        self.reports.borrow_mut().insert(0, created.clone());
        Ok(created)
    }

    async fn set_status(&self, id: &ReportId, status: Status) -> ClientResult<()> {
        let mut reports = self.reports.borrow_mut();
        match reports.iter_mut().find(|r| &r.id == id) {
            Some(report) => {
                report.status = status;
                Ok(())
            }
            None => Err(ClientError::Server {
                status: 404,
                message: Some("Report not found".to_string()),
            }),
        }
    }

    async fn delete_report(&self, id: &ReportId) -> ClientResult<()> {
        self.delete_calls.set(self.delete_calls.get() + 1);
        self.reports.borrow_mut().retain(|r| &r.id != id);
        Ok(())
    }

    async fn weekly_stats(&self) -> ClientResult<WeeklyStats> {
        if self.fail_weekly.get() {
            return Err(ClientError::Server {
                status: 500,
                message: None,
            });
        }
        Ok(self.weekly.get())
    }
}

// ============ Recording ports ============

#[derive(Default)]
struct Screen {
    events: Vec<&'static str>,
    html: HtmlRenderTarget,
    page: Option<Page>,
    metrics: Metrics,
    list: ListView,
    toasts: Vec<Toast>,
    submit_labels: Vec<&'static str>,
    photo: PhotoState,
    status_chart: Option<ChartSeries>,
    status_placeholder: bool,
    weekly_chart: Option<ChartSeries>,
}

struct ScreenTarget(Rc<RefCell<Screen>>);

impl RenderTarget for ScreenTarget {
    fn render_page(&mut self, page: Page) {
        let mut screen = self.0.borrow_mut();
        screen.events.push("page");
        screen.page = Some(page);
        screen.html.render_page(page);
    }

    fn render_metrics(&mut self, metrics: &Metrics) {
        let mut screen = self.0.borrow_mut();
        screen.events.push("metrics");
        screen.metrics = *metrics;
        screen.html.render_metrics(metrics);
    }

    fn render_list(&mut self, list: &ListView) {
        let mut screen = self.0.borrow_mut();
        screen.events.push("list");
        screen.list = list.clone();
        screen.html.render_list(list);
    }

    fn render_toasts(&mut self, toasts: &[Toast]) {
        let mut screen = self.0.borrow_mut();
        screen.events.push("toasts");
        screen.toasts = toasts.to_vec();
        screen.html.render_toasts(toasts);
    }

    fn render_form(&mut self, form: &FormView) {
        let mut screen = self.0.borrow_mut();
        screen.events.push("form");
        screen.submit_labels.push(form.submit.label());
        screen.photo = form.photo.clone();
        screen.html.render_form(form);
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ChartKind {
    Status,
    Weekly,
}

struct ChartRecorder {
    kind: ChartKind,
    screen: Rc<RefCell<Screen>>,
}

impl ChartPort for ChartRecorder {
    fn show_series(&mut self, series: &ChartSeries) {
        let mut screen = self.screen.borrow_mut();
        match self.kind {
            ChartKind::Status => {
                screen.status_chart = Some(series.clone());
                screen.status_placeholder = false;
            }
            ChartKind::Weekly => screen.weekly_chart = Some(series.clone()),
        }
    }

    fn show_placeholder(&mut self) {
        if self.kind == ChartKind::Status {
            let mut screen = self.screen.borrow_mut();
            screen.status_chart = None;
            screen.status_placeholder = true;
        }
    }

    fn render(&mut self) {
        let event = match self.kind {
            ChartKind::Status => "status_chart",
            ChartKind::Weekly => "weekly_chart",
        };
        self.screen.borrow_mut().events.push(event);
    }
}

// ============ Helpers ============

fn report(id: u64, status: Status, description: &str) -> Report {
    Report {
        id: ReportId::from(id),
        issue_type: IssueType::GarbageDumping,
        description: description.to_string(),
        location: "Market Square".to_string(),
        status,
        image_url: None,
        time_ago: format!("{} hours ago", id),
        created_at: None,
    }
}

fn five_reports() -> Vec<Report> {
    vec![
        report(1, Status::Active, "Bins overflowing"),
        report(2, Status::Active, "Fly-tipping behind the school"),
        report(3, Status::Resolved, "Broken glass on the path"),
        report(4, Status::Active, "Mattress left on the kerb"),
        report(5, Status::Resolved, "Litter along the canal"),
    ]
}

fn setup(reports: Vec<Report>) -> (AppController, Rc<FakeApi>, Rc<RefCell<Screen>>) {
    let api = Rc::new(FakeApi::with_reports(reports));
    let screen = Rc::new(RefCell::new(Screen::default()));
    let ports = Ports {
        target: Box::new(ScreenTarget(screen.clone())),
        status_chart: Box::new(ChartRecorder {
            kind: ChartKind::Status,
            screen: screen.clone(),
        }),
        weekly_chart: Box::new(ChartRecorder {
            kind: ChartKind::Weekly,
            screen: screen.clone(),
        }),
    };
    let controller = AppController::new(api.clone(), &Config::default(), ports);
    (controller, api, screen)
}

fn draft(issue_type: &str, description: &str) -> ReportDraft {
    ReportDraft {
        issue_type: issue_type.to_string(),
        description: description.to_string(),
        location: String::new(),
    }
}

fn last_toast(screen: &Rc<RefCell<Screen>>) -> Toast {
    screen.borrow().toasts.last().cloned().unwrap()
}

// ============ Tests ============

#[tokio::test]
async fn test_metrics_and_status_breakdown() {
    let (controller, _api, screen) = setup(five_reports());

    assert_eq!(controller.start().await.unwrap(), ReloadOutcome::Applied);

    let metrics = controller.metrics();
    assert_eq!(metrics, Metrics { total: 5, active: 3, resolved: 2 });
    assert_eq!(metrics.total, metrics.active + metrics.resolved);

    let screen = screen.borrow();
    assert_eq!(screen.metrics, metrics);
    assert!(screen.html.metrics_html.contains("5 reports"));

    let chart = screen.status_chart.as_ref().unwrap();
    assert_eq!(chart.values, vec![3, 2]);
    assert!((chart.percent(0) - 60.0).abs() < 1e-9);
    assert!((chart.percent(1) - 40.0).abs() < 1e-9);
    assert_eq!(chart.tooltip(1).unwrap(), "Resolved: 2 (40.0%)");
}

#[tokio::test]
async fn test_reload_renders_in_order() {
    let (controller, api, screen) = setup(five_reports());
    api.weekly.set(WeeklyStats([0, 2, 1, 0, 0, 3, 0]));

    controller.reload().await.unwrap();

    let screen = screen.borrow();
    assert_eq!(
        screen.events,
        vec!["metrics", "status_chart", "weekly_chart", "list"]
    );
    assert_eq!(screen.weekly_chart.as_ref().unwrap().values, vec![0, 2, 1, 0, 0, 3, 0]);
    assert_eq!(screen.list.rows.len(), 5);
    assert_eq!(screen.list.rows[0].id, ReportId::from(1));
}

#[tokio::test]
async fn test_empty_dashboard_shows_placeholder() {
    let (controller, _api, screen) = setup(Vec::new());

    controller.start().await.unwrap();

    let screen = screen.borrow();
    assert!(screen.status_placeholder);
    assert!(screen.status_chart.is_none());
    assert!(screen.html.empty_state);
    assert!(screen.weekly_chart.is_some());
}

#[tokio::test]
async fn test_invalid_submit_sends_no_request() {
    let (controller, api, screen) = setup(Vec::new());

    let err = controller.submit(&draft("Garbage Dumping", "  ")).await.unwrap_err();
    assert_eq!(err, ClientError::Validation(ValidationError::MissingDescription));
    assert_eq!(last_toast(&screen).message, "Please provide a description");

    let err = controller.submit(&draft("", "Dumped sofa")).await.unwrap_err();
    assert_eq!(err, ClientError::Validation(ValidationError::MissingIssueType));
    assert_eq!(last_toast(&screen).kind, ToastKind::Error);

    assert!(api.created.borrow().is_empty());
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_photo_size_limit() {
    let (controller, api, screen) = setup(Vec::new());

    let oversized = PhotoCandidate {
        file_name: "huge.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        size: 6 * MIB,
    };
    let err = controller.select_photo(&oversized).unwrap_err();
    assert!(matches!(err, FileError::TooLarge { .. }));
    assert_eq!(last_toast(&screen).message, "File size must be less than 5MB");
    assert_eq!(screen.borrow().photo, PhotoState::Empty);

    let accepted = PhotoCandidate {
        file_name: "kerb.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        size: 4 * MIB,
    };
    let ticket = controller.select_photo(&accepted).unwrap();
    assert!(matches!(screen.borrow().photo, PhotoState::Reading { .. }));

    controller.photo_loaded(ticket, "blob:kerb".to_string(), vec![7; (4 * MIB) as usize]);
    assert_eq!(
        screen.borrow().photo,
        PhotoState::Preview {
            file_name: "kerb.jpg".to_string(),
            preview_url: "blob:kerb".to_string(),
        }
    );

    controller
        .submit(&draft("Garbage Dumping", "Mattress on the kerb"))
        .await
        .unwrap();

    let created = api.created.borrow();
    let (sent, photo) = &created[0];
    assert_eq!(sent.location, "Not specified");
    let photo = photo.as_ref().unwrap();
    assert_eq!(photo.file_name, "kerb.jpg");
    assert_eq!(photo.bytes.len() as u64, 4 * MIB);
}

#[tokio::test]
async fn test_submit_blocked_while_photo_loading() {
    let (controller, api, screen) = setup(Vec::new());
    controller.navigate(Page::Report).await.unwrap();

    let photo = PhotoCandidate {
        file_name: "bins.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        size: MIB,
    };
    let ticket = controller.select_photo(&photo).unwrap();
    assert!(controller.form_view().submit_disabled());

    let err = controller
        .submit(&draft("Garbage Dumping", "Overflowing bins"))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::Validation(ValidationError::PhotoLoading));
    assert_eq!(last_toast(&screen).message, "Photo is still loading, please wait");
    assert!(api.created.borrow().is_empty());
    assert!(matches!(screen.borrow().photo, PhotoState::Reading { .. }));
    assert_eq!(controller.page(), Page::Report);

    // Once the read lands the same draft goes out with the photo
    controller.photo_loaded(ticket, "blob:bins".to_string(), vec![1; 16]);
    controller
        .submit(&draft("Garbage Dumping", "Overflowing bins"))
        .await
        .unwrap();

    let created = api.created.borrow();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].1.as_ref().unwrap().file_name, "bins.jpg");
    assert_eq!(screen.borrow().photo, PhotoState::Empty);
}

#[tokio::test]
async fn test_wrong_photo_type_rejected() {
    let (controller, api, screen) = setup(Vec::new());

    let gif = PhotoCandidate {
        file_name: "anim.gif".to_string(),
        mime_type: "image/gif".to_string(),
        size: 1024,
    };
    assert!(controller.select_photo(&gif).is_err());
    assert_eq!(last_toast(&screen).message, "Only JPG and PNG files are allowed");

    controller
        .submit(&draft("Wrong Parking", "Van on the zebra crossing"))
        .await
        .unwrap();
    assert!(api.created.borrow()[0].1.is_none());
}

#[tokio::test]
async fn test_submit_success_flow() {
    let (controller, api, screen) = setup(five_reports());
    controller.navigate(Page::Report).await.unwrap();
    assert_eq!(controller.page(), Page::Report);

    let report = controller
        .submit(&draft("Broken Streetlight", "Lamp out on Elm Road"))
        .await
        .unwrap();

    assert_eq!(report.issue_type, IssueType::BrokenStreetlight);
    assert_eq!(controller.page(), Page::Dashboard);
    assert_eq!(controller.snapshot()[0].id, report.id);
    assert_eq!(controller.metrics().total, 6);
    assert_eq!(api.list_calls.get(), 1);

    let screen = screen.borrow();
    assert_eq!(screen.page, Some(Page::Dashboard));
    assert!(screen.submit_labels.contains(&"Submitting..."));
    assert_eq!(screen.submit_labels.last(), Some(&"Submit Report"));
    assert!(screen
        .toasts
        .iter()
        .any(|t| t.kind == ToastKind::Success && t.message == "Report submitted successfully!"));
}

#[tokio::test]
async fn test_submit_failure_keeps_form_usable() {
    let (controller, api, screen) = setup(Vec::new());
    controller.navigate(Page::Report).await.unwrap();

    *api.create_error.borrow_mut() = Some(ClientError::Server {
        status: 400,
        message: Some("Invalid file type. Only JPG and PNG allowed".to_string()),
    });
    controller
        .submit(&draft("Garbage Dumping", "Bags by the gate"))
        .await
        .unwrap_err();
    assert_eq!(
        last_toast(&screen).message,
        "Invalid file type. Only JPG and PNG allowed"
    );
    assert!(!controller.is_submitting());
    assert_eq!(controller.page(), Page::Report);

    *api.create_error.borrow_mut() = Some(ClientError::Network("offline".to_string()));
    controller
        .submit(&draft("Garbage Dumping", "Bags by the gate"))
        .await
        .unwrap_err();
    assert_eq!(
        last_toast(&screen).message,
        "Network error. Please check your connection."
    );

    *api.create_error.borrow_mut() = Some(ClientError::Server {
        status: 502,
        message: None,
    });
    controller
        .submit(&draft("Garbage Dumping", "Bags by the gate"))
        .await
        .unwrap_err();
    assert_eq!(last_toast(&screen).message, "Failed to submit report");
    assert_eq!(screen.borrow().submit_labels.last(), Some(&"Submit Report"));
}

#[tokio::test]
async fn test_toggle_twice_restores_row() {
    let (controller, _api, screen) = setup(five_reports());
    controller.start().await.unwrap();
    let original = controller.dashboard_view().list;
    let id = ReportId::from(1);

    assert_eq!(controller.toggle_status(&id).await.unwrap(), Status::Resolved);
    assert_eq!(last_toast(&screen).message, "Report marked as Resolved");
    assert_eq!(controller.metrics().resolved, 3);
    assert_ne!(controller.dashboard_view().list, original);

    assert_eq!(controller.toggle_status(&id).await.unwrap(), Status::Active);
    assert_eq!(last_toast(&screen).message, "Report marked as Active");
    assert_eq!(controller.dashboard_view().list, original);
    assert_eq!(screen.borrow().list, original);
}

#[tokio::test]
async fn test_status_failure_toast() {
    let (controller, _api, screen) = setup(five_reports());
    controller.start().await.unwrap();

    let err = controller
        .set_status(&ReportId::from(42), Status::Resolved)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 404, .. }));
    assert_eq!(last_toast(&screen).message, "Report not found");
}

#[tokio::test]
async fn test_delete_confirm_expires() {
    let (controller, api, screen) = setup(five_reports());
    controller.start().await.unwrap();
    let id = ReportId::from(3);

    let outcome = controller.press_delete(&id, 0).await.unwrap();
    let DeleteOutcome::Armed { generation, window_ms } = outcome else {
        panic!("expected armed, got {:?}", outcome);
    };
    assert_eq!(window_ms, 3000);
    assert_eq!(screen.borrow().list.rows[2].delete.label, ARMED_LABEL);
    assert_eq!(screen.borrow().list.rows[0].delete.label, IDLE_LABEL);

    // Timer fires after the window with no second click
    assert!(controller.expire_delete(&id, generation));
    assert_eq!(screen.borrow().list.rows[2].delete.label, IDLE_LABEL);
    assert!(!controller.expire_delete(&id, generation));

    // A second click 4s later re-arms instead of deleting
    controller.press_delete(&id, 10_000).await.unwrap();
    let outcome = controller.press_delete(&id, 14_000).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Armed { .. }));

    assert_eq!(api.delete_calls.get(), 0);
    assert_eq!(controller.metrics().total, 5);
}

#[tokio::test]
async fn test_delete_confirm_within_window() {
    let (controller, api, screen) = setup(five_reports());
    controller.start().await.unwrap();
    let id = ReportId::from(3);
    let other = ReportId::from(4);

    let first = controller.press_delete(&id, 1_000).await.unwrap();
    controller.press_delete(&other, 1_200).await.unwrap();
    assert!(matches!(first, DeleteOutcome::Armed { .. }));

    let outcome = controller.press_delete(&id, 3_500).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(api.delete_calls.get(), 1);
    assert_eq!(last_toast(&screen).message, "Report deleted successfully");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len(), 4);
    assert!(snapshot.iter().all(|r| r.id != id));

    // Other armed controls are unaffected
    let list = controller.dashboard_view().list;
    let other_row = list.rows.iter().find(|r| r.id == other).unwrap();
    assert!(other_row.delete.armed);
}

#[tokio::test]
async fn test_delete_ignores_clock_going_backwards() {
    let (controller, api, _screen) = setup(five_reports());
    controller.start().await.unwrap();
    let id = ReportId::from(2);

    controller.press_delete(&id, 10_000).await.unwrap();
    let outcome = controller.press_delete(&id, -1_000_000).await.unwrap();

    assert!(matches!(outcome, DeleteOutcome::Armed { .. }));
    assert_eq!(api.delete_calls.get(), 0);
    assert_eq!(controller.metrics().total, 5);
}

#[tokio::test]
async fn test_script_description_rendered_as_text() {
    let (controller, _api, screen) = setup(vec![report(
        9,
        Status::Active,
        "<script>alert(1)</script>",
    )]);

    controller.start().await.unwrap();

    let screen = screen.borrow();
    let html = &screen.html.list_html;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert_eq!(screen.list.rows[0].excerpt, "<script>alert(1)</script>");
}

#[tokio::test]
async fn test_stale_reload_is_discarded() {
    let (controller, api, screen) = setup(five_reports());
    let (release, gate) = oneshot::channel();
    *api.list_gate.borrow_mut() = Some(gate);

    let slow = controller.reload();
    let fast = async {
        *api.reports.borrow_mut() = vec![report(8, Status::Resolved, "Cleared overnight")];
        let outcome = controller.reload().await;
        let _ = release.send(());
        outcome
    };

    // Polled in order: the slow reload issues its request first
    let (slow, fast) = futures_util::future::join(slow, fast).await;

    assert_eq!(fast.unwrap(), ReloadOutcome::Applied);
    assert_eq!(slow.unwrap(), ReloadOutcome::Superseded);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, ReportId::from(8));
    assert_eq!(screen.borrow().metrics.total, 1);
}

#[tokio::test]
async fn test_list_failure_leaves_snapshot() {
    let (controller, api, screen) = setup(five_reports());
    controller.start().await.unwrap();

    api.fail_list.set(true);
    *api.reports.borrow_mut() = Vec::new();
    let err = controller.reload().await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(controller.snapshot().len(), 5);
    assert_eq!(screen.borrow().list.rows.len(), 5);
    assert_eq!(last_toast(&screen).message, "Failed to load reports");
}

#[tokio::test]
async fn test_weekly_failure_keeps_previous_stats() {
    let (controller, api, screen) = setup(five_reports());
    api.weekly.set(WeeklyStats([1, 1, 1, 1, 1, 0, 0]));
    controller.start().await.unwrap();

    api.fail_weekly.set(true);
    api.weekly.set(WeeklyStats([9; 7]));
    assert_eq!(controller.reload().await.unwrap(), ReloadOutcome::Applied);

    let screen = screen.borrow();
    assert_eq!(
        screen.weekly_chart.as_ref().unwrap().values,
        vec![1, 1, 1, 1, 1, 0, 0]
    );
    assert_eq!(
        screen.toasts.last().unwrap().message,
        "Failed to load weekly stats"
    );
}

#[tokio::test]
async fn test_navigation_reloads_dashboard() {
    let (controller, api, screen) = setup(five_reports());

    controller.navigate(Page::Report).await.unwrap();
    assert_eq!(api.list_calls.get(), 0);
    assert_eq!(screen.borrow().html.page, Some(Page::Report));

    controller.navigate(Page::Dashboard).await.unwrap();
    controller.navigate(Page::Dashboard).await.unwrap();
    assert_eq!(api.list_calls.get(), 2);
}

#[tokio::test]
async fn test_toasts_dismiss() {
    let (controller, _api, screen) = setup(Vec::new());

    let first = controller.notify(ToastKind::Info, "Loading");
    controller.notify(ToastKind::Success, "Done");
    assert_eq!(controller.toasts().len(), 2);
    assert_eq!(first.duration_ms, 3000);

    controller.dismiss_toast(first.id);
    assert_eq!(screen.borrow().toasts.len(), 1);
    assert_eq!(screen.borrow().toasts[0].message, "Done");
}
