//! HTTP API Client
//!
//! `gloo-net` implementation of the report API for the browser.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use civic_reporter::api::{fields, CreateReportResponse, Endpoints, ErrorBody, ReportApi, StatsResponse, StatusUpdate};
use civic_reporter::{ClientError, ClientResult, NewReport, PhotoUpload, Report, ReportId, Status, WeeklyStats};

/// Local storage key overriding the API base path
pub const API_BASE_KEY: &str = "civic_api_base";

/// Get the API base from local storage, or `default` when unset
pub fn get_api_base(default: &str) -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Browser [`ReportApi`] backed by `fetch`
#[derive(Debug, Clone)]
pub struct GlooReportApi {
    endpoints: Endpoints,
}

impl GlooReportApi {
    pub fn new(base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(base),
        }
    }
}

fn network_error(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::Decode(format!("{}: {:?}", context, e))
}

/// Read the body, turning non-2xx responses into `ClientError::Server`
async fn body_text(response: Response) -> ClientResult<String> {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if !response.ok() {
        return Err(ClientError::Server {
            status,
            message: ErrorBody::message_from(&text),
        });
    }
    Ok(text)
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let text = body_text(response).await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Multipart body for `POST /reports`
fn report_form(report: &NewReport, photo: Option<&PhotoUpload>) -> ClientResult<FormData> {
    let form = FormData::new().map_err(|e| js_error("FormData", e))?;
    form.append_with_str(fields::ISSUE_TYPE, &report.issue_type)
        .and_then(|_| form.append_with_str(fields::DESCRIPTION, &report.description))
        .and_then(|_| form.append_with_str(fields::LOCATION, &report.location))
        .map_err(|e| js_error("FormData", e))?;

    if let Some(photo) = photo {
        let bytes = js_sys::Uint8Array::from(photo.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&photo.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| js_error("Blob", e))?;
        form.append_with_blob_and_filename(fields::PHOTO, &blob, &photo.file_name)
            .map_err(|e| js_error("FormData", e))?;
    }

    Ok(form)
}

#[async_trait(?Send)]
impl ReportApi for GlooReportApi {
    async fn list_reports(&self) -> ClientResult<Vec<Report>> {
        let response = Request::get(&self.endpoints.reports())
            .send()
            .await
            .map_err(network_error)?;

        let reports: Vec<Report> = decode(response).await?;
        tracing::debug!(count = reports.len(), "Fetched reports");
        Ok(reports)
    }

    async fn create_report(
        &self,
        report: &NewReport,
        photo: Option<&PhotoUpload>,
    ) -> ClientResult<Report> {
        let form = report_form(report, photo)?;

        let response = Request::post(&self.endpoints.reports())
            .body(form)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        let created: CreateReportResponse = decode(response).await?;
        if let Some(message) = created.message() {
            tracing::debug!(backend_message = message, "Backend confirmed report creation");
        }
        Ok(created.into_report())
    }

    async fn set_status(&self, id: &ReportId, status: Status) -> ClientResult<()> {
        let response = Request::put(&self.endpoints.status(id))
            .json(&StatusUpdate { status })
            .map_err(|e| ClientError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        body_text(response).await?;
        Ok(())
    }

    async fn delete_report(&self, id: &ReportId) -> ClientResult<()> {
        let response = Request::delete(&self.endpoints.report(id))
            .send()
            .await
            .map_err(network_error)?;

        body_text(response).await?;
        Ok(())
    }

    async fn weekly_stats(&self) -> ClientResult<WeeklyStats> {
        let response = Request::get(&self.endpoints.stats())
            .send()
            .await
            .map_err(network_error)?;

        let stats: StatsResponse = decode(response).await?;
        Ok(stats.weekly_data)
    }
}
