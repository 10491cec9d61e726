//! Native HTTP client for the report API

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;

use super::dto::{CreateReportResponse, ErrorBody, StatsResponse, StatusUpdate};
use super::{fields, Endpoints, ReportApi};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::report::{NewReport, PhotoUpload, Report, ReportId, Status, WeeklyStats};

/// `reqwest`-backed [`ReportApi`]
#[derive(Debug, Clone)]
pub struct HttpReportApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpReportApi {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: Endpoints::new(config.normalized_base()),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Map a transport failure onto the client taxonomy
fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Network("Request timeout".to_string())
    } else if e.is_connect() {
        ClientError::Network(format!("Server unavailable: {}", e))
    } else {
        ClientError::Network(e.to_string())
    }
}

/// Turn a non-2xx response into `ClientError::Server`, keeping the body's message
async fn check_status(response: Response) -> ClientResult<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status,
        message: ErrorBody::message_from(&text),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ReportApi for HttpReportApi {
    async fn list_reports(&self) -> ClientResult<Vec<Report>> {
        let response = self
            .client
            .get(self.endpoints.reports())
            .send()
            .await
            .map_err(transport_error)?;

        let reports: Vec<Report> = decode(check_status(response).await?).await?;
        tracing::debug!(count = reports.len(), "Fetched reports");
        Ok(reports)
    }

    async fn create_report(
        &self,
        report: &NewReport,
        photo: Option<&PhotoUpload>,
    ) -> ClientResult<Report> {
        let mut form = multipart::Form::new()
            .text(fields::ISSUE_TYPE, report.issue_type.clone())
            .text(fields::DESCRIPTION, report.description.clone())
            .text(fields::LOCATION, report.location.clone());

        if let Some(photo) = photo {
            let part = multipart::Part::bytes(photo.bytes.clone())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.mime_type)
                .map_err(|e| ClientError::Decode(format!("Invalid photo type: {}", e)))?;
            form = form.part(fields::PHOTO, part);
        }

        let response = self
            .client
            .post(self.endpoints.reports())
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let created: CreateReportResponse = decode(check_status(response).await?).await?;
        if let Some(message) = created.message() {
            tracing::debug!(backend_message = message, "Backend confirmed report creation");
        }
        Ok(created.into_report())
    }

    async fn set_status(&self, id: &ReportId, status: Status) -> ClientResult<()> {
        let response = self
            .client
            .put(self.endpoints.status(id))
            .json(&StatusUpdate { status })
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        Ok(())
    }

    async fn delete_report(&self, id: &ReportId) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.endpoints.report(id))
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response).await?;
        Ok(())
    }

    async fn weekly_stats(&self) -> ClientResult<WeeklyStats> {
        let response = self
            .client
            .get(self.endpoints.stats())
            .send()
            .await
            .map_err(transport_error)?;

        let stats: StatsResponse = decode(check_status(response).await?).await?;
        Ok(stats.weekly_data)
    }
}
