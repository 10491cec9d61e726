//! Report Store
//!
//! Holds the one authoritative snapshot of all reports. The snapshot is only
//! ever replaced wholesale, and only by the most recently issued reload, so a
//! slow response from an earlier reload can never overwrite newer data.

use crate::report::{Report, Status, WeeklyStats};

/// Identifies one reload cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReloadToken(u64);

impl ReloadToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Outcome of applying a fetched payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer reload was issued after this one; the payload was dropped
    Stale,
}

/// In-memory snapshot of the backend's reports
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
    weekly: WeeklyStats,
    latest_token: u64,
    loaded: bool,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the token for a new reload
    pub fn begin_reload(&mut self) -> ReloadToken {
        self.latest_token += 1;
        ReloadToken(self.latest_token)
    }

    pub fn is_current(&self, token: ReloadToken) -> bool {
        token.0 == self.latest_token
    }

    /// Replace the snapshot if `token` is still the latest reload
    pub fn apply(&mut self, token: ReloadToken, reports: Vec<Report>) -> ApplyOutcome {
        if !self.is_current(token) {
            tracing::debug!(
                token = token.0,
                latest = self.latest_token,
                "Discarding stale report list"
            );
            return ApplyOutcome::Stale;
        }

        self.reports = reports;
        self.loaded = true;
        ApplyOutcome::Applied
    }

    /// Replace the weekly volume if `token` is still the latest reload
    pub fn apply_weekly(&mut self, token: ReloadToken, weekly: WeeklyStats) -> ApplyOutcome {
        if !self.is_current(token) {
            return ApplyOutcome::Stale;
        }

        self.weekly = weekly;
        ApplyOutcome::Applied
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn weekly(&self) -> &WeeklyStats {
        &self.weekly
    }

    /// Whether any reload has completed yet
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn count_with(&self, status: Status) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }
}
