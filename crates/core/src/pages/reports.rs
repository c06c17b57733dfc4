//! Day-wise prescription counts.

use super::{table_body, TableBody};
use crate::http::{ReqwestTransport, Transport};
use crate::services::ReportService;
use api_shared::{DateRange, DayCount};
use chrono::NaiveDate;

pub const EMPTY_REPORT: &str = "No data for the selected range.";
pub const LOAD_FAILED: &str = "Failed to load report";

pub struct ReportsPage<T = ReqwestTransport> {
    service: ReportService<T>,
    range: DateRange,
    rows: Vec<DayCount>,
    loading: bool,
    error: Option<String>,
}

impl<T: Transport> ReportsPage<T> {
    pub fn new(service: ReportService<T>, today: NaiveDate) -> Self {
        Self {
            service,
            range: DateRange::current_month(today),
            rows: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn rows(&self) -> &[DayCount] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Sum of the counts currently shown.
    pub fn total(&self) -> i64 {
        self.rows.iter().map(|r| r.prescription_count).sum()
    }

    pub fn table(&self) -> TableBody<'_, DayCount> {
        table_body(self.loading, &self.rows, EMPTY_REPORT)
    }

    pub async fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        self.error = None;

        match self.service.day_wise(&self.range).await {
            Ok(rows) => self.rows = rows,
            Err(e) => {
                tracing::debug!("day-wise report failed: {}", e);
                self.error = Some(e.user_message(LOAD_FAILED));
            }
        }

        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionStore;
    use crate::testing::FakeTransport;
    use serde_json::json;

    fn page(fake: &FakeTransport) -> ReportsPage<FakeTransport> {
        let service = ReportService::new(fake.client(SessionStore::in_memory()));
        ReportsPage::new(service, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap())
    }

    #[tokio::test]
    async fn test_rows_and_total() {
        let fake = FakeTransport::new();
        fake.push_json(
            200,
            json!([
                { "day": "2024-02-01", "prescriptionCount": 3 },
                { "day": "2024-02-03", "prescriptionCount": 1 }
            ]),
        );

        let mut page = page(&fake);
        page.refresh().await;

        assert_eq!(page.rows().len(), 2);
        assert_eq!(page.total(), 4);
        assert!(fake
            .last_request()
            .url
            .ends_with("startDate=2024-02-01&endDate=2024-02-29"));
    }

    #[tokio::test]
    async fn test_empty_report_message() {
        let fake = FakeTransport::new();
        fake.push_json(200, json!([]));

        let mut page = page(&fake);
        page.refresh().await;
        assert_eq!(page.table(), TableBody::Empty(EMPTY_REPORT));
        assert_eq!(page.error(), None);
    }

    #[tokio::test]
    async fn test_failure_uses_server_message_or_fallback() {
        let fake = FakeTransport::new();
        fake.push_json(400, json!({ "error": "Start date must be before end date" }));
        fake.push_transport_error();

        let mut page = page(&fake);
        page.refresh().await;
        assert_eq!(page.error(), Some("Start date must be before end date"));

        page.refresh().await;
        assert_eq!(page.error(), Some(LOAD_FAILED));
        assert!(!page.is_loading());
    }
}
