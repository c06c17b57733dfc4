use super::decode_list;
use crate::constants::DAY_WISE_REPORT_PATH;
use crate::error::ApiResult;
use crate::http::{ApiClient, ReqwestTransport, RequestOptions, Transport};
use api_shared::{DateRange, DayCount};

/// Read-only aggregate reports.
#[derive(Clone, Debug)]
pub struct ReportService<T = ReqwestTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> ReportService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Prescription counts per calendar day within `range`.
    pub async fn day_wise(&self, range: &DateRange) -> ApiResult<Vec<DayCount>> {
        let path = format!("{DAY_WISE_REPORT_PATH}?{}", range.query_string());
        decode_list(self.client.request(&path, RequestOptions::default()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionStore;
    use crate::testing::FakeTransport;
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_day_wise_decodes_rows() {
        let fake = FakeTransport::new();
        fake.push_json(
            200,
            json!([
                { "day": "2024-01-02", "prescriptionCount": 3 },
                { "day": "2024-01-05", "prescriptionCount": 1 }
            ]),
        );

        let range = DateRange::current_month(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());
        let rows = ReportService::new(fake.client(SessionStore::in_memory()))
            .day_wise(&range)
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prescription_count, 3);
        assert_eq!(
            fake.last_request().url,
            "http://rx.test/api/v1/report/day-wise?startDate=2024-01-01&endDate=2024-01-31"
        );
    }
}
