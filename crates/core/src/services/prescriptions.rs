use super::{decode_list, decode_saved};
use crate::constants::PRESCRIPTIONS_PATH;
use crate::error::ApiResult;
use crate::http::{ApiClient, ReqwestTransport, RequestOptions, Transport};
use api_shared::{DateRange, Prescription, PrescriptionPayload};
use reqwest::Method;

/// CRUD operations on prescription records.
#[derive(Clone, Debug)]
pub struct PrescriptionService<T = ReqwestTransport> {
    client: ApiClient<T>,
}

impl<T: Transport> PrescriptionService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Prescriptions dated within `range` (inclusive).
    pub async fn list(&self, range: &DateRange) -> ApiResult<Vec<Prescription>> {
        let path = format!("{PRESCRIPTIONS_PATH}?{}", range.query_string());
        decode_list(self.client.request(&path, RequestOptions::default()).await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Prescription> {
        self.client
            .get_json(&format!("{PRESCRIPTIONS_PATH}/{id}"))
            .await
    }

    /// Creates a record. Any 2xx counts as saved; the echoed record is returned when the body
    /// carries one.
    pub async fn create(&self, payload: &PrescriptionPayload) -> ApiResult<Option<Prescription>> {
        let options = RequestOptions::new(Method::POST).json(payload)?;
        Ok(decode_saved(self.client.request(PRESCRIPTIONS_PATH, options).await?))
    }

    /// Replaces every field of record `id`.
    pub async fn update(
        &self,
        id: i64,
        payload: &PrescriptionPayload,
    ) -> ApiResult<Option<Prescription>> {
        let options = RequestOptions::new(Method::PUT).json(payload)?;
        let path = format!("{PRESCRIPTIONS_PATH}/{id}");
        Ok(decode_saved(self.client.request(&path, options).await?))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client
            .send_empty(Method::DELETE, &format!("{PRESCRIPTIONS_PATH}/{id}"))
            .await
    }
}
