use crate::models::HealthRes;

/// Liveness answer served at `/health`.
#[derive(Clone, Copy, Debug)]
pub struct HealthService;

impl HealthService {
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "RxDesk is alive".into(),
        }
    }
}
