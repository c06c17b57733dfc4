//! HTTP handlers, the OpenAPI document and the router that ties them together.

use crate::auth::CurrentUser;
use crate::error::{RestError, RestResult};
use crate::state::AppState;
use crate::validation::PrescriptionInput;
use api_shared::auth::BEARER_SCHEME;
use api_shared::{
    DayCount, ErrorBody, HealthRes, HealthService, LoginResponse, Prescription, Profile,
    RangeQuery,
};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        login,
        me,
        list_prescriptions,
        get_prescription,
        create_prescription,
        update_prescription,
        delete_prescription,
        day_wise_report,
    ),
    components(schemas(
        HealthRes,
        LoginInput,
        LoginResponse,
        Profile,
        Prescription,
        PrescriptionInput,
        DayCount,
        ErrorBody,
        api_shared::Gender,
    ))
)]
pub struct ApiDoc;

/// Login body as received; both fields are checked by the handler.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Builds the full REST application over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/me", get(me))
        .route(
            "/api/v1/prescription",
            get(list_prescriptions).post(create_prescription),
        )
        .route(
            "/api/v1/prescription/:id",
            get(get_prescription)
                .put(update_prescription)
                .delete(delete_prescription),
        )
        .route("/api/v1/report/day-wise", get(day_wise_report))
        .route(OPENAPI_PATH, get(openapi))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> RestResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| RestError::BadRequest(rejection.body_text()))
}

fn range_query(query: Result<Query<RangeQuery>, QueryRejection>) -> RestResult<RangeQuery> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| RestError::BadRequest(rejection.body_text()))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Username or password missing", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
/// Exchange credentials for a bearer token.
#[axum::debug_handler]
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> RestResult<Json<LoginResponse>> {
    let required = || RestError::BadRequest("Username and password are required".into());
    let input = payload.map(|Json(input)| input).map_err(|_| required())?;
    let (Some(username), Some(password)) = (input.username, input.password) else {
        return Err(required());
    };

    let Some(token) = state.login(&username, &password).await else {
        tracing::info!("failed login for {}", username);
        return Err(RestError::Unauthorized("Invalid username or password".into()));
    };

    Ok(Json(LoginResponse {
        token: Some(token),
        username,
        token_type: Some(BEARER_SCHEME.into()),
        message: Some("Login successful".into()),
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = Profile),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
#[axum::debug_handler(state = AppState)]
async fn me(CurrentUser(username): CurrentUser) -> Json<Profile> {
    Json(Profile { username })
}

#[utoipa::path(
    get,
    path = "/api/v1/prescription",
    params(RangeQuery),
    responses(
        (status = 200, description = "Prescriptions in range, current month by default", body = [Prescription]),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
/// List the caller's prescriptions within a date range.
#[axum::debug_handler]
async fn list_prescriptions(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> RestResult<Json<Vec<Prescription>>> {
    let range = range_query(query)?.resolve(today());
    Ok(Json(state.list(&username, &range).await))
}

#[utoipa::path(
    get,
    path = "/api/v1/prescription/{id}",
    params(("id" = i64, Path, description = "Prescription ID")),
    responses(
        (status = 200, description = "Prescription", body = Prescription),
        (status = 404, description = "Unknown or not owned", body = ErrorBody)
    )
)]
#[axum::debug_handler]
async fn get_prescription(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    Path(id): Path<i64>,
) -> RestResult<Json<Prescription>> {
    state
        .get(&username, id)
        .await
        .map(Json)
        .map_err(|lookup| RestError::NotFound(lookup.message(id)))
}

#[utoipa::path(
    post,
    path = "/api/v1/prescription",
    request_body = PrescriptionInput,
    responses(
        (status = 201, description = "Prescription created", body = Prescription),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
/// Create a prescription owned by the caller.
#[axum::debug_handler]
async fn create_prescription(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    payload: Result<Json<PrescriptionInput>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Prescription>)> {
    let payload = body(payload)?
        .validate(today())
        .map_err(RestError::Validation)?;

    let created = state.create(&username, payload).await;
    tracing::info!("created prescription {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/prescription/{id}",
    params(("id" = i64, Path, description = "Prescription ID")),
    request_body = PrescriptionInput,
    responses(
        (status = 200, description = "Prescription updated", body = Prescription),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "Unknown or not owned", body = ErrorBody)
    )
)]
/// Replace every field of a prescription.
#[axum::debug_handler]
async fn update_prescription(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    Path(id): Path<i64>,
    payload: Result<Json<PrescriptionInput>, JsonRejection>,
) -> RestResult<Json<Prescription>> {
    let payload = body(payload)?
        .validate(today())
        .map_err(RestError::Validation)?;

    state
        .update(&username, id, payload)
        .await
        .map(Json)
        .map_err(|lookup| RestError::NotFound(lookup.message(id)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/prescription/{id}",
    params(("id" = i64, Path, description = "Prescription ID")),
    responses(
        (status = 204, description = "Prescription deleted"),
        (status = 404, description = "Unknown or not owned", body = ErrorBody)
    )
)]
#[axum::debug_handler]
async fn delete_prescription(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    Path(id): Path<i64>,
) -> RestResult<StatusCode> {
    state
        .delete(&username, id)
        .await
        .map_err(|lookup| RestError::NotFound(lookup.message(id)))?;
    tracing::info!("deleted prescription {}", id);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/report/day-wise",
    params(RangeQuery),
    responses(
        (status = 200, description = "Prescription count per day, sorted by day", body = [DayCount]),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
/// Count the caller's prescriptions per day within a date range.
#[axum::debug_handler]
async fn day_wise_report(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> RestResult<Json<Vec<DayCount>>> {
    let range = range_query(query)?.resolve(today());
    Ok(Json(state.day_wise(&username, &range).await))
}
