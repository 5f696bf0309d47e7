use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::common::signature;
use crate::middleware::auth::{OptionalClaims, TokenClaims};
use crate::modules::job::dto::{CreateJobRequest, WebhookPayload};
use crate::modules::job::model::Job;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

const OWNED_JOBS_LIMIT: i64 = 50;

#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created and queued", body = ApiResponse<Job>),
        (status = 403, description = "Quota Exceeded"),
        (status = 422, description = "Invalid source URL"),
        (status = 502, description = "Queue unavailable, job failed"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs",
    security((), ("bearer_auth" = []))
)]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(identity): Extension<OptionalClaims>,
    Json(req): Json<CreateJobRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return ApiError(e.to_string(), StatusCode::UNPROCESSABLE_ENTITY).into_response();
    }

    let owner_id = identity.0.map(|claims| claims.sub);

    let job = match state.jobs.create(owner_id, &req.source_url).await {
        Ok(job) => job,
        Err(e) => return ApiError::from(e).into_response(),
    };

    if let Err(e) = state.jobs.submit(job.id).await {
        // The job is already marked failed; surface the publish error now
        // instead of letting the user wait on a dead job.
        return ApiError::from(e).into_response();
    }

    match state.jobs.get(job.id).await {
        Ok(job) => ApiSuccess(
            ApiResponse::success(job, "Transcription job created"),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job status and result", body = ApiResponse<Job>),
        (status = 404, description = "Job Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs"
)]
pub async fn get_job(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.jobs.get(id).await {
        Ok(job) => ApiSuccess(
            ApiResponse::success(job, "Job retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses(
        (status = 200, description = "Caller's recent jobs", body = ApiResponse<Vec<Job>>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> impl IntoResponse {
    match state.jobs.list_for_owner(claims.sub, OWNED_JOBS_LIMIT).await {
        Ok(jobs) => ApiSuccess(
            ApiResponse::success(jobs, "Jobs retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Worker callback. The raw body is verified against the shared-secret
/// HMAC before anything is parsed; a delivery that fails verification
/// never reaches the job lifecycle.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{id}/webhook",
    params(("id" = Uuid, Path, description = "Job ID")),
    request_body = WebhookPayload,
    responses(
        (status = 200, description = "Outcome recorded (idempotent)", body = ApiResponse<Job>),
        (status = 400, description = "Malformed payload"),
        (status = 401, description = "Missing or invalid signature"),
        (status = 404, description = "Job Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Jobs"
)]
pub async fn transcription_webhook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let provided = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let Some(provided) = provided else {
        warn!("webhook for job {} rejected: no signature", id);
        return ApiError(
            "Missing webhook signature".to_string(),
            StatusCode::UNAUTHORIZED,
        )
        .into_response();
    };

    if !signature::verify(&state.config.webhook_secret, &body, provided) {
        warn!("webhook for job {} rejected: bad signature", id);
        return ApiError(
            "Invalid webhook signature".to_string(),
            StatusCode::UNAUTHORIZED,
        )
        .into_response();
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            return ApiError(
                format!("Malformed webhook payload: {}", e),
                StatusCode::BAD_REQUEST,
            )
            .into_response()
        }
    };

    let outcome = if payload.success {
        state.jobs.complete(id, payload.into_result()).await
    } else {
        let reason = payload.error.as_deref().unwrap_or("worker reported failure");
        state.jobs.fail(id, Some(reason)).await
    };

    match outcome {
        Ok(job) => ApiSuccess(
            ApiResponse::success(job, "Job outcome recorded"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
