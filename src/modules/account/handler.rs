use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::middleware::auth::TokenClaims;
use crate::modules::account::dto::UsageResponse;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension};

#[utoipa::path(
    get,
    path = "/api/v1/accounts/me/usage",
    responses(
        (status = 200, description = "Current tier and usage", body = ApiResponse<UsageResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Accounts",
    security(("bearer_auth" = []))
)]
pub async fn get_my_usage(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> impl IntoResponse {
    match state.accounts.find_usage(claims.sub).await {
        Ok(Some(usage)) => {
            let res = UsageResponse {
                subscription_tier: usage.subscription_tier,
                jobs_used: usage.jobs_used,
                jobs_allowed: usage.subscription_tier.ceiling(),
            };
            ApiSuccess(ApiResponse::success(res, "Usage retrieved successfully"), StatusCode::OK)
                .into_response()
        }
        Ok(None) => ApiError("Account not found".to_string(), StatusCode::NOT_FOUND).into_response(),
        Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}
