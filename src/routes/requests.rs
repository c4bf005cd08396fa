use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::requests::ServiceRequestList, error::AppResult, middleware::auth::AuthUser,
    response::ApiResponse, routes::params::RequestListQuery, services::request_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_my_requests))
}

#[utoipa::path(
    get,
    path = "/api/requests",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Requests raised by the current customer", body = ApiResponse<ServiceRequestList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn list_my_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<ApiResponse<ServiceRequestList>>> {
    let resp = request_service::list_my_requests(&state, &user, query).await?;
    Ok(Json(resp))
}
