use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        bookings::{AddServiceRequest, BookingDetail, BookingList},
        requests::CreateServiceRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::ServiceRequest,
    response::ApiResponse,
    routes::params::BookingListQuery,
    services::{booking_service, request_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_bookings))
        .route("/{id}", get(get_booking))
        .route("/{id}/cancel", post(cancel_booking))
        .route("/{id}/services", post(add_service))
        .route("/{id}/requests", post(raise_request))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings of the current customer", body = ApiResponse<BookingList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn list_my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = booking_service::list_my_bookings(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking with service lines and invoice", body = ApiResponse<BookingDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingDetail>>> {
    let resp = booking_service::get_booking(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/cancel",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Pending booking cancelled", body = ApiResponse<BookingDetail>),
        (status = 400, description = "Booking is no longer pending"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingDetail>>> {
    let resp = booking_service::cancel_own_booking(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/services",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = AddServiceRequest,
    responses(
        (status = 200, description = "Service line added", body = ApiResponse<BookingDetail>),
        (status = 400, description = "Usage date outside the stay or booking closed"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bookings"
)]
pub async fn add_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddServiceRequest>,
) -> AppResult<Json<ApiResponse<BookingDetail>>> {
    let resp = booking_service::add_service_line(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/bookings/{id}/requests",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = CreateServiceRequest,
    responses(
        (status = 200, description = "Service request raised", body = ApiResponse<ServiceRequest>),
        (status = 400, description = "Booking is not active"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Requests"
)]
pub async fn raise_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateServiceRequest>,
) -> AppResult<Json<ApiResponse<ServiceRequest>>> {
    let resp = request_service::create_request(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
