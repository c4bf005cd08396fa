use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        bookings::{BookingDetail, StageBookingRequest},
        rooms::{RoomDetail, RoomList, ServiceList},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::RoomQuery,
    services::{booking_service, room_service},
    staging::StagedBooking,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms))
        .route("/{id}", get(get_room))
        .route("/{id}/booking/stage", post(stage_booking).get(get_staged_booking))
        .route("/{id}/booking/commit", post(commit_booking))
}

pub fn services_router() -> Router<AppState> {
    Router::new().route("/", get(list_services))
}

#[utoipa::path(
    get,
    path = "/api/rooms",
    params(RoomQuery),
    responses(
        (status = 200, description = "List rooms", body = ApiResponse<RoomList>)
    ),
    tag = "Rooms"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<ApiResponse<RoomList>>> {
    let resp = room_service::list_rooms(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room detail with photos", body = ApiResponse<RoomDetail>),
        (status = 404, description = "Not Found")
    ),
    tag = "Rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RoomDetail>>> {
    let resp = room_service::get_room(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/rooms/{id}/booking/stage",
    params(("id" = Uuid, Path, description = "Room ID")),
    request_body = StageBookingRequest,
    responses(
        (status = 200, description = "Selection staged, nothing persisted", body = ApiResponse<StagedBooking>),
        (status = 400, description = "Invalid dates or guests"),
        (status = 404, description = "Room not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Booking"
)]
pub async fn stage_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StageBookingRequest>,
) -> AppResult<Json<ApiResponse<StagedBooking>>> {
    let resp = booking_service::stage_booking(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}/booking/stage",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Current staged selection", body = ApiResponse<StagedBooking>),
        (status = 419, description = "Nothing staged or selection expired")
    ),
    security(("bearer_auth" = [])),
    tag = "Booking"
)]
pub async fn get_staged_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<StagedBooking>>> {
    let resp = booking_service::get_staged_booking(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/rooms/{id}/booking/commit",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Pending booking created", body = ApiResponse<BookingDetail>),
        (status = 400, description = "Stay no longer valid"),
        (status = 403, description = "Only customers can book"),
        (status = 409, description = "Room already booked for those dates"),
        (status = 419, description = "Nothing staged or selection expired")
    ),
    security(("bearer_auth" = [])),
    tag = "Booking"
)]
pub async fn commit_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BookingDetail>>> {
    let resp = booking_service::commit_booking(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "Active add-on services", body = ApiResponse<ServiceList>)
    ),
    tag = "Rooms"
)]
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ServiceList>>> {
    let resp = room_service::list_services(&state).await?;
    Ok(Json(resp))
}
