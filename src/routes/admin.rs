use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        bookings::{BookingActionRequest, BookingActionResult, BookingList},
        invoices::{InvoiceList, PayInvoiceRequest},
        requests::{RequestActionRequest, ServiceRequestList},
        schedules::{CreateShiftRequest, ScheduleList},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Invoice, ServiceRequest, ShiftSchedule},
    response::ApiResponse,
    routes::params::{BookingListQuery, InvoiceListQuery, RequestListQuery, ScheduleQuery},
    services::{front_desk_service, invoice_service, request_service, schedule_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_all_bookings))
        .route("/bookings/{id}/actions", post(booking_action))
        .route("/requests", get(list_requests))
        .route("/requests/{id}/actions", post(request_action))
        .route("/invoices", get(list_invoices))
        .route("/invoices/{id}/pay", post(pay_invoice))
        .route("/schedules", get(list_schedules).post(add_shift))
        .route("/schedules/{id}", delete(delete_shift))
}

#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "All bookings (staff or admin)", body = ApiResponse<BookingList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Front desk"
)]
pub async fn list_all_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = front_desk_service::list_all_bookings(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/bookings/{id}/actions",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = BookingActionRequest,
    responses(
        (status = 200, description = "Booking moved to its next status", body = ApiResponse<BookingActionResult>),
        (status = 400, description = "Action not valid from the current status"),
        (status = 403, description = "Role may not perform this action"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Room already booked for those dates")
    ),
    security(("bearer_auth" = [])),
    tag = "Front desk"
)]
pub async fn booking_action(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BookingActionRequest>,
) -> AppResult<Json<ApiResponse<BookingActionResult>>> {
    let resp = front_desk_service::apply_booking_action(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/requests",
    params(RequestListQuery),
    responses(
        (status = 200, description = "Service requests visible to the operator", body = ApiResponse<ServiceRequestList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Front desk"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<ApiResponse<ServiceRequestList>>> {
    let resp = request_service::list_requests(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/requests/{id}/actions",
    params(("id" = Uuid, Path, description = "Service request ID")),
    request_body = RequestActionRequest,
    responses(
        (status = 200, description = "Request updated", body = ApiResponse<ServiceRequest>),
        (status = 400, description = "Action not valid from the current status"),
        (status = 403, description = "Request belongs to another staff member"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Front desk"
)]
pub async fn request_action(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RequestActionRequest>,
) -> AppResult<Json<ApiResponse<ServiceRequest>>> {
    let resp = request_service::process_request(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/invoices",
    params(InvoiceListQuery),
    responses(
        (status = 200, description = "Invoices (admin only)", body = ApiResponse<InvoiceList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InvoiceListQuery>,
) -> AppResult<Json<ApiResponse<InvoiceList>>> {
    let resp = invoice_service::list_invoices(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/invoices/{id}/pay",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    request_body = PayInvoiceRequest,
    responses(
        (status = 200, description = "Invoice marked as paid", body = ApiResponse<Invoice>),
        (status = 400, description = "Invoice already paid"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn pay_invoice(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PayInvoiceRequest>,
) -> AppResult<Json<ApiResponse<Invoice>>> {
    let resp = invoice_service::pay_invoice(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/schedules",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Shifts in the date range", body = ApiResponse<ScheduleList>),
        (status = 400, description = "Invalid range"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<ApiResponse<ScheduleList>>> {
    let resp = schedule_service::list_shifts(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/schedules",
    request_body = CreateShiftRequest,
    responses(
        (status = 200, description = "Shift added", body = ApiResponse<ShiftSchedule>),
        (status = 400, description = "Unknown staff member"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Shift already scheduled")
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn add_shift(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateShiftRequest>,
) -> AppResult<Json<ApiResponse<ShiftSchedule>>> {
    let resp = schedule_service::add_shift(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/schedules/{id}",
    params(("id" = Uuid, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn delete_shift(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = schedule_service::delete_shift(&state, &user, id).await?;
    Ok(Json(resp))
}
