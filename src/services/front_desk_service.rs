//! Operator-side booking lifecycle: confirm, check-in, check-out, cancel.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::bookings::{BookingActionRequest, BookingActionResult, BookingList},
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings},
        rooms::{ActiveModel as RoomActive, Entity as Rooms},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_operator},
    response::{ApiResponse, Meta},
    routes::params::{BookingListQuery, SortOrder},
    services::{booking_service::ensure_room_free, invoice_service::ensure_invoice},
    state::AppState,
    workflow::{booking::BookingAction, stay::StayWindow},
};

pub async fn list_all_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingListQuery,
) -> AppResult<ApiResponse<BookingList>> {
    ensure_operator(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(BookingCol::Status.eq(status));
    }
    if let Some(room_id) = query.room_id {
        condition = condition.add(BookingCol::RoomId.eq(room_id));
    }

    let mut finder = Bookings::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(BookingCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(BookingCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ApiResponse::success(
        "Bookings",
        BookingList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Applies one operator action. The booking update, the room status flip and
/// the invoice insert commit together or not at all.
pub async fn apply_booking_action(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: BookingActionRequest,
) -> AppResult<ApiResponse<BookingActionResult>> {
    ensure_operator(user)?;
    let action = payload.action;

    let txn = state.orm.begin().await?;
    let booking = Bookings::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let next = match action.transition(user.role, booking.status) {
        Ok(next) => next,
        Err(err) => {
            tracing::warn!(
                booking_id = %booking.id,
                user_id = %user.user_id,
                action = action.as_str(),
                status = ?booking.status,
                "booking action rejected"
            );
            return Err(err.into());
        }
    };

    let room = Rooms::find_by_id(booking.room_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let room = match room {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if action == BookingAction::Confirm {
        let stay = StayWindow::new(booking.check_in, booking.check_out)?;
        ensure_room_free(&txn, room.id, &stay, Some(booking.id)).await?;
    }

    let mut active: BookingActive = booking.into();
    active.status = Set(next);
    if let Some(note) = payload.note {
        active.note = Set(note);
    }
    let booking = active.update(&txn).await?;

    if let Some(room_status) = action.room_status_after() {
        let mut room: RoomActive = room.into();
        room.status = Set(room_status);
        room.update(&txn).await?;
    }

    let (invoice, invoice_created) = if action == BookingAction::Checkout {
        let (invoice, created) = ensure_invoice(&txn, &booking).await?;
        (Some(invoice), created)
    } else {
        (None, false)
    };

    txn.commit().await?;

    match &invoice {
        Some(invoice) => tracing::info!(
            booking_id = %booking.id,
            invoice_total = invoice.total_amount,
            invoice_created,
            "booking checked out"
        ),
        None => tracing::info!(
            booking_id = %booking.id,
            action = action.as_str(),
            user_id = %user.user_id,
            "booking updated"
        ),
    }
    audit::record(
        state,
        user.user_id,
        "booking_status_update",
        "bookings",
        serde_json::json!({
            "booking_id": booking.id,
            "action": action.as_str(),
            "status": booking.status,
        }),
    )
    .await;

    let message = match (action, invoice_created) {
        (BookingAction::Confirm, _) => "Booking confirmed",
        (BookingAction::Checkin, _) => "Guest checked in",
        (BookingAction::Checkout, true) => "Guest checked out and invoice created",
        (BookingAction::Checkout, false) => "Guest checked out, invoice already exists",
        (BookingAction::Cancel, _) => "Booking cancelled",
    };

    Ok(ApiResponse::item(
        message,
        BookingActionResult {
            booking: booking.into(),
            invoice: invoice.map(Into::into),
            invoice_created,
        },
    ))
}
