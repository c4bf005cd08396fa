mod common;

use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveTime};
use hotel_ops_api::{
    dto::bookings::{AddServiceRequest, BookingActionRequest, StageBookingRequest},
    entity::{
        booked_services::{Column as LineCol, Entity as BookedServices},
        enums::UserRole,
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::{booking_service, front_desk_service},
    state::AppState,
    workflow::booking::BookingAction,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use common::{create_operator, create_room, create_service, days_from_today, register_customer};

// A service line racing a check-out either lands before the invoice is
// totalled or is refused; the invoice always matches price + lines.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn service_line_cannot_slip_past_checkout_invoice() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let guest = register_customer(&state, "late@example.com").await?;
    let admin = create_operator(&state, UserRole::Admin, "admin@example.com").await?;
    let room_id = create_room(&state, "301", 1000, 2).await?;
    let spa = create_service(&state, "Spa", 500, true).await?;

    let check_in = days_from_today(0);
    booking_service::stage_booking(
        &state,
        &guest,
        room_id,
        StageBookingRequest {
            check_in,
            check_out: check_in + Duration::days(2),
            guests: 1,
            service_ids: vec![],
        },
    )
    .await?;
    let booking = booking_service::commit_booking(&state, &guest, room_id)
        .await?
        .data
        .expect("booking detail")
        .booking;
    let booking_id = booking.id;
    act(&state, &admin, booking_id, BookingAction::Confirm).await?;
    act(&state, &admin, booking_id, BookingAction::Checkin).await?;

    // Hold the room row so check-out stalls after locking the booking.
    let mut room_lock = state.pool.begin().await?;
    sqlx::query("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
        .bind(room_id)
        .execute(&mut *room_lock)
        .await?;

    let checkout = tokio::spawn({
        let state = state.clone();
        let admin = admin.clone();
        async move { act(&state, &admin, booking_id, BookingAction::Checkout).await }
    });
    tokio::time::sleep(StdDuration::from_millis(300)).await;

    let add_line = tokio::spawn({
        let state = state.clone();
        let guest = guest.clone();
        async move {
            booking_service::add_service_line(
                &state,
                &guest,
                booking_id,
                AddServiceRequest {
                    service_id: spa,
                    usage_date: check_in,
                    usage_time: NaiveTime::from_hms_opt(18, 0, 0).expect("time"),
                    quantity: 1,
                    note: String::new(),
                },
            )
            .await
        }
    });
    tokio::time::sleep(StdDuration::from_millis(300)).await;
    room_lock.commit().await?;

    let checked_out = checkout.await??;
    let late_line = add_line.await?;
    assert!(
        matches!(late_line, Err(AppError::BadRequest(_))),
        "line added after check-out began must be refused"
    );

    let lines: i64 = BookedServices::find()
        .filter(LineCol::BookingId.eq(booking_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|line| line.line_total)
        .sum();
    let invoice = checked_out.invoice.expect("invoice");
    assert_eq!(invoice.total_amount, booking.price + lines);
    assert_eq!(invoice.total_amount, 2000);

    Ok(())
}

async fn act(
    state: &AppState,
    user: &AuthUser,
    booking_id: Uuid,
    action: BookingAction,
) -> Result<hotel_ops_api::dto::bookings::BookingActionResult, AppError> {
    let resp = front_desk_service::apply_booking_action(
        state,
        user,
        booking_id,
        BookingActionRequest { action, note: None },
    )
    .await?;
    Ok(resp.data.expect("action result"))
}
