mod common;

use chrono::{Duration, NaiveTime};
use hotel_ops_api::{
    dto::{
        bookings::{AddServiceRequest, BookingActionRequest, StageBookingRequest},
        invoices::PayInvoiceRequest,
    },
    entity::{
        enums::{BookingStatus, RoomStatus, UserRole},
        bookings::Entity as Bookings,
        invoices::{Column as InvoiceCol, Entity as Invoices},
        rooms::Entity as Rooms,
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::{booking_service, front_desk_service, invoice_service},
    state::AppState,
    workflow::booking::BookingAction,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use common::{create_operator, create_room, create_service, days_from_today, register_customer};

// Stage -> commit -> confirm -> check in -> extra service -> check out -> pay,
// with the overlap and state-machine guards checked along the way.
#[tokio::test]
async fn stage_commit_and_front_desk_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let alice = register_customer(&state, "alice@example.com").await?;
    let bob = register_customer(&state, "bob@example.com").await?;
    let admin = create_operator(&state, UserRole::Admin, "admin@example.com").await?;
    let staff = create_operator(&state, UserRole::Staff, "staff@example.com").await?;

    let room_id = create_room(&state, "101", 1000, 2).await?;
    let breakfast = create_service(&state, "Breakfast", 200, true).await?;
    let retired = create_service(&state, "Retired", 999, false).await?;

    let check_in = days_from_today(10);
    let check_out = days_from_today(13);

    // Invalid windows never reach the store.
    let same_day = stage(&state, &alice, room_id, check_in, check_in, 1, vec![]).await;
    assert!(matches!(same_day, Err(AppError::BadRequest(_))));
    let past = stage(&state, &alice, room_id, days_from_today(-1), check_out, 1, vec![]).await;
    assert!(matches!(past, Err(AppError::BadRequest(_))));

    // Staging writes nothing to the database.
    let staged = stage(
        &state,
        &alice,
        room_id,
        check_in,
        check_out,
        2,
        vec![breakfast, retired, breakfast],
    )
    .await?;
    assert_eq!(staged.service_ids, vec![breakfast, retired]);
    assert_eq!(Bookings::find().count(&state.orm).await?, 0);

    // Nothing staged for bob yet.
    let missing = booking_service::commit_booking(&state, &bob, room_id).await;
    assert!(matches!(missing, Err(AppError::StagingExpired)));

    let committed = booking_service::commit_booking(&state, &alice, room_id)
        .await?
        .data
        .expect("booking detail");
    let alice_booking = committed.booking;
    assert_eq!(alice_booking.status, BookingStatus::Pending);
    assert_eq!(alice_booking.price, 3000);
    assert_eq!(committed.services.len(), 1, "inactive and duplicate services are skipped");
    assert_eq!(committed.services[0].line_total, 200);
    assert_eq!(committed.services[0].usage_date, check_in);

    let consumed = booking_service::get_staged_booking(&state, &alice, room_id).await;
    assert!(matches!(consumed, Err(AppError::StagingExpired)));

    // A pending booking does not hold the room, so bob can also commit.
    stage(&state, &bob, room_id, check_in + Duration::days(1), check_out, 1, vec![]).await?;
    let bob_booking = booking_service::commit_booking(&state, &bob, room_id)
        .await?
        .data
        .expect("booking detail")
        .booking;

    // Staff confirm; the second confirmation over the same nights conflicts.
    let confirmed = act(&state, &staff, alice_booking.id, BookingAction::Confirm).await?;
    assert_eq!(confirmed.booking.status, BookingStatus::Confirmed);
    let clash = act(&state, &admin, bob_booking.id, BookingAction::Confirm).await;
    assert!(matches!(clash, Err(AppError::Conflict(_))));

    // Committing over an active booking is rejected up front.
    stage(&state, &bob, room_id, check_in, check_in + Duration::days(1), 1, vec![]).await?;
    let overlap = booking_service::commit_booking(&state, &bob, room_id).await;
    assert!(matches!(overlap, Err(AppError::Conflict(_))));

    // Back-to-back stays share a boundary day without overlapping.
    stage(&state, &bob, room_id, check_out, check_out + Duration::days(2), 1, vec![]).await?;
    booking_service::commit_booking(&state, &bob, room_id).await?;

    // Staff may only confirm.
    let denied = act(&state, &staff, alice_booking.id, BookingAction::Checkin).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let early = act(&state, &admin, alice_booking.id, BookingAction::Checkout).await;
    assert!(matches!(early, Err(AppError::BadRequest(_))));

    let checked_in = act(&state, &admin, alice_booking.id, BookingAction::Checkin).await?;
    assert_eq!(checked_in.booking.status, BookingStatus::CheckedIn);
    assert_eq!(room_status(&state, room_id).await?, RoomStatus::Occupied);

    let with_extra = booking_service::add_service_line(
        &state,
        &alice,
        alice_booking.id,
        AddServiceRequest {
            service_id: breakfast,
            usage_date: check_in + Duration::days(1),
            usage_time: NaiveTime::from_hms_opt(8, 0, 0).expect("time"),
            quantity: 2,
            note: String::new(),
        },
    )
    .await?
    .data
    .expect("booking detail");
    assert_eq!(with_extra.services.len(), 2);

    let outside = booking_service::add_service_line(
        &state,
        &alice,
        alice_booking.id,
        AddServiceRequest {
            service_id: breakfast,
            usage_date: check_out,
            usage_time: NaiveTime::from_hms_opt(8, 0, 0).expect("time"),
            quantity: 1,
            note: String::new(),
        },
    )
    .await;
    assert!(matches!(outside, Err(AppError::BadRequest(_))));

    let not_hers = booking_service::get_booking(&state, &bob, alice_booking.id).await;
    assert!(matches!(not_hers, Err(AppError::Forbidden)));

    // Check-out issues exactly one invoice: price + all service lines.
    let checked_out = act(&state, &admin, alice_booking.id, BookingAction::Checkout).await?;
    assert_eq!(checked_out.booking.status, BookingStatus::CheckedOut);
    assert!(checked_out.invoice_created);
    let invoice = checked_out.invoice.expect("invoice");
    assert_eq!(invoice.total_amount, 3000 + 200 + 400);
    assert_eq!(room_status(&state, room_id).await?, RoomStatus::Available);

    let again = act(&state, &admin, alice_booking.id, BookingAction::Checkout).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));
    let invoices = Invoices::find()
        .filter(InvoiceCol::BookingId.eq(alice_booking.id))
        .count(&state.orm)
        .await?;
    assert_eq!(invoices, 1);

    let cancel_closed = act(&state, &admin, alice_booking.id, BookingAction::Cancel).await;
    assert!(matches!(cancel_closed, Err(AppError::BadRequest(_))));

    // Guests may withdraw their own pending booking.
    let withdrawn = booking_service::cancel_own_booking(&state, &bob, bob_booking.id)
        .await?
        .data
        .expect("booking detail");
    assert_eq!(withdrawn.booking.status, BookingStatus::Cancelled);

    // Payment marks both invoice and booking.
    let not_admin = invoice_service::pay_invoice(
        &state,
        &staff,
        invoice.id,
        PayInvoiceRequest {
            payment_method: "cash".into(),
        },
    )
    .await;
    assert!(matches!(not_admin, Err(AppError::Forbidden)));

    let paid = invoice_service::pay_invoice(
        &state,
        &admin,
        invoice.id,
        PayInvoiceRequest {
            payment_method: "cash".into(),
        },
    )
    .await?
    .data
    .expect("invoice");
    assert!(paid.paid);
    let detail = booking_service::get_booking(&state, &alice, alice_booking.id)
        .await?
        .data
        .expect("booking detail");
    assert!(detail.booking.paid);
    assert_eq!(detail.invoice.map(|i| i.id), Some(invoice.id));

    let twice = invoice_service::pay_invoice(
        &state,
        &admin,
        invoice.id,
        PayInvoiceRequest {
            payment_method: "card".into(),
        },
    )
    .await;
    assert!(matches!(twice, Err(AppError::BadRequest(_))));

    Ok(())
}

async fn stage(
    state: &AppState,
    user: &AuthUser,
    room_id: Uuid,
    check_in: chrono::NaiveDate,
    check_out: chrono::NaiveDate,
    guests: i32,
    service_ids: Vec<Uuid>,
) -> Result<hotel_ops_api::staging::StagedBooking, AppError> {
    let resp = booking_service::stage_booking(
        state,
        user,
        room_id,
        StageBookingRequest {
            check_in,
            check_out,
            guests,
            service_ids,
        },
    )
    .await?;
    Ok(resp.data.expect("staged booking"))
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

async fn room_status(state: &AppState, room_id: Uuid) -> anyhow::Result<RoomStatus> {
    let room = Rooms::find_by_id(room_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("room missing"))?;
    Ok(room.status)
}
