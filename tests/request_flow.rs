mod common;

use chrono::Duration;
use hotel_ops_api::{
    dto::{
        bookings::{BookingActionRequest, StageBookingRequest},
        requests::{CreateServiceRequest, RequestActionRequest},
        schedules::CreateShiftRequest,
    },
    entity::enums::{EmploymentStatus, RequestCategory, RequestStatus, Shift, UserRole},
    error::AppError,
    middleware::auth::AuthUser,
    models::ServiceRequest,
    routes::params::{RequestListQuery, ScheduleQuery},
    services::{booking_service, front_desk_service, request_service, schedule_service},
    state::AppState,
    workflow::{booking::BookingAction, request::RequestAction},
};
use uuid::Uuid;

use common::{create_operator, create_room, create_staff, days_from_today, register_customer};

// Guest raises a request on an active stay; admin assigns it, staff works it,
// and staff cannot touch a colleague's request.
#[tokio::test]
async fn service_request_triage_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let guest = register_customer(&state, "guest@example.com").await?;
    let admin = create_operator(&state, UserRole::Admin, "admin@example.com").await?;
    let anna = create_operator(&state, UserRole::Staff, "anna@example.com").await?;
    let ben = create_operator(&state, UserRole::Staff, "ben@example.com").await?;
    let anna_staff = create_staff(&state, Some(anna.user_id), "anna@example.com", EmploymentStatus::Active).await?;
    let ben_staff = create_staff(&state, Some(ben.user_id), "ben@example.com", EmploymentStatus::Active).await?;
    let on_leave = create_staff(&state, None, "carl@example.com", EmploymentStatus::OnLeave).await?;
    let no_profile = create_operator(&state, UserRole::Staff, "ghost@example.com").await?;

    let room_id = create_room(&state, "201", 1500, 2).await?;
    booking_service::stage_booking(
        &state,
        &guest,
        room_id,
        StageBookingRequest {
            check_in: days_from_today(1),
            check_out: days_from_today(3),
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

    // Pending stays cannot raise requests.
    let too_early = raise(&state, &guest, booking.id, "Extra towels").await;
    assert!(matches!(too_early, Err(AppError::BadRequest(_))));

    front_desk_service::apply_booking_action(
        &state,
        &admin,
        booking.id,
        BookingActionRequest {
            action: BookingAction::Confirm,
            note: None,
        },
    )
    .await?;

    let blank = raise(&state, &guest, booking.id, "   ").await;
    assert!(matches!(blank, Err(AppError::BadRequest(_))));

    let towels = raise(&state, &guest, booking.id, "Extra towels").await?;
    assert_eq!(towels.status, RequestStatus::Unassigned);
    assert_eq!(towels.room_id, room_id);
    let light = raise(&state, &guest, booking.id, "Bedside lamp flickers").await?;

    let mine = request_service::list_my_requests(&state, &guest, RequestListQuery::default())
        .await?
        .data
        .expect("request list");
    assert_eq!(mine.items.len(), 2);

    // Staff without a profile cannot work requests.
    let ghost = act(&state, &no_profile, towels.id, RequestAction::Start).await;
    assert!(matches!(ghost, Err(AppError::Forbidden)));

    // Only admins assign, and only to active staff.
    let self_assign = act(&state, &anna, towels.id, RequestAction::Assign { staff_id: anna_staff }).await;
    assert!(matches!(self_assign, Err(AppError::Forbidden)));
    let inactive = act(&state, &admin, towels.id, RequestAction::Assign { staff_id: on_leave }).await;
    assert!(matches!(inactive, Err(AppError::BadRequest(_))));

    let assigned = act(&state, &admin, towels.id, RequestAction::Assign { staff_id: anna_staff }).await?;
    assert_eq!(assigned.status, RequestStatus::Assigned);
    assert_eq!(assigned.staff_id, Some(anna_staff));

    // Ben sees the unassigned pool but not anna's request, and cannot act on it.
    let bens_view = request_service::list_requests(&state, &ben, RequestListQuery::default())
        .await?
        .data
        .expect("request list");
    assert_eq!(bens_view.items.len(), 1);
    assert_eq!(bens_view.items[0].id, light.id);
    let poach = act(&state, &ben, towels.id, RequestAction::Start).await;
    assert!(matches!(poach, Err(AppError::Forbidden)));

    // Starting an unassigned request claims it.
    let claimed = act(&state, &ben, light.id, RequestAction::Start).await?;
    assert_eq!(claimed.status, RequestStatus::InProgress);
    assert_eq!(claimed.staff_id, Some(ben_staff));

    let started = act(&state, &anna, towels.id, RequestAction::Start).await?;
    assert_eq!(started.status, RequestStatus::InProgress);
    let done = act(&state, &anna, towels.id, RequestAction::Complete).await?;
    assert_eq!(done.status, RequestStatus::Resolved);
    assert!(done.completed_at.is_some());

    // Terminal requests only accept notes.
    let reopen = act(&state, &anna, towels.id, RequestAction::Cancel).await;
    assert!(matches!(reopen, Err(AppError::BadRequest(_))));
    let noted = request_service::process_request(
        &state,
        &anna,
        towels.id,
        RequestActionRequest {
            action: RequestAction::Note,
            note: Some("Delivered to room".into()),
        },
    )
    .await?
    .data
    .expect("request");
    assert_eq!(noted.status, RequestStatus::Resolved);
    assert_eq!(noted.note, "Delivered to room");

    let resolved_only = request_service::list_requests(
        &state,
        &admin,
        RequestListQuery {
            status: Some(RequestStatus::Resolved),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("request list");
    assert_eq!(resolved_only.items.len(), 1);

    // Shift schedule: admin adds, duplicates conflict, staff can read.
    let work_date = days_from_today(2);
    let shift = schedule_service::add_shift(&state, &admin, shift_request(anna_staff, work_date))
        .await?
        .data
        .expect("shift");
    let duplicate = schedule_service::add_shift(&state, &admin, shift_request(anna_staff, work_date)).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    let by_staff = schedule_service::add_shift(&state, &anna, shift_request(anna_staff, work_date)).await;
    assert!(matches!(by_staff, Err(AppError::Forbidden)));

    let week = schedule_service::list_shifts(
        &state,
        &ben,
        ScheduleQuery {
            from: Some(days_from_today(0)),
            to: Some(days_from_today(0) + Duration::days(6)),
            staff_id: None,
        },
    )
    .await?
    .data
    .expect("schedule");
    assert_eq!(week.items.len(), 1);

    schedule_service::delete_shift(&state, &admin, shift.id).await?;
    let gone = schedule_service::delete_shift(&state, &admin, shift.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    // Simultaneous inserts of the same shift: one lands, the other conflicts.
    let (first, second) = tokio::join!(
        schedule_service::add_shift(&state, &admin, shift_request(ben_staff, work_date)),
        schedule_service::add_shift(&state, &admin, shift_request(ben_staff, work_date)),
    );
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::Conflict(_)))),
        "losing insert should report a conflict"
    );

    Ok(())
}

fn shift_request(staff_id: Uuid, work_date: chrono::NaiveDate) -> CreateShiftRequest {
    CreateShiftRequest {
        staff_id,
        work_date,
        shift: Shift::Morning,
        note: String::new(),
    }
}

async fn raise(
    state: &AppState,
    guest: &AuthUser,
    booking_id: Uuid,
    content: &str,
) -> Result<ServiceRequest, AppError> {
    let resp = request_service::create_request(
        state,
        guest,
        booking_id,
        CreateServiceRequest {
            category: RequestCategory::Housekeeping,
            content: content.to_string(),
        },
    )
    .await?;
    Ok(resp.data.expect("request"))
}

async fn act(
    state: &AppState,
    user: &AuthUser,
    request_id: Uuid,
    action: RequestAction,
) -> Result<ServiceRequest, AppError> {
    let resp = request_service::process_request(
        state,
        user,
        request_id,
        RequestActionRequest { action, note: None },
    )
    .await?;
    Ok(resp.data.expect("request"))
}
