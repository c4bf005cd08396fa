use std::collections::HashSet;

use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::bookings::{AddServiceRequest, BookingDetail, BookingList, StageBookingRequest},
    entity::{
        booked_services::{ActiveModel as LineActive, Column as LineCol, Entity as BookedServices},
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings, Model as BookingModel},
        customers::{Column as CustomerCol, Entity as Customers, Model as CustomerModel},
        enums::{BookingStatus, UserRole},
        invoices::{Column as InvoiceCol, Entity as Invoices},
        rooms::Entity as Rooms,
        services::{Column as ServiceCol, Entity as Services},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer},
    models::BookedService,
    response::{ApiResponse, Meta},
    routes::params::{BookingListQuery, SortOrder},
    staging::StagedBooking,
    state::AppState,
    workflow::stay::{StayError, StayWindow, check_guests, line_total},
};

/// Phase one: validate the selection and park it in the staging store.
pub async fn stage_booking(
    state: &AppState,
    user: &AuthUser,
    room_id: Uuid,
    payload: StageBookingRequest,
) -> AppResult<ApiResponse<StagedBooking>> {
    let today = Utc::now().date_naive();
    StayWindow::upcoming(payload.check_in, payload.check_out, today)?;
    if payload.guests < 1 {
        return Err(StayError::NoGuests.into());
    }

    if Rooms::find_by_id(room_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let mut seen = HashSet::new();
    let service_ids = payload
        .service_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    let staged = StagedBooking {
        room_id,
        check_in: payload.check_in,
        check_out: payload.check_out,
        guests: payload.guests,
        service_ids,
        staged_at: Utc::now(),
    };
    state.staging.put(user.user_id, staged.clone()).await;
    tracing::debug!(user_id = %user.user_id, room_id = %room_id, "booking staged");

    Ok(ApiResponse::item("Booking details saved", staged))
}

pub async fn get_staged_booking(
    state: &AppState,
    user: &AuthUser,
    room_id: Uuid,
) -> AppResult<ApiResponse<StagedBooking>> {
    let staged = state
        .staging
        .get(user.user_id, room_id)
        .await
        .ok_or(AppError::StagingExpired)?;
    Ok(ApiResponse::item("Staged booking", staged))
}

/// Phase two: re-validate the staged selection and persist it atomically.
pub async fn commit_booking(
    state: &AppState,
    user: &AuthUser,
    room_id: Uuid,
) -> AppResult<ApiResponse<BookingDetail>> {
    ensure_customer(user)?;
    let staged = state
        .staging
        .get(user.user_id, room_id)
        .await
        .ok_or(AppError::StagingExpired)?;
    let customer = customer_profile(&state.orm, user).await?;

    let today = Utc::now().date_naive();
    let stay = StayWindow::upcoming(staged.check_in, staged.check_out, today)?;

    let txn = state.orm.begin().await?;

    let room = Rooms::find_by_id(room_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let room = match room {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    check_guests(staged.guests, room.capacity)?;
    ensure_room_free(&txn, room.id, &stay, None).await?;

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer.id),
        room_id: Set(room.id),
        check_in: Set(stay.check_in()),
        check_out: Set(stay.check_out()),
        guests: Set(staged.guests),
        price: Set(stay.price(room.nightly_rate)?),
        status: Set(BookingStatus::Pending),
        note: Set(String::new()),
        paid: Set(false),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let usage_time = Utc::now().time();
    let mut lines: Vec<BookedService> = Vec::with_capacity(staged.service_ids.len());
    for service_id in &staged.service_ids {
        let service = Services::find_by_id(*service_id)
            .filter(ServiceCol::Active.eq(true))
            .one(&txn)
            .await?;
        let service = match service {
            Some(s) => s,
            None => {
                tracing::warn!(service_id = %service_id, "service missing or inactive, skipping");
                continue;
            }
        };

        let line = LineActive {
            id: Set(Uuid::new_v4()),
            booking_id: Set(booking.id),
            service_id: Set(service.id),
            usage_date: Set(stay.check_in()),
            usage_time: Set(usage_time),
            quantity: Set(1),
            line_total: Set(service.fee),
            note: Set(String::new()),
        }
        .insert(&txn)
        .await?;
        lines.push(line.into());
    }

    txn.commit().await?;
    state.staging.remove(user.user_id, room_id).await;

    tracing::info!(
        booking_id = %booking.id,
        room = %room.name,
        user_id = %user.user_id,
        "booking created"
    );
    audit::record(
        state,
        user.user_id,
        "booking_create",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "room_id": room.id }),
    )
    .await;

    Ok(ApiResponse::item(
        "Booking created",
        BookingDetail {
            booking: booking.into(),
            services: lines,
            invoice: None,
        },
    ))
}

/// Fails with a conflict if an active booking on `room_id` intersects `stay`.
pub async fn ensure_room_free<C: ConnectionTrait>(
    conn: &C,
    room_id: Uuid,
    stay: &StayWindow,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    let mut condition = Condition::all()
        .add(BookingCol::RoomId.eq(room_id))
        .add(BookingCol::Status.is_in(BookingStatus::ACTIVE))
        .add(BookingCol::CheckIn.lt(stay.check_out()))
        .add(BookingCol::CheckOut.gt(stay.check_in()));
    if let Some(id) = exclude {
        condition = condition.add(BookingCol::Id.ne(id));
    }

    let clashes = Bookings::find().filter(condition).count(conn).await?;
    if clashes > 0 {
        tracing::info!(room_id = %room_id, "stay overlaps an active booking");
        return Err(AppError::Conflict(
            "The room is already booked for the selected dates, please choose other dates".into(),
        ));
    }
    Ok(())
}

pub async fn customer_profile<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
) -> AppResult<CustomerModel> {
    Customers::find()
        .filter(CustomerCol::UserId.eq(user.user_id))
        .one(conn)
        .await?
        .ok_or_else(|| AppError::BadRequest("No customer profile for this account".into()))
}

pub async fn list_my_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingListQuery,
) -> AppResult<ApiResponse<BookingList>> {
    ensure_customer(user)?;
    let customer = customer_profile(&state.orm, user).await?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all().add(BookingCol::CustomerId.eq(customer.id));
    if let Some(status) = query.status {
        condition = condition.add(BookingCol::Status.eq(status));
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

pub async fn get_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<BookingDetail>> {
    let booking = visible_booking(state, user, id).await?;
    let detail = booking_detail(&state.orm, booking).await?;
    Ok(ApiResponse::item("Booking", detail))
}

/// Guests may withdraw a booking nobody has confirmed yet.
pub async fn cancel_own_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<BookingDetail>> {
    ensure_customer(user)?;
    let customer = customer_profile(&state.orm, user).await?;

    let txn = state.orm.begin().await?;
    let booking = Bookings::find_by_id(id)
        .filter(BookingCol::CustomerId.eq(customer.id))
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    if booking.status != BookingStatus::Pending {
        return Err(AppError::BadRequest(
            "Only bookings awaiting confirmation can be cancelled".into(),
        ));
    }

    let mut active: BookingActive = booking.into();
    active.status = Set(BookingStatus::Cancelled);
    let booking = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(booking_id = %booking.id, "booking cancelled by guest");
    audit::record(
        state,
        user.user_id,
        "booking_cancel",
        "bookings",
        serde_json::json!({ "booking_id": booking.id }),
    )
    .await;

    let detail = booking_detail(&state.orm, booking).await?;
    Ok(ApiResponse::item("Booking cancelled", detail))
}

pub async fn add_service_line(
    state: &AppState,
    user: &AuthUser,
    booking_id: Uuid,
    payload: AddServiceRequest,
) -> AppResult<ApiResponse<BookingDetail>> {
    let booking_id = visible_booking(state, user, booking_id).await?.id;
    if payload.quantity < 1 {
        return Err(AppError::BadRequest("Quantity must be at least 1".into()));
    }

    // Check-out locks the same row before totalling the invoice.
    let txn = state.orm.begin().await?;
    let booking = Bookings::find_by_id(booking_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    if matches!(
        booking.status,
        BookingStatus::Cancelled | BookingStatus::CheckedOut
    ) {
        return Err(AppError::BadRequest(
            "Services cannot be added to a closed booking".into(),
        ));
    }

    let stay = StayWindow::new(booking.check_in, booking.check_out)?;
    if !stay.contains(payload.usage_date) {
        return Err(StayError::OutsideStay.into());
    }

    let service = Services::find_by_id(payload.service_id)
        .filter(ServiceCol::Active.eq(true))
        .one(&txn)
        .await?;
    let service = match service {
        Some(s) => s,
        None => return Err(AppError::BadRequest("Service does not exist".into())),
    };

    let line = LineActive {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking.id),
        service_id: Set(service.id),
        usage_date: Set(payload.usage_date),
        usage_time: Set(payload.usage_time),
        quantity: Set(payload.quantity),
        line_total: Set(line_total(service.fee, payload.quantity)?),
        note: Set(payload.note),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    audit::record(
        state,
        user.user_id,
        "booking_service_add",
        "booked_services",
        serde_json::json!({ "booking_id": booking.id, "line_id": line.id }),
    )
    .await;

    let detail = booking_detail(&state.orm, booking).await?;
    Ok(ApiResponse::item("Service added", detail))
}

/// Operators see every booking; customers only their own.
async fn visible_booking(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<BookingModel> {
    let booking = match Bookings::find_by_id(id).one(&state.orm).await? {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    if user.role == UserRole::Customer {
        let customer = customer_profile(&state.orm, user).await?;
        if booking.customer_id != customer.id {
            return Err(AppError::Forbidden);
        }
    }
    Ok(booking)
}

pub async fn booking_detail<C: ConnectionTrait>(
    conn: &C,
    booking: BookingModel,
) -> AppResult<BookingDetail> {
    let services = BookedServices::find()
        .filter(LineCol::BookingId.eq(booking.id))
        .order_by_asc(LineCol::UsageDate)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let invoice = Invoices::find()
        .filter(InvoiceCol::BookingId.eq(booking.id))
        .one(conn)
        .await?
        .map(Into::into);

    Ok(BookingDetail {
        booking: booking.into(),
        services,
        invoice,
    })
}
