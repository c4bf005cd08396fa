use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::requests::{CreateServiceRequest, RequestActionRequest, ServiceRequestList},
    entity::{
        bookings::{Column as BookingCol, Entity as Bookings},
        enums::{EmploymentStatus, RequestStatus, UserRole},
        service_requests::{ActiveModel as RequestActive, Column as RequestCol, Entity as ServiceRequests},
        staff::{Column as StaffCol, Entity as Staff},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_customer, ensure_operator},
    models::ServiceRequest,
    response::{ApiResponse, Meta},
    routes::params::RequestListQuery,
    services::booking_service::customer_profile,
    state::AppState,
    workflow::request::{Actor, RequestAction, RequestState},
};

/// Guests raise requests against the room of one of their active stays.
pub async fn create_request(
    state: &AppState,
    user: &AuthUser,
    booking_id: Uuid,
    payload: CreateServiceRequest,
) -> AppResult<ApiResponse<ServiceRequest>> {
    ensure_customer(user)?;
    let customer = customer_profile(&state.orm, user).await?;

    let content = payload.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest("Request content is required".into()));
    }

    let booking = Bookings::find_by_id(booking_id)
        .filter(BookingCol::CustomerId.eq(customer.id))
        .one(&state.orm)
        .await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    if !booking.status.is_active() {
        return Err(AppError::BadRequest(
            "Requests can only be raised for confirmed or checked-in bookings".into(),
        ));
    }

    let now = Utc::now();
    let request = RequestActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer.id),
        room_id: Set(booking.room_id),
        staff_id: Set(None),
        category: Set(payload.category),
        content: Set(content),
        status: Set(RequestStatus::Unassigned),
        note: Set(String::new()),
        created_at: NotSet,
        updated_at: Set(now.into()),
        completed_at: Set(None),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        state,
        user.user_id,
        "service_request_create",
        "service_requests",
        serde_json::json!({ "request_id": request.id, "booking_id": booking.id }),
    )
    .await;

    Ok(ApiResponse::item("Request submitted", request.into()))
}

pub async fn list_my_requests(
    state: &AppState,
    user: &AuthUser,
    query: RequestListQuery,
) -> AppResult<ApiResponse<ServiceRequestList>> {
    ensure_customer(user)?;
    let customer = customer_profile(&state.orm, user).await?;
    let condition = Condition::all().add(RequestCol::CustomerId.eq(customer.id));
    list_with(state, condition, query).await
}

/// Administrators see every request; staff see the unassigned pool and their own.
pub async fn list_requests(
    state: &AppState,
    user: &AuthUser,
    query: RequestListQuery,
) -> AppResult<ApiResponse<ServiceRequestList>> {
    ensure_operator(user)?;
    let condition = match actor_for(state, user).await? {
        Actor::Admin => Condition::all(),
        Actor::Staff(staff_id) => Condition::all().add(
            Condition::any()
                .add(RequestCol::StaffId.is_null())
                .add(RequestCol::StaffId.eq(staff_id)),
        ),
    };
    list_with(state, condition, query).await
}

async fn list_with(
    state: &AppState,
    mut condition: Condition,
    query: RequestListQuery,
) -> AppResult<ApiResponse<ServiceRequestList>> {
    let (page, limit, offset) = query.pagination().normalize();
    if let Some(status) = query.status {
        condition = condition.add(RequestCol::Status.eq(status));
    }

    let finder = ServiceRequests::find()
        .filter(condition)
        .order_by_desc(RequestCol::CreatedAt);
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
        "Requests",
        ServiceRequestList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn process_request(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: RequestActionRequest,
) -> AppResult<ApiResponse<ServiceRequest>> {
    ensure_operator(user)?;
    let actor = actor_for(state, user).await?;
    let action = payload.action;

    if let RequestAction::Assign { staff_id } = action {
        let assignee = Staff::find_by_id(staff_id).one(&state.orm).await?;
        match assignee {
            Some(s) if s.employment_status == EmploymentStatus::Active => {}
            Some(_) => {
                return Err(AppError::BadRequest(
                    "Only active staff members can be assigned".into(),
                ));
            }
            None => return Err(AppError::BadRequest("Staff member not found".into())),
        }
    }

    let txn = state.orm.begin().await?;
    let request = ServiceRequests::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let request = match request {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let current = RequestState {
        status: request.status,
        staff_id: request.staff_id,
    };
    let next = match action.apply(actor, current) {
        Ok(next) => next,
        Err(err) => {
            tracing::warn!(
                request_id = %request.id,
                user_id = %user.user_id,
                action = action.as_str(),
                status = ?request.status,
                "request action rejected"
            );
            return Err(err.into());
        }
    };

    let now = Utc::now();
    let completed = next.status == RequestStatus::Resolved && current.status != RequestStatus::Resolved;
    let mut active: RequestActive = request.into();
    active.status = Set(next.status);
    active.staff_id = Set(next.staff_id);
    if let Some(note) = payload.note {
        active.note = Set(note);
    }
    if completed {
        active.completed_at = Set(Some(now.into()));
    }
    active.updated_at = Set(now.into());
    let request = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        request_id = %request.id,
        action = action.as_str(),
        status = ?request.status,
        "service request updated"
    );
    audit::record(
        state,
        user.user_id,
        "service_request_update",
        "service_requests",
        serde_json::json!({
            "request_id": request.id,
            "action": action.as_str(),
            "status": request.status,
        }),
    )
    .await;

    Ok(ApiResponse::item(
        format!("Request updated: {}", action.as_str()),
        request.into(),
    ))
}

async fn actor_for(state: &AppState, user: &AuthUser) -> AppResult<Actor> {
    match user.role {
        UserRole::Admin => Ok(Actor::Admin),
        UserRole::Staff => {
            let profile = Staff::find()
                .filter(StaffCol::UserId.eq(user.user_id))
                .one(&state.orm)
                .await?;
            match profile {
                Some(staff) => Ok(Actor::Staff(staff.id)),
                None => {
                    tracing::warn!(user_id = %user.user_id, "staff account has no staff profile");
                    Err(AppError::Forbidden)
                }
            }
        }
        UserRole::Customer => Err(AppError::Forbidden),
    }
}
