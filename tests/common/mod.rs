#![allow(dead_code)]

use chrono::{Duration, NaiveDate, Utc};
use hotel_ops_api::{
    db::{create_pool, run_migrations},
    dto::auth::RegisterRequest,
    entity::{
        enums::{EmploymentStatus, Gender, RoomStatus, RoomType, StaffPosition, UserRole},
        rooms::ActiveModel as RoomActive,
        services::ActiveModel as ServiceActive,
        staff::ActiveModel as StaffActive,
        users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    services::auth_service,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

/// Returns `None` when no database is configured so callers can skip.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;

    // Clean tables between runs
    sqlx::query(
        "TRUNCATE TABLE audit_logs, invoices, service_requests, booked_services, bookings, \
         shift_schedules, staff, customers, room_photos, services, rooms, users CASCADE",
    )
    .execute(&pool)
    .await?;

    Ok(AppState::with_staging_ttl(pool, Duration::minutes(30)))
}

pub fn days_from_today(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub async fn register_customer(state: &AppState, email: &str) -> anyhow::Result<AuthUser> {
    let resp = auth_service::register_user(
        state,
        RegisterRequest {
            email: email.to_string(),
            password: "correct-horse".into(),
            full_name: "Test Guest".into(),
            phone: String::new(),
            address: String::new(),
        },
    )
    .await?;
    let registration = resp.data.expect("registration data");
    Ok(AuthUser {
        user_id: registration.user.id,
        role: UserRole::Customer,
    })
}

pub async fn create_operator(state: &AppState, role: UserRole, email: &str) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role,
    })
}

/// Staff profile, optionally linked to a login.
pub async fn create_staff(
    state: &AppState,
    user_id: Option<Uuid>,
    email: &str,
    employment_status: EmploymentStatus,
) -> anyhow::Result<Uuid> {
    let staff = StaffActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        full_name: Set("Test Staff".into()),
        gender: Set(Gender::Other),
        phone: Set(String::new()),
        email: Set(email.to_string()),
        address: Set(String::new()),
        position: Set(StaffPosition::Housekeeping),
        employment_status: Set(employment_status),
        hired_on: Set(days_from_today(-100)),
    }
    .insert(&state.orm)
    .await?;
    Ok(staff.id)
}

pub async fn create_room(
    state: &AppState,
    name: &str,
    nightly_rate: i64,
    capacity: i32,
) -> anyhow::Result<Uuid> {
    let room = RoomActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        nightly_rate: Set(nightly_rate),
        room_type: Set(RoomType::Standard),
        capacity: Set(capacity),
        status: Set(RoomStatus::Available),
        description: Set(String::new()),
        policy: Set(String::new()),
        amenities: Set(String::new()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(room.id)
}

pub async fn create_service(
    state: &AppState,
    name: &str,
    fee: i64,
    active: bool,
) -> anyhow::Result<Uuid> {
    let service = ServiceActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(String::new()),
        fee: Set(fee),
        active: Set(active),
    }
    .insert(&state.orm)
    .await?;
    Ok(service.id)
}
