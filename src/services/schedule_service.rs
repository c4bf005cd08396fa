use chrono::{Datelike, Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::schedules::{CreateShiftRequest, ScheduleList},
    entity::{
        shift_schedules::{ActiveModel as ShiftActive, Column as ShiftCol, Entity as ShiftSchedules},
        staff::Entity as Staff,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_operator},
    models::ShiftSchedule,
    response::{ApiResponse, Meta},
    routes::params::ScheduleQuery,
    state::AppState,
};

pub async fn list_shifts(
    state: &AppState,
    user: &AuthUser,
    query: ScheduleQuery,
) -> AppResult<ApiResponse<ScheduleList>> {
    ensure_operator(user)?;
    let (from, to) = schedule_range(query.from, query.to, Utc::now().date_naive())?;

    let mut condition = Condition::all()
        .add(ShiftCol::WorkDate.gte(from))
        .add(ShiftCol::WorkDate.lte(to));
    if let Some(staff_id) = query.staff_id {
        condition = condition.add(ShiftCol::StaffId.eq(staff_id));
    }

    let items: Vec<ShiftSchedule> = ShiftSchedules::find()
        .filter(condition)
        .order_by_asc(ShiftCol::WorkDate)
        .order_by_asc(ShiftCol::Shift)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len() as i64;

    Ok(ApiResponse::success(
        "Schedule",
        ScheduleList { from, to, items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn add_shift(
    state: &AppState,
    user: &AuthUser,
    payload: CreateShiftRequest,
) -> AppResult<ApiResponse<ShiftSchedule>> {
    ensure_admin(user)?;
    if Staff::find_by_id(payload.staff_id).one(&state.orm).await?.is_none() {
        return Err(AppError::BadRequest("Staff member not found".into()));
    }

    let duplicate = ShiftSchedules::find()
        .filter(
            Condition::all()
                .add(ShiftCol::StaffId.eq(payload.staff_id))
                .add(ShiftCol::WorkDate.eq(payload.work_date))
                .add(ShiftCol::Shift.eq(payload.shift)),
        )
        .one(&state.orm)
        .await?;
    if duplicate.is_some() {
        return Err(duplicate_shift());
    }

    let shift = ShiftActive {
        id: Set(Uuid::new_v4()),
        staff_id: Set(payload.staff_id),
        work_date: Set(payload.work_date),
        shift: Set(payload.shift),
        note: Set(payload.note),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        // A concurrent insert won the race past the check above.
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_shift(),
        _ => err.into(),
    })?;

    audit::record(
        state,
        user.user_id,
        "shift_create",
        "shift_schedules",
        serde_json::json!({ "shift_id": shift.id, "staff_id": shift.staff_id }),
    )
    .await;

    Ok(ApiResponse::item("Shift added", shift.into()))
}

pub async fn delete_shift(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = ShiftSchedules::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        state,
        user.user_id,
        "shift_delete",
        "shift_schedules",
        serde_json::json!({ "shift_id": id }),
    )
    .await;

    Ok(ApiResponse::item("Shift deleted", serde_json::json!({})))
}

fn duplicate_shift() -> AppError {
    AppError::Conflict("Staff member already has this shift".into())
}

/// Defaults to the Monday-to-Sunday week containing `today`.
fn schedule_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> AppResult<(NaiveDate, NaiveDate)> {
    let from = from.unwrap_or_else(|| {
        today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
    });
    let to = match to {
        Some(to) => to,
        None => from
            .checked_add_signed(Duration::days(6))
            .ok_or_else(|| AppError::BadRequest("Range start is out of bounds".into()))?,
    };
    if to < from {
        return Err(AppError::BadRequest("Range end is before range start".into()));
    }
    if (to - from).num_days() > 62 {
        return Err(AppError::BadRequest("Range cannot exceed 62 days".into()));
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_range_is_current_week() {
        // 2026-10-21 is a Wednesday.
        let (from, to) = schedule_range(None, None, d(2026, 10, 21)).unwrap();
        assert_eq!(from, d(2026, 10, 19));
        assert_eq!(to, d(2026, 10, 25));
    }

    #[test]
    fn default_end_near_max_date_is_rejected() {
        let result = schedule_range(Some(NaiveDate::MAX), None, d(2026, 10, 1));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(schedule_range(Some(d(2026, 10, 10)), Some(d(2026, 10, 1)), d(2026, 10, 1)).is_err());
    }
}
