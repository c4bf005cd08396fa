use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{entity::enums::Shift, models::ShiftSchedule};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateShiftRequest {
    pub staff_id: Uuid,
    pub work_date: NaiveDate,
    pub shift: Shift,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleList {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub items: Vec<ShiftSchedule>,
}
