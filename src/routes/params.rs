use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::enums::{BookingStatus, RequestStatus, RoomStatus, RoomType};

const MAX_PAGE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct RoomQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
    /// Minimum capacity.
    pub guests: Option<i32>,
}

impl RoomQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct BookingListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<BookingStatus>,
    pub room_id: Option<Uuid>,
    pub sort_order: Option<SortOrder>,
}

impl BookingListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct RequestListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<RequestStatus>,
}

impl RequestListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct InvoiceListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub paid: Option<bool>,
}

impl InvoiceListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ScheduleQuery {
    /// First day of the range, defaults to the Monday of the current week.
    pub from: Option<NaiveDate>,
    /// Last day of the range (inclusive), defaults to `from + 6 days`.
    pub to: Option<NaiveDate>,
    pub staff_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
        let p = Pagination {
            page: Some(3),
            per_page: Some(500),
        };
        assert_eq!(p.normalize(), (3, 100, 200));
        let p = Pagination {
            page: Some(-2),
            per_page: Some(0),
        };
        assert_eq!(p.normalize(), (1, 1, 0));
        let p = Pagination {
            page: Some(i64::MAX),
            per_page: Some(i64::MAX),
        };
        assert_eq!(p.normalize(), (MAX_PAGE, 100, (MAX_PAGE - 1) * 100));
    }
}
