use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    dto::rooms::{RoomDetail, RoomList, ServiceList},
    entity::{
        room_photos::{Column as PhotoCol, Entity as RoomPhotos},
        rooms::{Column as RoomCol, Entity as Rooms},
        services::{Column as ServiceCol, Entity as Services},
    },
    error::{AppError, AppResult},
    models::Service,
    response::{ApiResponse, Meta},
    routes::params::RoomQuery,
    state::AppState,
};

pub async fn list_rooms(state: &AppState, query: RoomQuery) -> AppResult<ApiResponse<RoomList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(RoomCol::Status.eq(status));
    }
    if let Some(room_type) = query.room_type {
        condition = condition.add(RoomCol::RoomType.eq(room_type));
    }
    if let Some(guests) = query.guests.filter(|g| *g > 0) {
        condition = condition.add(RoomCol::Capacity.gte(guests));
    }

    let finder = Rooms::find()
        .filter(condition)
        .order_by_asc(RoomCol::NightlyRate)
        .order_by_asc(RoomCol::Name);

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
        "Rooms",
        RoomList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_room(state: &AppState, id: Uuid) -> AppResult<ApiResponse<RoomDetail>> {
    let room = match Rooms::find_by_id(id).one(&state.orm).await? {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let photos = RoomPhotos::find()
        .filter(PhotoCol::RoomId.eq(room.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let available_services = active_services(state).await?;

    Ok(ApiResponse::item(
        "Room",
        RoomDetail {
            room: room.into(),
            photos,
            available_services,
        },
    ))
}

pub async fn list_services(state: &AppState) -> AppResult<ApiResponse<ServiceList>> {
    let items = active_services(state).await?;
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Services",
        ServiceList { items },
        Some(Meta::new(1, total, total)),
    ))
}

async fn active_services(state: &AppState) -> AppResult<Vec<Service>> {
    let services = Services::find()
        .filter(ServiceCol::Active.eq(true))
        .order_by_asc(ServiceCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(services)
}
