use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::enums::RequestCategory, models::ServiceRequest, workflow::request::RequestAction,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    pub category: RequestCategory,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestActionRequest {
    #[serde(flatten)]
    pub action: RequestAction,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceRequestList {
    pub items: Vec<ServiceRequest>,
}
