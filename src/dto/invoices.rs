use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Invoice;

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceList {
    pub items: Vec<Invoice>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayInvoiceRequest {
    pub payment_method: String,
}
