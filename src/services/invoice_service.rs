use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::invoices::{InvoiceList, PayInvoiceRequest},
    entity::{
        booked_services::{Column as LineCol, Entity as BookedServices},
        bookings::{ActiveModel as BookingActive, Entity as Bookings, Model as BookingModel},
        invoices::{ActiveModel as InvoiceActive, Column as InvoiceCol, Entity as Invoices, Model as InvoiceModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Invoice,
    response::{ApiResponse, Meta},
    routes::params::InvoiceListQuery,
    state::AppState,
    workflow::stay::invoice_total,
};

/// Returns the booking's invoice, creating it on first call. The flag is true
/// when this call created it.
pub async fn ensure_invoice<C: ConnectionTrait>(
    conn: &C,
    booking: &BookingModel,
) -> AppResult<(InvoiceModel, bool)> {
    let existing = Invoices::find()
        .filter(InvoiceCol::BookingId.eq(booking.id))
        .one(conn)
        .await?;
    if let Some(invoice) = existing {
        return Ok((invoice, false));
    }

    let line_totals = BookedServices::find()
        .filter(LineCol::BookingId.eq(booking.id))
        .all(conn)
        .await?
        .into_iter()
        .map(|line| line.line_total);
    let total_amount = invoice_total(booking.price, line_totals)?;

    let invoice_id = Uuid::new_v4();
    let invoice = InvoiceActive {
        id: Set(invoice_id),
        booking_id: Set(booking.id),
        invoice_number: Set(build_invoice_number(invoice_id)),
        total_amount: Set(total_amount),
        paid: Set(false),
        payment_method: Set(None),
        created_at: NotSet,
    }
    .insert(conn)
    .await?;

    Ok((invoice, true))
}

pub async fn list_invoices(
    state: &AppState,
    user: &AuthUser,
    query: InvoiceListQuery,
) -> AppResult<ApiResponse<InvoiceList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(paid) = query.paid {
        condition = condition.add(InvoiceCol::Paid.eq(paid));
    }

    let finder = Invoices::find()
        .filter(condition)
        .order_by_desc(InvoiceCol::CreatedAt);
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
        "Invoices",
        InvoiceList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Settles an invoice and flags its booking as paid.
pub async fn pay_invoice(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: PayInvoiceRequest,
) -> AppResult<ApiResponse<Invoice>> {
    ensure_admin(user)?;
    let payment_method = payload.payment_method.trim().to_string();
    if payment_method.is_empty() {
        return Err(AppError::BadRequest("Payment method is required".into()));
    }

    let txn = state.orm.begin().await?;
    let invoice = Invoices::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let invoice = match invoice {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };
    if invoice.paid {
        return Err(AppError::BadRequest("Invoice already paid".into()));
    }

    let booking_id = invoice.booking_id;
    let mut active: InvoiceActive = invoice.into();
    active.paid = Set(true);
    active.payment_method = Set(Some(payment_method));
    let invoice = active.update(&txn).await?;

    if let Some(booking) = Bookings::find_by_id(booking_id).one(&txn).await? {
        let mut booking: BookingActive = booking.into();
        booking.paid = Set(true);
        booking.update(&txn).await?;
    }
    txn.commit().await?;

    tracing::info!(invoice_id = %invoice.id, "invoice paid");
    audit::record(
        state,
        user.user_id,
        "invoice_paid",
        "invoices",
        serde_json::json!({ "invoice_id": invoice.id, "booking_id": booking_id }),
    )
    .await;

    Ok(ApiResponse::item("Payment recorded", invoice.into()))
}

fn build_invoice_number(invoice_id: Uuid) -> String {
    let date = Utc::now().format("%Y%m%d");
    let simple = invoice_id.simple().to_string();
    let short = simple.get(..8).unwrap_or(&simple);
    format!("INV-{}-{}", date, short.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::build_invoice_number;
    use uuid::Uuid;

    #[test]
    fn invoice_number_has_date_and_short_id() {
        let id = Uuid::parse_str("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
        let number = build_invoice_number(id);
        assert!(number.starts_with("INV-"));
        assert!(number.ends_with("-0F8FAD5B"));
        assert_eq!(number.len(), "INV-20260101-0F8FAD5B".len());
    }
}
