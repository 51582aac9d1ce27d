//! Delivery-eligibility filter for orders.

use crate::{ClientError, ClientResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use fieldsale_api::{Order, OrderStatus};

/// Statuses of orders that still need to be delivered.
pub const DELIVERY_STATUSES: [OrderStatus; 2] = [OrderStatus::Preparing, OrderStatus::OnRoute];

/// Parse an order date to a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date in the timestamp's
/// own offset) and offset-less `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_order_date(raw: &str) -> ClientResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(ClientError::Decode(format!("invalid order date: {raw:?}")))
}

/// Whether an order with a parsed date is due for delivery on or after `today`.
pub fn is_deliverable(order: &Order, date: NaiveDate, today: NaiveDate) -> bool {
    DELIVERY_STATUSES.contains(&order.status) && date >= today
}

/// Keep the orders that are preparing or on route and dated today or later.
///
/// Source order is preserved. Every date is parsed, so one malformed date
/// fails the whole list even if that order would have been filtered out by
/// status.
pub fn filter_for_delivery(orders: Vec<Order>, today: NaiveDate) -> ClientResult<Vec<Order>> {
    let mut eligible = Vec::with_capacity(orders.len());
    for order in orders {
        let date = parse_order_date(&order.date)?;
        if is_deliverable(&order, date, today) {
            eligible.push(order);
        }
    }
    Ok(eligible)
}
