//! Mock order lookup.
//!
//! Order ids are pulled out of free text with a best-effort heuristic and
//! resolved against a fixed status table. There is no real order system
//! behind this.

use std::sync::LazyLock;

use regex::Regex;

/// Known order ids and their status lines.
const ORDER_STATUSES: &[(&str, &str)] = &[
    ("12345", "Your order is being processed."),
    ("67890", "Your order has been shipped and is on the way."),
    ("11111", "Your order has been delivered."),
];

/// Returned by [`extract_order_id`] when the text holds nothing usable.
pub const UNKNOWN_ORDER_ID: &str = "unknown";

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("digit-run pattern is valid"));

/// Extract an order id from a user message.
///
/// Takes the last standalone run of digits; falls back to the last
/// whitespace-delimited token, then to [`UNKNOWN_ORDER_ID`]. Messages that
/// mention several numbers (quantities, dates) resolve to the last one.
pub fn extract_order_id(text: &str) -> String {
    if text.is_empty() {
        return UNKNOWN_ORDER_ID.to_string();
    }

    if let Some(m) = DIGIT_RUN.find_iter(text).last() {
        return m.as_str().to_string();
    }

    text.split_whitespace()
        .last()
        .unwrap_or(UNKNOWN_ORDER_ID)
        .to_string()
}

/// Look up the status line for an order id.
pub fn order_status(order_id: &str) -> String {
    ORDER_STATUSES
        .iter()
        .find(|(id, _)| *id == order_id)
        .map(|(_, status)| (*status).to_string())
        .unwrap_or_else(|| format!("Order {order_id} not found."))
}

/// Render the fixed markdown reply for an order-status query.
pub fn format_order_reply(order_id: &str, status: &str) -> String {
    format!(
        "### Order status\n\n\
         - Order ID: **{order_id}**\n\
         - Status: {status}\n\n\
         ### Next steps\n\
         - If you want, share any extra details from your confirmation email \
         (carrier / tracking number) and I can help interpret it.\n"
    )
}
