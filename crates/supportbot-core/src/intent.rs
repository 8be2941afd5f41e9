//! Keyword-based intent classification.
//!
//! Binary heuristic: no negation handling, no confidence score.

use supportbot_types::chat::Intent;

/// Classify a raw user message.
///
/// A message is an order-status query when its lowercase form contains both
/// `"order"` and `"status"`; everything else, including empty text, is a
/// product question.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    if lowered.contains("order") && lowered.contains("status") {
        Intent::OrderStatus
    } else {
        Intent::ProductQuestion
    }
}
