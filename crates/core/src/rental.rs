//! Rental policy: loan period and inventory arithmetic.

use crate::types::Date;

/// Number of days a checked-out video may be kept.
pub const RENTAL_PERIOD_DAYS: u64 = 7;

/// Due date for a video checked out on `checkout_date`.
pub fn due_date(checkout_date: Date) -> Date {
    checkout_date
        .checked_add_days(chrono::Days::new(RENTAL_PERIOD_DAYS))
        .unwrap_or(Date::MAX)
}

/// Copies of a video still on the shelf.
///
/// Never negative, even if inventory was lowered below the number of
/// outstanding rentals.
pub fn available_inventory(total_inventory: i32, checked_out: i64) -> i64 {
    (i64::from(total_inventory) - checked_out).max(0)
}

/// Whether one more copy can be checked out.
pub fn can_check_out(total_inventory: i32, checked_out: i64) -> bool {
    available_inventory(total_inventory, checked_out) > 0
}
