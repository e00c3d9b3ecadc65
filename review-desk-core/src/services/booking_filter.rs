//! Booking Filter
//!
//! Narrows the consultation booking list by effective status and a
//! case-insensitive search over name, email and service type.

use crate::services::status_engine::effective_status;
use crate::types::{BookingStats, RecordCategory, ReviewRecord, StatusFilter};

/// Filter bookings, preserving input order.
///
/// Status and search compose with AND. An empty search term matches
/// everything; absent fields match as empty strings.
#[must_use]
pub fn filter_bookings(
    bookings: &[ReviewRecord],
    status_filter: &StatusFilter,
    search_term: &str,
) -> Vec<ReviewRecord> {
    let needle = search_term.to_lowercase();
    bookings
        .iter()
        .filter(|b| {
            status_filter.matches(effective_status(
                RecordCategory::ConsultationBooking,
                b.status.as_deref(),
            ))
        })
        .filter(|b| needle.is_empty() || matches_search(b, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercase
fn matches_search(booking: &ReviewRecord, needle: &str) -> bool {
    let fields = &booking.search;
    [&fields.display_name, &fields.email, &fields.service_type]
        .into_iter()
        .any(|field| {
            field
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(needle)
        })
}

/// Per-status booking counters
#[must_use]
pub fn booking_stats(bookings: &[ReviewRecord]) -> BookingStats {
    bookings
        .iter()
        .fold(BookingStats::default(), |mut stats, b| {
            stats.total += 1;
            match effective_status(RecordCategory::ConsultationBooking, b.status.as_deref()) {
                "pending" => stats.pending += 1,
                "accepted" => stats.accepted += 1,
                "rejected" => stats.rejected += 1,
                _ => {}
            }
            stats
        })
}
