//! Status Engine
//!
//! Pure review-lifecycle rules: which statuses count as pending, which
//! terminal status an action writes, and how a status is presented.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{Badge, RecordCategory, ReviewAction, Severity};

/// Outcome of a valid transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Terminal status to persist
    pub status: &'static str,
    /// Timestamp stamped alongside the status
    pub updated_at: DateTime<Utc>,
}

/// Whether the status is pending-equivalent for the category.
///
/// Absent, empty, and the category's pending token all count.
#[must_use]
pub fn is_pending(category: RecordCategory, status: Option<&str>) -> bool {
    match status {
        None | Some("") => true,
        Some(s) => s == category.pending_token(),
    }
}

/// Status used for filtering and aggregation: pending-equivalent values
/// collapse to the category's pending token.
#[must_use]
pub fn effective_status(category: RecordCategory, status: Option<&str>) -> &str {
    match status {
        Some(s) if !is_pending(category, Some(s)) => s,
        _ => category.pending_token(),
    }
}

/// Validate and compute a review transition.
///
/// Only pending-equivalent records may transition; anything else is an
/// `InvalidTransition` and nothing should be persisted.
pub fn apply_transition(
    category: RecordCategory,
    current: Option<&str>,
    action: ReviewAction,
) -> CoreResult<Transition> {
    if !is_pending(category, current) {
        return Err(CoreError::InvalidTransition {
            category,
            status: current.unwrap_or_default().to_string(),
            action: action.label_for(category).to_string(),
        });
    }

    let status = match action {
        ReviewAction::Approve => category.approved_status(),
        ReviewAction::Reject => category.rejected_status(),
    };

    Ok(Transition {
        status,
        updated_at: Utc::now(),
    })
}

/// Parse an action token for the category, then apply it.
///
/// A token from another category's action set (e.g. `cancel` on a booking)
/// is an `InvalidTransition`.
pub fn apply_transition_token(
    category: RecordCategory,
    current: Option<&str>,
    token: &str,
) -> CoreResult<Transition> {
    let action =
        ReviewAction::parse_for(category, token).ok_or_else(|| CoreError::InvalidTransition {
            category,
            status: current.unwrap_or_default().to_string(),
            action: token.to_string(),
        })?;
    apply_transition(category, current, action)
}

/// Classify a status for display. Total: never fails.
#[must_use]
pub fn classify(status: Option<&str>) -> Badge {
    let label = match status {
        None | Some("") => "pending",
        Some(s) => s,
    };
    let severity = match label {
        "approved" | "accepted" | "shipped" | "delivered" => Severity::Positive,
        "rejected" | "cancelled" => Severity::Negative,
        _ => Severity::Neutral,
    };
    Badge {
        label: label.to_string(),
        severity,
    }
}
