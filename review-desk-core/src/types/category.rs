//! Record categories and review actions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of submitted record under review.
///
/// Each category lives in its own remote collection and has its own
/// pending token and terminal statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordCategory {
    User,
    ConsultantApplication,
    ConsultationBooking,
    SupplierDevice,
    Order,
    Feedback,
    FeatureSuggestion,
}

impl RecordCategory {
    /// All categories, in dashboard tile order.
    pub const ALL: [Self; 7] = [
        Self::User,
        Self::ConsultantApplication,
        Self::ConsultationBooking,
        Self::SupplierDevice,
        Self::Order,
        Self::Feedback,
        Self::FeatureSuggestion,
    ];

    /// Default remote collection name
    #[must_use]
    pub fn collection_name(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::ConsultantApplication => "consultantApplications",
            Self::ConsultationBooking => "consultationBookings",
            Self::SupplierDevice => "supplierDevices",
            Self::Order => "orders",
            Self::Feedback => "feedback",
            Self::FeatureSuggestion => "featureSuggestions",
        }
    }

    /// Status token meaning "not yet reviewed".
    ///
    /// Users are stored as `not-approved`; every other category uses `pending`.
    /// An absent status is pending-equivalent for all categories.
    #[must_use]
    pub fn pending_token(self) -> &'static str {
        match self {
            Self::User => "not-approved",
            _ => "pending",
        }
    }

    /// Terminal status written by an approve / advance action
    #[must_use]
    pub fn approved_status(self) -> &'static str {
        match self {
            Self::ConsultationBooking => "accepted",
            Self::Order => "processing",
            _ => "approved",
        }
    }

    /// Terminal status written by a reject / cancel action
    #[must_use]
    pub fn rejected_status(self) -> &'static str {
        match self {
            Self::Order => "cancelled",
            _ => "rejected",
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::User => "user",
            Self::ConsultantApplication => "consultant application",
            Self::ConsultationBooking => "consultation booking",
            Self::SupplierDevice => "supplier device",
            Self::Order => "order",
            Self::Feedback => "feedback",
            Self::FeatureSuggestion => "feature suggestion",
        };
        f.write_str(label)
    }
}

/// Review decision requested by an admin.
///
/// Orders present these as `advance-to-processing` and `cancel`;
/// every other category as `approve` and `reject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    /// Action token as presented for the given category
    #[must_use]
    pub fn label_for(self, category: RecordCategory) -> &'static str {
        match (category, self) {
            (RecordCategory::Order, Self::Approve) => "advance-to-processing",
            (RecordCategory::Order, Self::Reject) => "cancel",
            (_, Self::Approve) => "approve",
            (_, Self::Reject) => "reject",
        }
    }

    /// Parse an action token legal for the given category.
    ///
    /// Returns `None` for tokens that belong to another category's action set.
    #[must_use]
    pub fn parse_for(category: RecordCategory, token: &str) -> Option<Self> {
        [Self::Approve, Self::Reject]
            .into_iter()
            .find(|action| action.label_for(category) == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_uses_advance_and_cancel_tokens() {
        assert_eq!(
            ReviewAction::parse_for(RecordCategory::Order, "advance-to-processing"),
            Some(ReviewAction::Approve)
        );
        assert_eq!(
            ReviewAction::parse_for(RecordCategory::Order, "cancel"),
            Some(ReviewAction::Reject)
        );
        assert_eq!(ReviewAction::parse_for(RecordCategory::Order, "approve"), None);
    }

    #[test]
    fn other_categories_use_approve_and_reject() {
        for category in RecordCategory::ALL
            .into_iter()
            .filter(|c| *c != RecordCategory::Order)
        {
            assert_eq!(
                ReviewAction::parse_for(category, "approve"),
                Some(ReviewAction::Approve)
            );
            assert_eq!(
                ReviewAction::parse_for(category, "reject"),
                Some(ReviewAction::Reject)
            );
            assert_eq!(ReviewAction::parse_for(category, "cancel"), None);
        }
    }

    #[test]
    fn user_pending_token_is_not_approved() {
        assert_eq!(RecordCategory::User.pending_token(), "not-approved");
        assert_eq!(RecordCategory::Order.pending_token(), "pending");
    }

    #[test]
    fn category_serializes_camel_case() {
        let json = serde_json::to_string(&RecordCategory::FeatureSuggestion).unwrap();
        assert_eq!(json, "\"featureSuggestion\"");
    }
}
