//! Dashboard summary types

use serde::{Deserialize, Serialize};

use crate::types::RecordCategory;

/// Summary tile for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: RecordCategory,
    pub total: usize,
    pub pending_count: usize,
}

/// Summary tiles for every category, in dashboard order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub tiles: Vec<CategorySummary>,
}

impl DashboardSummary {
    /// Tile for a single category
    #[must_use]
    pub fn get(&self, category: RecordCategory) -> Option<&CategorySummary> {
        self.tiles.iter().find(|t| t.category == category)
    }
}

/// Counters shown next to the booking status filter buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}
