//! Record store abstract Trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::types::{RecordCategory, StoredDocument};

/// Remote document store holding one collection per category
///
/// Only bulk reads and status updates are needed; records are created by
/// intake flows elsewhere and are never deleted here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get every document of a category
    ///
    /// # Arguments
    /// * `category` - Record category
    async fn list_all(&self, category: RecordCategory) -> CoreResult<Vec<StoredDocument>>;

    /// Write a new status and update time to one document
    ///
    /// # Arguments
    /// * `category` - Record category
    /// * `id` - Document ID
    /// * `status` - new status
    /// * `updated_at` - timestamp stamped alongside the status
    async fn update_status(
        &self,
        category: RecordCategory,
        id: &str,
        status: &str,
        updated_at: DateTime<Utc>,
    ) -> CoreResult<()>;
}
