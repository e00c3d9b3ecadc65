//! Application configuration.
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! [collections]
//! users = "users"
//! orders = "orders"
//!
//! [booking]
//! default_status_filter = "pending"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use review_desk_core::error::{CoreError, CoreResult};
use review_desk_core::types::{RecordCategory, StatusFilter};

/// Booking filter values offered by the status buttons
const BOOKING_FILTERS: &[&str] = &["all", "pending", "accepted", "rejected"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote collection name per category
    pub collections: CollectionNames,
    /// Booking list defaults
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> CoreResult<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| CoreError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&raw)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Initial booking status filter
    #[must_use]
    pub fn booking_status_filter(&self) -> StatusFilter {
        StatusFilter::from(self.booking.default_status_filter.clone())
    }

    fn validate(&self) -> CoreResult<()> {
        if !BOOKING_FILTERS.contains(&self.booking.default_status_filter.as_str()) {
            return Err(CoreError::ConfigError(format!(
                "Invalid booking.default_status_filter '{}'. Must be one of: {}",
                self.booking.default_status_filter,
                BOOKING_FILTERS.join(", ")
            )));
        }

        let mut seen = HashSet::new();
        for category in RecordCategory::ALL {
            let name = self.collections.get(category);
            if name.trim().is_empty() {
                return Err(CoreError::ConfigError(format!(
                    "Collection name for {category} cannot be empty"
                )));
            }
            if !seen.insert(name) {
                return Err(CoreError::ConfigError(format!(
                    "Collection '{name}' is assigned to more than one category"
                )));
            }
        }
        Ok(())
    }
}

/// Remote collection names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionNames {
    pub users: String,
    pub consultant_applications: String,
    pub consultation_bookings: String,
    pub supplier_devices: String,
    pub orders: String,
    pub feedback: String,
    pub feature_suggestions: String,
}

impl CollectionNames {
    /// Collection backing a category
    #[must_use]
    pub fn get(&self, category: RecordCategory) -> &str {
        match category {
            RecordCategory::User => &self.users,
            RecordCategory::ConsultantApplication => &self.consultant_applications,
            RecordCategory::ConsultationBooking => &self.consultation_bookings,
            RecordCategory::SupplierDevice => &self.supplier_devices,
            RecordCategory::Order => &self.orders,
            RecordCategory::Feedback => &self.feedback,
            RecordCategory::FeatureSuggestion => &self.feature_suggestions,
        }
    }

    /// Category backed by a collection
    #[must_use]
    pub fn category_of(&self, collection: &str) -> Option<RecordCategory> {
        RecordCategory::ALL
            .into_iter()
            .find(|c| self.get(*c) == collection)
    }
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            users: RecordCategory::User.collection_name().to_string(),
            consultant_applications: RecordCategory::ConsultantApplication
                .collection_name()
                .to_string(),
            consultation_bookings: RecordCategory::ConsultationBooking
                .collection_name()
                .to_string(),
            supplier_devices: RecordCategory::SupplierDevice.collection_name().to_string(),
            orders: RecordCategory::Order.collection_name().to_string(),
            feedback: RecordCategory::Feedback.collection_name().to_string(),
            feature_suggestions: RecordCategory::FeatureSuggestion
                .collection_name()
                .to_string(),
        }
    }
}

/// Booking list defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// `all`, `pending`, `accepted` or `rejected`
    pub default_status_filter: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_status_filter: StatusFilter::ALL_TOKEN.to_string(),
        }
    }
}
