//! Review Desk Core Library
//!
//! Provides the review lifecycle logic behind the admin review desk:
//! - Status Engine (transition validation, badge classification)
//! - Booking Filter (status + free-text narrowing of consultation bookings)
//! - Aggregator (per-category total / pending counts)
//! - Panel Controller (session-scoped load, refresh and mutation orchestration)
//!
//! The remote document store, notifications and the admin session are
//! abstracted through traits so every frontend can inject its own adapters.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{PanelController, ServiceContext};
pub use traits::{AdminSession, Notifier, RecordStore};
