//! Collaborator abstraction trait definition

mod admin_session;
mod notifier;
mod record_store;

pub use admin_session::AdminSession;
pub use notifier::Notifier;
pub use record_store::RecordStore;
