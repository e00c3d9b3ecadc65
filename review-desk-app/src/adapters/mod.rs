//! Platform-agnostic adapters for frontends without a native backend.

mod flag_session;
mod log_notifier;
mod memory_record_store;

pub use flag_session::FlagSession;
pub use log_notifier::LogNotifier;
pub use memory_record_store::InMemoryRecordStore;
