//! Admin session Trait

use async_trait::async_trait;

/// Authenticated admin session flag
///
/// The flag is trusted as-is; nothing here verifies it.
#[async_trait]
pub trait AdminSession: Send + Sync {
    /// Whether an admin session is currently active
    async fn is_authenticated(&self) -> bool;

    /// Clear the session flag
    async fn end(&self);
}
