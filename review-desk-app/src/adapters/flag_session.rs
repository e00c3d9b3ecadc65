//! Admin session backed by a plain flag

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use review_desk_core::traits::AdminSession;

/// Session flag set by the login flow and cleared on logout
#[derive(Debug)]
pub struct FlagSession {
    authenticated: AtomicBool,
}

impl FlagSession {
    /// A session that is already signed in
    #[must_use]
    pub fn active() -> Self {
        Self {
            authenticated: AtomicBool::new(true),
        }
    }

    /// A signed-out session
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            authenticated: AtomicBool::new(false),
        }
    }

    /// Mark the session signed in
    pub fn sign_in(&self) {
        self.authenticated.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AdminSession for FlagSession {
    async fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn end(&self) {
        if self.authenticated.swap(false, Ordering::SeqCst) {
            log::info!("Admin session ended");
        }
    }
}
