use log::info;

use crate::store::models::User;

/// Who the current process is acting as
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
}

/// Explicit session context passed to the views that need it. Lifecycle:
/// unauthenticated at startup, authenticated after login or registration,
/// unauthenticated again after logout. Never persisted: every run of the
/// process starts logged out, whatever the store contains.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn login(&mut self, user: &User) {
        info!("Session authenticated for {}", user.email);
        self.user = Some(SessionUser {
            name: user.name.clone(),
            email: user.email.clone(),
        });
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Session ended for {}", user.email);
        }
    }
}
