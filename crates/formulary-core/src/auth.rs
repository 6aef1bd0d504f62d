//! Demo authentication gate.
//!
//! Checks a username/password pair against two fixed credentials after a
//! fixed simulated delay. Passwords are compared as plain strings; there is
//! no hashing, lockout or rate limiting. Each credential is bound to one
//! stored account by id, so renaming the account does not move or break the
//! credential. The gate holds the current session until [`AuthGate::logout`].
//!
//! Sessions can only be created here; the facade only honours the session
//! the gate currently holds.

use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crate::db::{Database, DbResult};
use crate::models::{Role, User};

/// A username/password pair accepted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credential {
    pub username: &'static str,
    pub password: &'static str,
    /// Id of the stored account this credential signs in as
    pub user_id: &'static str,
}

/// The only credentials the gate accepts.
pub const DEMO_CREDENTIALS: [Credential; 2] = [
    Credential {
        username: "admin",
        password: "admin123",
        user_id: "1",
    },
    Credential {
        username: "apoteker1",
        password: "apoteker123",
        user_id: "2",
    },
];

/// The signed-in user, separate from the stored record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    user: User,
    started_at: String,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self {
            user,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn started_at(&self) -> &str {
        &self.started_at
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// Whether this session belongs to the given stored user.
    pub fn is_self(&self, user_id: &str) -> bool {
        self.user.id == user_id
    }
}

/// Authentication gate holding the current session.
#[derive(Debug)]
pub struct AuthGate {
    delay: Duration,
    current: Option<Session>,
}

impl AuthGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: None,
        }
    }

    /// Attempt a login.
    ///
    /// Always waits the configured delay first. On a credential match the
    /// stored record the credential is bound to is looked up, becomes the
    /// current session, and is returned. A mismatch resolves to `None` and leaves
    /// any existing session in place.
    pub async fn login(
        &mut self,
        db: &Database,
        username: &str,
        password: &str,
    ) -> DbResult<Option<User>> {
        tokio::time::sleep(self.delay).await;

        let Some(credential) = matching_credential(username, password) else {
            warn!("login rejected for {}", username);
            return Ok(None);
        };

        let user = db.get_user(credential.user_id)?;
        match &user {
            Some(u) => {
                info!("{} signed in as {}", u.username, u.role);
                self.current = Some(Session::new(u.clone()));
            }
            None => warn!("credentials for {} have no stored account", username),
        }
        Ok(user)
    }

    /// Clear the current session.
    pub fn logout(&mut self) {
        if let Some(session) = self.current.take() {
            info!("{} signed out", session.user.username);
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref().map(|s| &s.user)
    }

    /// Replace the held user record, keeping the session start time.
    pub(crate) fn refresh(&mut self, user: User) {
        if let Some(session) = self.current.as_mut() {
            session.user = user;
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

fn matching_credential(username: &str, password: &str) -> Option<&'static Credential> {
    DEMO_CREDENTIALS
        .iter()
        .find(|c| c.username == username && c.password == password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserUpdate;
    use tokio::time::Instant;

    fn gate() -> AuthGate {
        AuthGate::new(Duration::from_millis(1000))
    }

    #[tokio::test(start_paused = true)]
    async fn test_admin_login_after_delay() {
        let db = Database::seeded().unwrap();
        let mut gate = gate();
        let start = Instant::now();

        let user = gate.login(&db, "admin", "admin123").await.unwrap().unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(user.id, "1");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(gate.current_user(), Some(&user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_password_waits_and_fails() {
        let db = Database::seeded().unwrap();
        let mut gate = gate();
        let start = Instant::now();

        let user = gate.login(&db, "admin", "wrong").await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(user.is_none());
        assert!(gate.session().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apoteker_login() {
        let db = Database::seeded().unwrap();
        let mut gate = gate();

        let user = gate.login(&db, "apoteker1", "apoteker123").await.unwrap().unwrap();
        assert_eq!(user.full_name, "Dr. Sari Wijaya");
        assert_eq!(gate.session().unwrap().role(), Role::Apoteker);
    }

    #[tokio::test(start_paused = true)]
    async fn test_credentials_are_case_sensitive() {
        let db = Database::seeded().unwrap();
        let mut gate = gate();

        assert!(gate.login(&db, "Admin", "admin123").await.unwrap().is_none());
        assert!(gate.login(&db, "admin", "ADMIN123").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleted_account_cannot_sign_in() {
        let db = Database::seeded().unwrap();
        db.delete_user("2").unwrap();
        let mut gate = gate();

        assert!(gate
            .login(&db, "apoteker1", "apoteker123")
            .await
            .unwrap()
            .is_none());
        assert!(gate.session().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_renamed_account_keeps_its_credential() {
        let db = Database::seeded().unwrap();
        let rename = UserUpdate {
            username: Some("sari".into()),
            ..Default::default()
        };
        assert!(db.update_user("2", &rename).unwrap());
        let mut gate = gate();

        let user = gate
            .login(&db, "apoteker1", "apoteker123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "2");
        assert_eq!(user.username, "sari");
    }

    #[tokio::test(start_paused = true)]
    async fn test_taken_username_does_not_inherit_credential() {
        let db = Database::seeded().unwrap();
        let rename = UserUpdate {
            username: Some("admin".into()),
            ..Default::default()
        };
        assert!(db.update_user("2", &rename).unwrap());
        let mut gate = gate();

        let user = gate.login(&db, "admin", "admin123").await.unwrap().unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_session() {
        let db = Database::seeded().unwrap();
        let mut gate = gate();
        gate.login(&db, "admin", "admin123").await.unwrap();

        gate.logout();
        assert!(gate.session().is_none());

        // Second logout is harmless.
        gate.logout();
        assert!(gate.current_user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_login_keeps_existing_session() {
        let db = Database::seeded().unwrap();
        let mut gate = gate();
        gate.login(&db, "admin", "admin123").await.unwrap();

        assert!(gate.login(&db, "apoteker1", "nope").await.unwrap().is_none());
        assert_eq!(gate.current_user().unwrap().username, "admin");
    }
}
