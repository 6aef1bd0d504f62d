//! Formulary Core Library
//!
//! In-memory data and authorization layer for a hospital formulary browser.
//!
//! # Architecture
//!
//! ```text
//!   login(username, password) ──► AuthGate ──► Session
//!                                                 │
//!                          ┌──────────────────────┼──────────────────────┐
//!                          ▼                      ▼                      ▼
//!                   allowed_menu(role)     guard_page(page)      Capabilities
//!                                                 │
//!                                                 ▼
//!                   Formulary (session-checked add / update / delete)
//!                                                 │
//!                          ┌──────────────────────┼──────────────────────┐
//!                          ▼                      ▼                      ▼
//!                      medicines              diseases                 users
//!                          └────────── in-memory SQLite ─────────────────┘
//! ```
//!
//! Nothing is persisted: every [`Formulary`] owns its own in-memory store,
//! seeded from fixtures, and forgets everything when dropped.
//!
//! # Modules
//!
//! - [`db`]: Entity store over in-memory SQLite, plus seed fixtures
//! - [`models`]: Domain types (User, Medicine, Disease, patches)
//! - [`auth`]: Demo login gate and session
//! - [`access`]: Menu filter, page guard, per-role capabilities
//! - [`bmi`]: BMI calculator and form checks
//! - [`validation`]: Required-field checks
//! - [`search`]: List filters
//! - [`reports`]: Dashboard figures and therapy protocols
//! - [`config`]: Runtime settings

pub mod access;
pub mod auth;
pub mod bmi;
pub mod config;
pub mod db;
pub mod models;
pub mod reports;
pub mod search;
pub mod validation;

// Re-export commonly used types
pub use access::{allowed_menu, guard_page, Capabilities, MenuEntry, Page, PageAccess};
pub use auth::{AuthGate, Session};
pub use bmi::{calculate_bmi, BmiCategory, BmiForm, BmiInputError, BmiResult, Gender};
pub use config::FormularyConfig;
pub use db::{Database, DbError};
pub use models::{
    Disease, DiseaseUpdate, Medicine, MedicineUpdate, NewDisease, NewMedicine, NewUser, Role,
    Severity, UsageRestriction, User, UserUpdate,
};
pub use search::ListQuery;
pub use validation::{Validate, ValidationError};

use log::warn;

use reports::{DashboardSummary, TherapyProtocol};

pub const SELF_DELETE_WARNING: &str = "Anda tidak dapat menghapus akun Anda sendiri";
pub const SELF_DEACTIVATE_WARNING: &str = "Anda tidak dapat menonaktifkan akun Anda sendiri";

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum FormularyError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BmiInput(#[from] BmiInputError),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Attempt to delete or deactivate the signed-in account
    #[error("{0}")]
    SelfModification(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type FormularyResult<T> = Result<T, FormularyError>;

// =========================================================================
// Deletion
// =========================================================================

/// The user's answer to a delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// No record with that id; nothing changed
    NotFound,
    /// Prompt declined; the store was not touched
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Medicines,
    Diseases,
    Users,
}

impl Collection {
    /// Question shown before a delete in this collection.
    pub fn delete_prompt(&self) -> &'static str {
        match self {
            Collection::Medicines => "Apakah Anda yakin ingin menghapus obat ini dari formularium?",
            Collection::Diseases => "Apakah Anda yakin ingin menghapus penyakit ini?",
            Collection::Users => "Apakah Anda yakin ingin menghapus pengguna ini?",
        }
    }
}

fn delete_outcome(removed: bool) -> DeleteOutcome {
    if removed {
        DeleteOutcome::Deleted
    } else {
        DeleteOutcome::NotFound
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Entity store plus login gate. Every mutation takes the acting session
/// explicitly; it must be the session the gate currently holds, and its
/// role must carry the matching capability.
pub struct Formulary {
    db: Database,
    auth: AuthGate,
}

impl Formulary {
    /// Build a formulary with a fresh in-memory store.
    pub fn new(config: &FormularyConfig) -> FormularyResult<Self> {
        let db = if config.seed_fixtures {
            Database::seeded()?
        } else {
            Database::open_in_memory()?
        };
        Ok(Self::with_database(db, config))
    }

    /// Build a formulary around an existing store.
    pub fn with_database(db: Database, config: &FormularyConfig) -> Self {
        Self {
            db,
            auth: AuthGate::new(config.login_delay()),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in. Resolves to `None` on bad credentials after the same delay.
    pub async fn login(&mut self, username: &str, password: &str) -> FormularyResult<Option<User>> {
        Ok(self.auth.login(&self.db, username, password).await?)
    }

    pub fn logout(&mut self) {
        self.auth.logout();
    }

    pub fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    /// Menu for the current session; empty when signed out.
    pub fn menu(&self) -> Vec<&'static MenuEntry> {
        self.session()
            .map(|s| allowed_menu(s.role()))
            .unwrap_or_default()
    }

    pub fn open_page(&self, page: Page) -> PageAccess {
        guard_page(self.session(), page)
    }

    /// Edit the signed-in user's own name and email.
    pub fn update_profile(&mut self, full_name: &str, email: &str) -> FormularyResult<User> {
        let user_id = self
            .session()
            .map(|s| s.user_id().to_string())
            .ok_or(FormularyError::NotAuthenticated)?;

        let patch = UserUpdate {
            full_name: Some(full_name.to_string()),
            email: Some(email.to_string()),
            ..Default::default()
        };
        patch.validate()?;

        if !self.db.update_user(&user_id, &patch)? {
            return Err(FormularyError::NotFound(format!("user {}", user_id)));
        }
        let user = self
            .db
            .get_user(&user_id)?
            .ok_or_else(|| FormularyError::NotFound(format!("user {}", user_id)))?;
        self.auth.refresh(user.clone());
        Ok(user)
    }

    // =========================================================================
    // Medicines
    // =========================================================================

    pub fn medicines(&self) -> FormularyResult<Vec<Medicine>> {
        Ok(self.db.list_medicines()?)
    }

    pub fn search_medicines(&self, query: &ListQuery) -> FormularyResult<Vec<Medicine>> {
        let medicines = self.db.list_medicines()?;
        Ok(search::filter_medicines(&medicines, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn add_medicine(&self, session: &Session, medicine: NewMedicine) -> FormularyResult<Medicine> {
        self.authorize(session, |c| c.manage_medicines, "manage medicines")?;
        medicine.validate()?;
        Ok(self.db.add_medicine(medicine)?)
    }

    /// Returns false if the id is unknown.
    pub fn update_medicine(
        &self,
        session: &Session,
        id: &str,
        update: &MedicineUpdate,
    ) -> FormularyResult<bool> {
        self.authorize(session, |c| c.manage_medicines, "manage medicines")?;
        update.validate()?;
        Ok(self.db.update_medicine(id, update)?)
    }

    pub fn delete_medicine(
        &self,
        session: &Session,
        id: &str,
        confirmation: Confirmation,
    ) -> FormularyResult<DeleteOutcome> {
        self.authorize(session, |c| c.manage_medicines, "manage medicines")?;
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        Ok(delete_outcome(self.db.delete_medicine(id)?))
    }

    // =========================================================================
    // Diseases
    // =========================================================================

    pub fn diseases(&self) -> FormularyResult<Vec<Disease>> {
        Ok(self.db.list_diseases()?)
    }

    pub fn search_diseases(&self, query: &ListQuery) -> FormularyResult<Vec<Disease>> {
        let diseases = self.db.list_diseases()?;
        Ok(search::filter_diseases(&diseases, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn add_disease(&self, session: &Session, disease: NewDisease) -> FormularyResult<Disease> {
        self.authorize(session, |c| c.manage_diseases, "manage diseases")?;
        disease.validate()?;
        Ok(self.db.add_disease(disease)?)
    }

    /// Returns false if the id is unknown.
    pub fn update_disease(
        &self,
        session: &Session,
        id: &str,
        update: &DiseaseUpdate,
    ) -> FormularyResult<bool> {
        self.authorize(session, |c| c.manage_diseases, "manage diseases")?;
        update.validate()?;
        Ok(self.db.update_disease(id, update)?)
    }

    pub fn delete_disease(
        &self,
        session: &Session,
        id: &str,
        confirmation: Confirmation,
    ) -> FormularyResult<DeleteOutcome> {
        self.authorize(session, |c| c.manage_diseases, "manage diseases")?;
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        Ok(delete_outcome(self.db.delete_disease(id)?))
    }

    // =========================================================================
    // Users (admin only)
    // =========================================================================

    pub fn users(&self, session: &Session) -> FormularyResult<Vec<User>> {
        self.authorize(session, |c| c.manage_users, "manage users")?;
        Ok(self.db.list_users()?)
    }

    pub fn search_users(&self, session: &Session, term: &str) -> FormularyResult<Vec<User>> {
        let users = self.users(session)?;
        Ok(search::filter_users(&users, term).into_iter().cloned().collect())
    }

    pub fn add_user(&self, session: &Session, user: NewUser) -> FormularyResult<User> {
        self.authorize(session, |c| c.manage_users, "manage users")?;
        user.validate()?;
        Ok(self.db.add_user(user)?)
    }

    /// Returns false if the id is unknown. A patch that deactivates the
    /// signed-in account is rejected.
    pub fn update_user(&self, session: &Session, id: &str, update: &UserUpdate) -> FormularyResult<bool> {
        self.authorize(session, |c| c.manage_users, "manage users")?;
        if session.is_self(id) && update.is_active == Some(false) {
            return Err(self_modification(SELF_DEACTIVATE_WARNING));
        }
        update.validate()?;
        Ok(self.db.update_user(id, update)?)
    }

    /// Flip a user's active flag. Returns the new flag, or `None` if the id
    /// is unknown.
    pub fn toggle_user_status(&self, session: &Session, id: &str) -> FormularyResult<Option<bool>> {
        self.authorize(session, |c| c.manage_users, "manage users")?;
        if session.is_self(id) {
            return Err(self_modification(SELF_DEACTIVATE_WARNING));
        }
        let Some(user) = self.db.get_user(id)? else {
            return Ok(None);
        };

        let is_active = !user.is_active;
        let patch = UserUpdate {
            is_active: Some(is_active),
            ..Default::default()
        };
        self.db.update_user(id, &patch)?;
        Ok(Some(is_active))
    }

    pub fn delete_user(
        &self,
        session: &Session,
        id: &str,
        confirmation: Confirmation,
    ) -> FormularyResult<DeleteOutcome> {
        self.authorize(session, |c| c.manage_users, "manage users")?;
        if session.is_self(id) {
            return Err(self_modification(SELF_DELETE_WARNING));
        }
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }
        Ok(delete_outcome(self.db.delete_user(id)?))
    }

    // =========================================================================
    // Reports and calculator
    // =========================================================================

    pub fn dashboard(&self, session: &Session) -> FormularyResult<DashboardSummary> {
        let session = self.current_session(session)?;
        let medicines = self.db.list_medicines()?;
        let diseases = self.db.list_diseases()?;
        let users = self.db.list_users()?;
        Ok(DashboardSummary::build(session.role(), &medicines, &diseases, &users))
    }

    pub fn therapy_protocols(&self) -> FormularyResult<Vec<TherapyProtocol>> {
        let medicines = self.db.list_medicines()?;
        let diseases = self.db.list_diseases()?;
        Ok(reports::build_protocols(&medicines, &diseases))
    }

    pub fn calculate_bmi(&self, weight_kg: f64, height_cm: f64) -> BmiResult {
        calculate_bmi(weight_kg, height_cm)
    }

    /// Run the calculator form checks, then calculate.
    pub fn evaluate_bmi(&self, form: &BmiForm) -> FormularyResult<BmiResult> {
        Ok(form.evaluate()?)
    }

    // =========================================================================
    // Authorization
    // =========================================================================

    /// The held session, provided `session` is that same session. Sessions
    /// kept past a logout, or never issued by the gate, are refused.
    fn current_session(&self, session: &Session) -> FormularyResult<&Session> {
        match self.auth.session() {
            Some(current) if current.user_id() == session.user_id() => Ok(current),
            _ => {
                warn!(
                    "refused session for {}: not the signed-in session",
                    session.user().username
                );
                Err(FormularyError::NotAuthenticated)
            }
        }
    }

    fn authorize(
        &self,
        session: &Session,
        allowed: fn(&Capabilities) -> bool,
        action: &str,
    ) -> FormularyResult<()> {
        let current = self.current_session(session)?;
        if allowed(&Capabilities::for_role(current.role())) {
            return Ok(());
        }
        warn!("{} ({}) may not {}", current.user().username, current.role(), action);
        Err(FormularyError::Forbidden(format!(
            "role {} may not {}",
            current.role(),
            action
        )))
    }
}

fn self_modification(message: &str) -> FormularyError {
    warn!("rejected self-modification: {}", message);
    FormularyError::SelfModification(message.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::init_test_logger;

    fn formulary() -> Formulary {
        init_test_logger();
        let config = FormularyConfig {
            login_delay_ms: 0,
            ..Default::default()
        };
        Formulary::new(&config).unwrap()
    }

    async fn signed_in(username: &str, password: &str) -> (Formulary, Session) {
        let mut f = formulary();
        f.login(username, password).await.unwrap().unwrap();
        let session = f.session().unwrap().clone();
        (f, session)
    }

    async fn admin() -> (Formulary, Session) {
        signed_in("admin", "admin123").await
    }

    async fn apoteker() -> (Formulary, Session) {
        signed_in("apoteker1", "apoteker123").await
    }

    #[tokio::test]
    async fn test_apoteker_cannot_change_formulary() {
        let (f, session) = apoteker().await;

        let result = f.update_medicine(&session, "1", &MedicineUpdate::price(1));
        assert!(matches!(result, Err(FormularyError::Forbidden(_))));

        let result = f.delete_disease(&session, "1", Confirmation::Confirmed);
        assert!(matches!(result, Err(FormularyError::Forbidden(_))));
        assert_eq!(f.diseases().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_apoteker_cannot_list_users() {
        let (f, session) = apoteker().await;
        assert!(matches!(f.users(&session), Err(FormularyError::Forbidden(_))));
    }

    #[test]
    fn test_session_not_issued_by_gate_is_refused() {
        let f = formulary();
        let session = Session::new(f.database().get_user("1").unwrap().unwrap());

        let result = f.update_medicine(&session, "1", &MedicineUpdate::price(1));
        assert!(matches!(result, Err(FormularyError::NotAuthenticated)));
        assert!(matches!(f.dashboard(&session), Err(FormularyError::NotAuthenticated)));
        assert_eq!(f.database().get_medicine("1").unwrap().unwrap().price, 5000);
    }

    #[tokio::test]
    async fn test_other_users_session_is_refused() {
        let (f, _) = apoteker().await;
        let admin = Session::new(f.database().get_user("1").unwrap().unwrap());

        let result = f.delete_medicine(&admin, "1", Confirmation::Confirmed);
        assert!(matches!(result, Err(FormularyError::NotAuthenticated)));
        assert_eq!(f.medicines().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_validation_runs_before_store() {
        let (f, session) = admin().await;

        let patch = MedicineUpdate {
            name: Some("  ".into()),
            ..Default::default()
        };
        let result = f.update_medicine(&session, "1", &patch);
        assert!(matches!(
            result,
            Err(FormularyError::Validation(ValidationError::MissingField("Nama Obat")))
        ));
        assert_eq!(f.database().get_medicine("1").unwrap().unwrap().name, "Paracetamol");
    }

    #[tokio::test]
    async fn test_declined_delete_leaves_store() {
        let (f, session) = admin().await;

        let outcome = f.delete_medicine(&session, "1", Confirmation::Declined).unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(f.medicines().unwrap().len(), 3);

        let outcome = f.delete_medicine(&session, "1", Confirmation::Confirmed).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);

        let outcome = f.delete_medicine(&session, "1", Confirmation::Confirmed).unwrap();
        assert_eq!(outcome, DeleteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_self_delete_rejected() {
        let (f, session) = admin().await;

        let err = f.delete_user(&session, "1", Confirmation::Confirmed).unwrap_err();
        assert_eq!(err.to_string(), SELF_DELETE_WARNING);
        assert_eq!(f.users(&session).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_self_deactivate_rejected() {
        let (f, session) = admin().await;
        let before = f.users(&session).unwrap();

        let err = f.toggle_user_status(&session, "1").unwrap_err();
        assert_eq!(err.to_string(), SELF_DEACTIVATE_WARNING);

        let patch = UserUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            f.update_user(&session, "1", &patch),
            Err(FormularyError::SelfModification(_))
        ));

        assert_eq!(f.users(&session).unwrap(), before);
    }

    #[tokio::test]
    async fn test_toggle_other_user() {
        let (f, session) = admin().await;

        assert_eq!(f.toggle_user_status(&session, "2").unwrap(), Some(false));
        assert_eq!(f.toggle_user_status(&session, "2").unwrap(), Some(true));
        assert_eq!(f.toggle_user_status(&session, "missing").unwrap(), None);
    }

    #[test]
    fn test_delete_prompts() {
        assert_eq!(
            Collection::Diseases.delete_prompt(),
            "Apakah Anda yakin ingin menghapus penyakit ini?"
        );
    }

    #[test]
    fn test_unseeded_formulary_is_empty() {
        let config = FormularyConfig {
            login_delay_ms: 0,
            seed_fixtures: false,
        };
        let f = Formulary::new(&config).unwrap();
        assert!(f.medicines().unwrap().is_empty());
        assert!(f.diseases().unwrap().is_empty());
        assert!(f.menu().is_empty());
    }
}
