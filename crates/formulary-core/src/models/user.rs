//! User account models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. Admins see every page; apotekers (pharmacists) see all but
/// user management and cannot change the formulary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Apoteker,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Apoteker];

    /// Stored form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Apoteker => "apoteker",
        }
    }

    /// Human-readable label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Apoteker => "Apoteker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "apoteker" => Ok(Role::Apoteker),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A stored user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Login name
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    /// Creation timestamp
    pub created_at: String,
    /// Inactive accounts stay listed but are flagged in the UI
    pub is_active: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Fields supplied when creating a user. Id and creation time are assigned
/// by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl NewUser {
    /// Create an active apoteker account, the user form's default.
    pub fn new(username: String, email: String, full_name: String) -> Self {
        Self {
            username,
            email,
            full_name,
            role: Role::Apoteker,
            is_active: true,
        }
    }
}

/// Partial update for a user. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Apply this patch to a user in place.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}
