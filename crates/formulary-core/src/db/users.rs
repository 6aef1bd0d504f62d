//! User database operations.

use log::{debug, info};
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Database, DbError, DbResult};
use crate::models::{NewUser, User, UserUpdate};

const USER_COLUMNS: &str = "id, username, email, full_name, role, created_at, is_active";

impl Database {
    /// Add a user, assigning a fresh id and creation time.
    pub fn add_user(&self, new_user: NewUser) -> DbResult<User> {
        let user = User {
            id: new_id(),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            role: new_user.role,
            created_at: now(),
            is_active: new_user.is_active,
        };
        self.insert_user_row(&user)?;
        info!("added user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Insert a fully-formed user row.
    pub(crate) fn insert_user_row(&self, user: &User) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (id, username, email, full_name, role, created_at, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user.id,
                user.username,
                user.email,
                user.full_name,
                user.role.as_str(),
                user.created_at,
                user.is_active,
            ],
        )?;
        Ok(())
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [id], read_user_row)
            .optional()?;
        row.map(User::try_from).transpose()
    }

    /// Get the first user (in insertion order) with the given username.
    pub fn find_user_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE username = ? ORDER BY rowid LIMIT 1",
            USER_COLUMNS
        );
        let row = self
            .conn
            .query_row(&sql, [username], read_user_row)
            .optional()?;
        row.map(User::try_from).transpose()
    }

    /// All users in insertion order.
    pub fn list_users(&self) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY rowid", USER_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_user_row)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?.try_into()?);
        }
        Ok(users)
    }

    /// Merge a partial update into a user. Returns false if the id is unknown.
    pub fn update_user(&self, id: &str, update: &UserUpdate) -> DbResult<bool> {
        let Some(mut user) = self.get_user(id)? else {
            debug!("update_user: no user {}", id);
            return Ok(false);
        };
        update.apply_to(&mut user);

        self.conn.execute(
            r#"
            UPDATE users SET
                username = ?2,
                email = ?3,
                full_name = ?4,
                role = ?5,
                is_active = ?6
            WHERE id = ?1
            "#,
            params![
                user.id,
                user.username,
                user.email,
                user.full_name,
                user.role.as_str(),
                user.is_active,
            ],
        )?;
        info!("updated user {}", id);
        Ok(true)
    }

    /// Delete a user. Returns false if the id is unknown.
    pub fn delete_user(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM users WHERE id = ?", [id])?;
        if rows_affected > 0 {
            info!("deleted user {}", id);
        } else {
            debug!("delete_user: no user {}", id);
        }
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct UserRow {
    id: String,
    username: String,
    email: String,
    full_name: String,
    role: String,
    created_at: String,
    is_active: bool,
}

fn read_user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        full_name: row.get(3)?,
        role: row.get(4)?,
        created_at: row.get(5)?,
        is_active: row.get(6)?,
    })
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            role: row.role.parse().map_err(DbError::Constraint)?,
            created_at: row.created_at,
            is_active: row.is_active,
        })
    }
}
