//! SQLite schema definition.
//!
//! Tables keep the implicit rowid so that listing `ORDER BY rowid` returns
//! records in insertion order.

/// Complete database schema for the formulary.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Users
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    full_name TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('admin', 'apoteker')),
    created_at TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

-- ============================================================================
-- Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,                          -- no uniqueness on names
    category TEXT NOT NULL,
    therapeutic_class TEXT NOT NULL,
    sub_therapeutic_class TEXT NOT NULL,
    dosage TEXT NOT NULL,
    is_generic INTEGER NOT NULL DEFAULT 1,
    usage_restriction TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    side_effects TEXT NOT NULL DEFAULT '',
    manufacturer TEXT NOT NULL,
    price INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_medicines_category ON medicines(category);

-- ============================================================================
-- Diseases
-- ============================================================================

CREATE TABLE IF NOT EXISTS diseases (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    symptoms TEXT NOT NULL DEFAULT '[]',         -- JSON array of strings
    description TEXT NOT NULL DEFAULT '',
    treatment TEXT NOT NULL DEFAULT '',
    severity TEXT NOT NULL CHECK (severity IN ('ringan', 'sedang', 'berat')),
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_diseases_category ON diseases(category);
"#;
