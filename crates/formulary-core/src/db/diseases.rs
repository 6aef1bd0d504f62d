//! Disease database operations.

use log::{debug, info};
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Database, DbError, DbResult};
use crate::models::{Disease, DiseaseUpdate, NewDisease};

const DISEASE_COLUMNS: &str =
    "id, name, category, symptoms, description, treatment, severity, created_at";

impl Database {
    /// Add a disease, assigning a fresh id and creation time.
    pub fn add_disease(&self, new_disease: NewDisease) -> DbResult<Disease> {
        let disease = Disease {
            id: new_id(),
            name: new_disease.name,
            category: new_disease.category,
            symptoms: new_disease.symptoms,
            description: new_disease.description,
            treatment: new_disease.treatment,
            severity: new_disease.severity,
            created_at: now(),
        };
        self.insert_disease_row(&disease)?;
        info!("added disease {} ({})", disease.name, disease.id);
        Ok(disease)
    }

    /// Insert a fully-formed disease row.
    pub(crate) fn insert_disease_row(&self, disease: &Disease) -> DbResult<()> {
        let symptoms_json = serde_json::to_string(&disease.symptoms)?;
        self.conn.execute(
            r#"
            INSERT INTO diseases (
                id, name, category, symptoms, description, treatment, severity, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                disease.id,
                disease.name,
                disease.category,
                symptoms_json,
                disease.description,
                disease.treatment,
                disease.severity.as_str(),
                disease.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a disease by ID.
    pub fn get_disease(&self, id: &str) -> DbResult<Option<Disease>> {
        let sql = format!("SELECT {} FROM diseases WHERE id = ?", DISEASE_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [id], read_disease_row)
            .optional()?;
        row.map(Disease::try_from).transpose()
    }

    /// All diseases in insertion order.
    pub fn list_diseases(&self) -> DbResult<Vec<Disease>> {
        let sql = format!("SELECT {} FROM diseases ORDER BY rowid", DISEASE_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_disease_row)?;

        let mut diseases = Vec::new();
        for row in rows {
            diseases.push(row?.try_into()?);
        }
        Ok(diseases)
    }

    /// Merge a partial update into a disease. Returns false if the id is
    /// unknown.
    pub fn update_disease(&self, id: &str, update: &DiseaseUpdate) -> DbResult<bool> {
        let Some(mut disease) = self.get_disease(id)? else {
            debug!("update_disease: no disease {}", id);
            return Ok(false);
        };
        update.apply_to(&mut disease);
        let symptoms_json = serde_json::to_string(&disease.symptoms)?;

        self.conn.execute(
            r#"
            UPDATE diseases SET
                name = ?2,
                category = ?3,
                symptoms = ?4,
                description = ?5,
                treatment = ?6,
                severity = ?7
            WHERE id = ?1
            "#,
            params![
                disease.id,
                disease.name,
                disease.category,
                symptoms_json,
                disease.description,
                disease.treatment,
                disease.severity.as_str(),
            ],
        )?;
        info!("updated disease {}", id);
        Ok(true)
    }

    /// Delete a disease. Returns false if the id is unknown.
    pub fn delete_disease(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM diseases WHERE id = ?", [id])?;
        if rows_affected > 0 {
            info!("deleted disease {}", id);
        } else {
            debug!("delete_disease: no disease {}", id);
        }
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct DiseaseRow {
    id: String,
    name: String,
    category: String,
    symptoms: String,
    description: String,
    treatment: String,
    severity: String,
    created_at: String,
}

fn read_disease_row(row: &Row<'_>) -> rusqlite::Result<DiseaseRow> {
    Ok(DiseaseRow {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        symptoms: row.get(3)?,
        description: row.get(4)?,
        treatment: row.get(5)?,
        severity: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl TryFrom<DiseaseRow> for Disease {
    type Error = DbError;

    fn try_from(row: DiseaseRow) -> Result<Self, Self::Error> {
        Ok(Disease {
            id: row.id,
            name: row.name,
            category: row.category,
            symptoms: serde_json::from_str(&row.symptoms)?,
            description: row.description,
            treatment: row.treatment,
            severity: row.severity.parse().map_err(DbError::Constraint)?,
            created_at: row.created_at,
        })
    }
}
