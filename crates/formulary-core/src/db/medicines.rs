//! Medicine database operations.

use log::{debug, info};
use rusqlite::{params, OptionalExtension, Row};

use super::{new_id, now, Database, DbError, DbResult};
use crate::models::{Medicine, MedicineUpdate, NewMedicine};

const MEDICINE_COLUMNS: &str = r#"
    id, name, category, therapeutic_class, sub_therapeutic_class, dosage,
    is_generic, usage_restriction, description, side_effects, manufacturer,
    price, created_at, updated_at
"#;

impl Database {
    /// Add a medicine. Creation and update timestamps are set to the same
    /// instant.
    pub fn add_medicine(&self, new_medicine: NewMedicine) -> DbResult<Medicine> {
        let now = now();
        let medicine = Medicine {
            id: new_id(),
            name: new_medicine.name,
            category: new_medicine.category,
            therapeutic_class: new_medicine.therapeutic_class,
            sub_therapeutic_class: new_medicine.sub_therapeutic_class,
            dosage: new_medicine.dosage,
            is_generic: new_medicine.is_generic,
            usage_restriction: new_medicine.usage_restriction,
            description: new_medicine.description,
            side_effects: new_medicine.side_effects,
            manufacturer: new_medicine.manufacturer,
            price: new_medicine.price,
            created_at: now.clone(),
            updated_at: now,
        };
        self.insert_medicine_row(&medicine)?;
        info!("added medicine {} ({})", medicine.name, medicine.id);
        Ok(medicine)
    }

    /// Insert a fully-formed medicine row.
    pub(crate) fn insert_medicine_row(&self, medicine: &Medicine) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO medicines (
                id, name, category, therapeutic_class, sub_therapeutic_class, dosage,
                is_generic, usage_restriction, description, side_effects, manufacturer,
                price, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                medicine.id,
                medicine.name,
                medicine.category,
                medicine.therapeutic_class,
                medicine.sub_therapeutic_class,
                medicine.dosage,
                medicine.is_generic,
                medicine.usage_restriction.label(),
                medicine.description,
                medicine.side_effects,
                medicine.manufacturer,
                medicine.price,
                medicine.created_at,
                medicine.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a medicine by ID.
    pub fn get_medicine(&self, id: &str) -> DbResult<Option<Medicine>> {
        let sql = format!("SELECT {} FROM medicines WHERE id = ?", MEDICINE_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, [id], read_medicine_row)
            .optional()?;
        row.map(Medicine::try_from).transpose()
    }

    /// All medicines in insertion order.
    pub fn list_medicines(&self) -> DbResult<Vec<Medicine>> {
        let sql = format!("SELECT {} FROM medicines ORDER BY rowid", MEDICINE_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_medicine_row)?;

        let mut medicines = Vec::new();
        for row in rows {
            medicines.push(row?.try_into()?);
        }
        Ok(medicines)
    }

    /// Merge a partial update into a medicine and refresh `updated_at`.
    /// Returns false if the id is unknown.
    pub fn update_medicine(&self, id: &str, update: &MedicineUpdate) -> DbResult<bool> {
        let Some(mut medicine) = self.get_medicine(id)? else {
            debug!("update_medicine: no medicine {}", id);
            return Ok(false);
        };
        update.apply_to(&mut medicine);
        medicine.updated_at = now();

        self.conn.execute(
            r#"
            UPDATE medicines SET
                name = ?2,
                category = ?3,
                therapeutic_class = ?4,
                sub_therapeutic_class = ?5,
                dosage = ?6,
                is_generic = ?7,
                usage_restriction = ?8,
                description = ?9,
                side_effects = ?10,
                manufacturer = ?11,
                price = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
            params![
                medicine.id,
                medicine.name,
                medicine.category,
                medicine.therapeutic_class,
                medicine.sub_therapeutic_class,
                medicine.dosage,
                medicine.is_generic,
                medicine.usage_restriction.label(),
                medicine.description,
                medicine.side_effects,
                medicine.manufacturer,
                medicine.price,
                medicine.updated_at,
            ],
        )?;
        info!("updated medicine {}", id);
        Ok(true)
    }

    /// Delete a medicine. Returns false if the id is unknown.
    pub fn delete_medicine(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medicines WHERE id = ?", [id])?;
        if rows_affected > 0 {
            info!("deleted medicine {}", id);
        } else {
            debug!("delete_medicine: no medicine {}", id);
        }
        Ok(rows_affected > 0)
    }
}

/// Intermediate row struct for database mapping.
struct MedicineRow {
    id: String,
    name: String,
    category: String,
    therapeutic_class: String,
    sub_therapeutic_class: String,
    dosage: String,
    is_generic: bool,
    usage_restriction: String,
    description: String,
    side_effects: String,
    manufacturer: String,
    price: i64,
    created_at: String,
    updated_at: String,
}

fn read_medicine_row(row: &Row<'_>) -> rusqlite::Result<MedicineRow> {
    Ok(MedicineRow {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        therapeutic_class: row.get(3)?,
        sub_therapeutic_class: row.get(4)?,
        dosage: row.get(5)?,
        is_generic: row.get(6)?,
        usage_restriction: row.get(7)?,
        description: row.get(8)?,
        side_effects: row.get(9)?,
        manufacturer: row.get(10)?,
        price: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

impl TryFrom<MedicineRow> for Medicine {
    type Error = DbError;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        Ok(Medicine {
            id: row.id,
            name: row.name,
            category: row.category,
            therapeutic_class: row.therapeutic_class,
            sub_therapeutic_class: row.sub_therapeutic_class,
            dosage: row.dosage,
            is_generic: row.is_generic,
            usage_restriction: row
                .usage_restriction
                .parse()
                .map_err(DbError::Constraint)?,
            description: row.description,
            side_effects: row.side_effects,
            manufacturer: row.manufacturer,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
