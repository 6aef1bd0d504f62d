//! Required-field checks run before any store mutation.

use thiserror::Error;

use crate::models::{
    DiseaseUpdate, MedicineUpdate, NewDisease, NewMedicine, NewUser, UserUpdate,
};

/// Form validation errors, keyed by the field's form label.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} wajib diisi")]
    MissingField(&'static str),

    #[error("{0} tidak boleh negatif")]
    Negative(&'static str),
}

pub type ValidationResult = Result<(), ValidationError>;

/// Input that can be checked before it reaches the store.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

fn require(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// A patch may leave a field out, but may not blank it.
fn require_if_present(field: &'static str, value: &Option<String>) -> ValidationResult {
    match value {
        Some(v) => require(field, v),
        None => Ok(()),
    }
}

fn non_negative(field: &'static str, value: i64) -> ValidationResult {
    if value < 0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(())
}

impl Validate for NewMedicine {
    fn validate(&self) -> ValidationResult {
        require("Nama Obat", &self.name)?;
        require("Kategori", &self.category)?;
        require("Kelas Terapi", &self.therapeutic_class)?;
        require("Sub Kelas Terapi", &self.sub_therapeutic_class)?;
        require("Dosis", &self.dosage)?;
        require("Deskripsi & Indikasi", &self.description)?;
        require("Efek Samping", &self.side_effects)?;
        require("Produsen", &self.manufacturer)?;
        non_negative("Harga", self.price)
    }
}

impl Validate for MedicineUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("Nama Obat", &self.name)?;
        require_if_present("Kategori", &self.category)?;
        require_if_present("Kelas Terapi", &self.therapeutic_class)?;
        require_if_present("Sub Kelas Terapi", &self.sub_therapeutic_class)?;
        require_if_present("Dosis", &self.dosage)?;
        require_if_present("Deskripsi & Indikasi", &self.description)?;
        require_if_present("Efek Samping", &self.side_effects)?;
        require_if_present("Produsen", &self.manufacturer)?;
        if let Some(price) = self.price {
            non_negative("Harga", price)?;
        }
        Ok(())
    }
}

impl Validate for NewDisease {
    fn validate(&self) -> ValidationResult {
        require("Nama Penyakit", &self.name)?;
        require("Kategori", &self.category)?;
        require("Deskripsi", &self.description)?;
        require("Pengobatan", &self.treatment)
    }
}

impl Validate for DiseaseUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("Nama Penyakit", &self.name)?;
        require_if_present("Kategori", &self.category)?;
        require_if_present("Deskripsi", &self.description)?;
        require_if_present("Pengobatan", &self.treatment)
    }
}

impl Validate for NewUser {
    fn validate(&self) -> ValidationResult {
        require("Username", &self.username)?;
        require("Email", &self.email)?;
        require("Nama Lengkap", &self.full_name)
    }
}

impl Validate for UserUpdate {
    fn validate(&self) -> ValidationResult {
        require_if_present("Username", &self.username)?;
        require_if_present("Email", &self.email)?;
        require_if_present("Nama Lengkap", &self.full_name)
    }
}
