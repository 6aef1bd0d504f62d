//! Formulary medicine models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dispensing tier for a medicine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UsageRestriction {
    /// Over the counter
    #[serde(rename = "Tanpa Resep")]
    WithoutPrescription,
    #[serde(rename = "Resep Dokter")]
    Prescription,
    #[serde(rename = "Resep Dokter Spesialis")]
    SpecialistPrescription,
}

impl UsageRestriction {
    pub const ALL: [UsageRestriction; 3] = [
        UsageRestriction::WithoutPrescription,
        UsageRestriction::Prescription,
        UsageRestriction::SpecialistPrescription,
    ];

    /// Stored and displayed label.
    pub fn label(&self) -> &'static str {
        match self {
            UsageRestriction::WithoutPrescription => "Tanpa Resep",
            UsageRestriction::Prescription => "Resep Dokter",
            UsageRestriction::SpecialistPrescription => "Resep Dokter Spesialis",
        }
    }

    pub fn requires_prescription(&self) -> bool {
        !matches!(self, UsageRestriction::WithoutPrescription)
    }
}

impl fmt::Display for UsageRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UsageRestriction {
    type Err = String;

    /// Labels are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        UsageRestriction::ALL
            .into_iter()
            .find(|r| r.label().to_lowercase() == lower)
            .ok_or_else(|| format!("unknown usage restriction: {}", s))
    }
}

/// A medicine in the hospital formulary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Unique identifier
    pub id: String,
    pub name: String,
    /// Formulary category (e.g., "Analgesik")
    pub category: String,
    /// Pharmacological class (e.g., "Analgesik Non-Opioid")
    pub therapeutic_class: String,
    pub sub_therapeutic_class: String,
    /// Strength as written on the label (e.g., "500mg")
    pub dosage: String,
    pub is_generic: bool,
    pub usage_restriction: UsageRestriction,
    pub description: String,
    pub side_effects: String,
    pub manufacturer: String,
    /// Price in whole rupiah
    pub price: i64,
    pub created_at: String,
    /// Refreshed on every update
    pub updated_at: String,
}

/// Fields supplied when adding a medicine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub therapeutic_class: String,
    pub sub_therapeutic_class: String,
    pub dosage: String,
    pub is_generic: bool,
    pub usage_restriction: UsageRestriction,
    pub description: String,
    pub side_effects: String,
    pub manufacturer: String,
    pub price: i64,
}

/// Partial update for a medicine. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub therapeutic_class: Option<String>,
    pub sub_therapeutic_class: Option<String>,
    pub dosage: Option<String>,
    pub is_generic: Option<bool>,
    pub usage_restriction: Option<UsageRestriction>,
    pub description: Option<String>,
    pub side_effects: Option<String>,
    pub manufacturer: Option<String>,
    pub price: Option<i64>,
}

impl MedicineUpdate {
    /// Patch that only changes the price.
    pub fn price(price: i64) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    /// Apply this patch to a medicine in place. Does not touch timestamps.
    pub fn apply_to(&self, medicine: &mut Medicine) {
        merge(&mut medicine.name, &self.name);
        merge(&mut medicine.category, &self.category);
        merge(&mut medicine.therapeutic_class, &self.therapeutic_class);
        merge(&mut medicine.sub_therapeutic_class, &self.sub_therapeutic_class);
        merge(&mut medicine.dosage, &self.dosage);
        merge(&mut medicine.description, &self.description);
        merge(&mut medicine.side_effects, &self.side_effects);
        merge(&mut medicine.manufacturer, &self.manufacturer);
        if let Some(is_generic) = self.is_generic {
            medicine.is_generic = is_generic;
        }
        if let Some(restriction) = self.usage_restriction {
            medicine.usage_restriction = restriction;
        }
        if let Some(price) = self.price {
            medicine.price = price;
        }
    }
}

fn merge(field: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        field.clone_from(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_restriction_parse_is_case_insensitive() {
        assert_eq!(
            "resep dokter spesialis".parse::<UsageRestriction>().unwrap(),
            UsageRestriction::SpecialistPrescription
        );
        assert_eq!(
            "Tanpa Resep".parse::<UsageRestriction>().unwrap(),
            UsageRestriction::WithoutPrescription
        );
        assert!("OTC".parse::<UsageRestriction>().is_err());
    }

    #[test]
    fn test_usage_restriction_serializes_label() {
        let json = serde_json::to_string(&UsageRestriction::Prescription).unwrap();
        assert_eq!(json, "\"Resep Dokter\"");
        assert!(UsageRestriction::Prescription.requires_prescription());
        assert!(!UsageRestriction::WithoutPrescription.requires_prescription());
    }

    #[test]
    fn test_update_from_json_is_partial() {
        let patch: MedicineUpdate = serde_json::from_str(r#"{"price": 9999}"#).unwrap();
        assert_eq!(patch, MedicineUpdate::price(9999));
    }
}
