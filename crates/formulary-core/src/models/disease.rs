//! Disease reference models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Clinical urgency tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Mild
    Ringan,
    /// Moderate
    Sedang,
    /// Severe
    Berat,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Ringan, Severity::Sedang, Severity::Berat];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ringan => "ringan",
            Severity::Sedang => "sedang",
            Severity::Berat => "berat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ringan => "Ringan",
            Severity::Sedang => "Sedang",
            Severity::Berat => "Berat",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ringan" => Ok(Severity::Ringan),
            "sedang" => Ok(Severity::Sedang),
            "berat" => Ok(Severity::Berat),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// A disease entry in the reference list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    /// Unique identifier
    pub id: String,
    pub name: String,
    /// Organ system or disease family (e.g., "Kardiovaskular")
    pub category: String,
    /// Symptoms in display order
    pub symptoms: Vec<String>,
    pub description: String,
    /// Free-text treatment guidance
    pub treatment: String,
    pub severity: Severity,
    pub created_at: String,
}

/// Fields supplied when adding a disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDisease {
    pub name: String,
    pub category: String,
    pub symptoms: Vec<String>,
    pub description: String,
    pub treatment: String,
    pub severity: Severity,
}

impl NewDisease {
    /// Create a disease with no symptoms and mild severity, the form's default.
    pub fn new(name: String, category: String) -> Self {
        Self {
            name,
            category,
            symptoms: Vec::new(),
            description: String::new(),
            treatment: String::new(),
            severity: Severity::Ringan,
        }
    }

    /// Append a symptom. Blank input and exact duplicates (after trimming)
    /// are ignored; returns whether the list changed.
    pub fn add_symptom(&mut self, symptom: &str) -> bool {
        let symptom = symptom.trim();
        if symptom.is_empty() || self.symptoms.iter().any(|s| s == symptom) {
            return false;
        }
        self.symptoms.push(symptom.to_string());
        true
    }

    /// Remove every occurrence of a symptom.
    pub fn remove_symptom(&mut self, symptom: &str) {
        self.symptoms.retain(|s| s != symptom);
    }
}

/// Partial update for a disease. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DiseaseUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    /// Replaces the whole symptom list when present
    pub symptoms: Option<Vec<String>>,
    pub description: Option<String>,
    pub treatment: Option<String>,
    pub severity: Option<Severity>,
}

impl DiseaseUpdate {
    /// Apply this patch to a disease in place.
    pub fn apply_to(&self, disease: &mut Disease) {
        if let Some(name) = &self.name {
            disease.name = name.clone();
        }
        if let Some(category) = &self.category {
            disease.category = category.clone();
        }
        if let Some(symptoms) = &self.symptoms {
            disease.symptoms = symptoms.clone();
        }
        if let Some(description) = &self.description {
            disease.description = description.clone();
        }
        if let Some(treatment) = &self.treatment {
            disease.treatment = treatment.clone();
        }
        if let Some(severity) = self.severity {
            disease.severity = severity;
        }
    }
}
