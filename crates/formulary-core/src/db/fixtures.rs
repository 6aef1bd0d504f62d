//! Seed records loaded into every fresh formulary.

use serde::{Deserialize, Serialize};

use super::DbResult;
use crate::models::{Disease, Medicine, User};

/// Seed data as JSON, in the same shape the models serialize to.
pub const FIXTURES_JSON: &str = r#"
{
  "users": [
    {
      "id": "1",
      "username": "admin",
      "email": "admin@hospital.com",
      "fullName": "Administrator",
      "role": "admin",
      "createdAt": "2024-01-01",
      "isActive": true
    },
    {
      "id": "2",
      "username": "apoteker1",
      "email": "apoteker1@hospital.com",
      "fullName": "Dr. Sari Wijaya",
      "role": "apoteker",
      "createdAt": "2024-01-02",
      "isActive": true
    }
  ],
  "medicines": [
    {
      "id": "1",
      "name": "Paracetamol",
      "category": "Analgesik",
      "therapeuticClass": "Analgesik dan Antipiretik",
      "subTherapeuticClass": "Analgesik Non-Opioid",
      "dosage": "500mg",
      "isGeneric": true,
      "usageRestriction": "Tanpa Resep",
      "description": "Obat pereda nyeri dan demam",
      "sideEffects": "Mual, muntah (jarang)",
      "manufacturer": "Kimia Farma",
      "price": 5000,
      "createdAt": "2024-01-01",
      "updatedAt": "2024-01-01"
    },
    {
      "id": "2",
      "name": "Amoxicillin",
      "category": "Antibiotik",
      "therapeuticClass": "Anti Infeksi",
      "subTherapeuticClass": "Penisilin",
      "dosage": "250mg",
      "isGeneric": true,
      "usageRestriction": "Resep Dokter",
      "description": "Antibiotik untuk infeksi bakteri",
      "sideEffects": "Diare, ruam kulit",
      "manufacturer": "Dexa Medica",
      "price": 8000,
      "createdAt": "2024-01-01",
      "updatedAt": "2024-01-01"
    },
    {
      "id": "3",
      "name": "Omeprazole",
      "category": "Antasida",
      "therapeuticClass": "Saluran Cerna",
      "subTherapeuticClass": "Penghambat Pompa Proton",
      "dosage": "20mg",
      "isGeneric": true,
      "usageRestriction": "Resep Dokter",
      "description": "Obat untuk gangguan lambung",
      "sideEffects": "Sakit kepala, konstipasi",
      "manufacturer": "Kalbe Farma",
      "price": 12000,
      "createdAt": "2024-01-01",
      "updatedAt": "2024-01-01"
    }
  ],
  "diseases": [
    {
      "id": "1",
      "name": "Hipertensi",
      "category": "Kardiovaskular",
      "symptoms": ["Sakit kepala", "Pusing", "Sesak napas", "Nyeri dada"],
      "description": "Tekanan darah tinggi yang dapat menyebabkan komplikasi serius",
      "treatment": "Obat antihipertensi, diet rendah garam, olahraga teratur",
      "severity": "sedang",
      "createdAt": "2024-01-01"
    },
    {
      "id": "2",
      "name": "Diabetes Mellitus",
      "category": "Endokrin",
      "symptoms": ["Sering haus", "Sering buang air kecil", "Penurunan berat badan", "Lemas"],
      "description": "Gangguan metabolisme gula darah",
      "treatment": "Insulin, metformin, diet khusus diabetes, olahraga",
      "severity": "berat",
      "createdAt": "2024-01-01"
    },
    {
      "id": "3",
      "name": "Flu",
      "category": "Infeksi Virus",
      "symptoms": ["Demam", "Batuk", "Pilek", "Sakit tenggorokan", "Nyeri otot"],
      "description": "Infeksi virus pada saluran pernapasan",
      "treatment": "Istirahat, minum banyak air, obat simptomatik",
      "severity": "ringan",
      "createdAt": "2024-01-01"
    }
  ]
}
"#;

/// The full set of seed records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub medicines: Vec<Medicine>,
    pub diseases: Vec<Disease>,
}

impl Fixtures {
    /// Parse the embedded seed data.
    pub fn load() -> DbResult<Self> {
        Ok(serde_json::from_str(FIXTURES_JSON)?)
    }
}
