//! Therapy protocols: formulary medicines grouped by category with the
//! clinical guidance for that category.

use serde::Serialize;

use crate::models::{Disease, Medicine};

struct Guidance {
    category: &'static str,
    indication: &'static str,
    dosage_guideline: &'static str,
    contraindication: &'static str,
    monitoring: &'static str,
}

const GUIDANCE: &[Guidance] = &[
    Guidance {
        category: "Analgesik",
        indication: "Manajemen nyeri ringan hingga sedang, demam",
        dosage_guideline: "Mulai dengan dosis terendah efektif, evaluasi setiap 24-48 jam",
        contraindication: "Hipersensitivitas, gangguan fungsi ginjal berat",
        monitoring: "Fungsi ginjal, tanda perdarahan GI, nyeri",
    },
    Guidance {
        category: "Antibiotik",
        indication: "Infeksi bakteri yang terbukti atau tersangka",
        dosage_guideline: "Sesuai kultur dan sensitivitas, durasi 7-14 hari",
        contraindication: "Riwayat alergi, gangguan fungsi hati/ginjal",
        monitoring: "Tanda infeksi, kultur ulang, efek samping",
    },
    Guidance {
        category: "Antasida",
        indication: "Gangguan asam lambung, GERD, gastritis",
        dosage_guideline: "30 menit sebelum makan, hindari bersamaan dengan obat lain",
        contraindication: "Gangguan fungsi ginjal, hipofosfatemia",
        monitoring: "Gejala dispepsia, kadar elektrolit",
    },
    Guidance {
        category: "Antihistamin",
        indication: "Reaksi alergi, rhinitis alergi",
        dosage_guideline: "Sekali sehari atau sesuai gejala, perhatikan sedasi",
        contraindication: "Glaukoma sudut sempit, hipertrofi prostat",
        monitoring: "Sedasi, mulut kering, retensi urin",
    },
    Guidance {
        category: "Antihipertensi",
        indication: "Hipertensi, gagal jantung, penyakit kardiovaskular",
        dosage_guideline: "Titrasi bertahap setiap 2-4 minggu hingga target",
        contraindication: "Hipotensi, bradikardia berat, gangguan konduksi",
        monitoring: "Tekanan darah, fungsi ginjal, elektrolit",
    },
    Guidance {
        category: "Antidiabetik",
        indication: "Diabetes mellitus tipe 1 dan 2",
        dosage_guideline: "Monitoring gula darah rutin, sesuaikan dosis bertahap",
        contraindication: "DKA, hipoglikemia berat, gangguan fungsi ginjal",
        monitoring: "Gula darah, HbA1c, fungsi ginjal",
    },
    Guidance {
        category: "Kardiovaskular",
        indication: "Penyakit jantung koroner, aritmia, gagal jantung",
        dosage_guideline: "Mulai dosis rendah, titrasi sesuai respons klinis",
        contraindication: "Syok kardiogenik, bradikardia berat",
        monitoring: "EKG, tekanan darah, tanda gagal jantung",
    },
    Guidance {
        category: "Respiratori",
        indication: "Asma, PPOK, infeksi saluran pernapasan",
        dosage_guideline: "Sesuai derajat keparahan, monitor fungsi paru",
        contraindication: "Hipersensitivitas, bronkospasme paradoks",
        monitoring: "Fungsi paru, saturasi oksigen, gejala",
    },
    Guidance {
        category: "Neurologi",
        indication: "Epilepsi, migrain, gangguan neurologis",
        dosage_guideline: "Titrasi lambat, monitor efek samping neurologis",
        contraindication: "Gangguan fungsi hati berat, diskrasia darah",
        monitoring: "Fungsi neurologis, kadar obat dalam darah",
    },
    Guidance {
        category: "Psikiatri",
        indication: "Depresi, ansietas, gangguan bipolar",
        dosage_guideline: "Mulai dosis rendah, evaluasi setiap 2-4 minggu",
        contraindication: "Ideasi bunuh diri akut, gangguan fungsi hati",
        monitoring: "Mood, perilaku, ide bunuh diri, efek samping",
    },
];

const DEFAULT_DOSAGE_GUIDELINE: &str = "Ikuti pedoman dosis standar untuk kategori ini";
const DEFAULT_CONTRAINDICATION: &str = "Hindari pada kondisi hipersensitivitas";
const DEFAULT_MONITORING: &str = "Monitor respons terapi dan efek samping";

fn guidance_for(category: &str) -> Option<&'static Guidance> {
    GUIDANCE.iter().find(|g| g.category == category)
}

/// A therapy protocol for one medicine category.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TherapyProtocol {
    pub category: String,
    pub medicines: Vec<Medicine>,
    /// Diseases whose category or treatment mentions this category
    pub related_diseases: Vec<Disease>,
    pub indication: String,
    pub dosage_guideline: String,
    pub contraindication: String,
    pub monitoring: String,
}

impl TherapyProtocol {
    fn new(category: &str, medicines: Vec<Medicine>, diseases: &[Disease]) -> Self {
        let needle = category.to_lowercase();
        let related_diseases = diseases
            .iter()
            .filter(|d| {
                d.treatment.to_lowercase().contains(&needle)
                    || d.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        let guidance = guidance_for(category);
        let indication = match guidance {
            Some(g) => g.indication.to_string(),
            None => format!("Terapi untuk kondisi terkait {}", category),
        };

        Self {
            category: category.to_string(),
            medicines,
            related_diseases,
            indication,
            dosage_guideline: guidance
                .map_or(DEFAULT_DOSAGE_GUIDELINE, |g| g.dosage_guideline)
                .to_string(),
            contraindication: guidance
                .map_or(DEFAULT_CONTRAINDICATION, |g| g.contraindication)
                .to_string(),
            monitoring: guidance
                .map_or(DEFAULT_MONITORING, |g| g.monitoring)
                .to_string(),
        }
    }
}

/// One protocol per medicine category, in first-seen category order.
pub fn build_protocols(medicines: &[Medicine], diseases: &[Disease]) -> Vec<TherapyProtocol> {
    let mut groups: Vec<(&str, Vec<Medicine>)> = Vec::new();
    for medicine in medicines {
        match groups.iter_mut().find(|(c, _)| *c == medicine.category) {
            Some((_, members)) => members.push(medicine.clone()),
            None => groups.push((medicine.category.as_str(), vec![medicine.clone()])),
        }
    }

    groups
        .into_iter()
        .map(|(category, members)| TherapyProtocol::new(category, members, diseases))
        .collect()
}

/// Protocols whose category or indication contains `term`, ignoring case.
pub fn filter_protocols<'a>(protocols: &'a [TherapyProtocol], term: &str) -> Vec<&'a TherapyProtocol> {
    let term = term.to_lowercase();
    protocols
        .iter()
        .filter(|p| {
            p.category.to_lowercase().contains(&term) || p.indication.to_lowercase().contains(&term)
        })
        .collect()
}
