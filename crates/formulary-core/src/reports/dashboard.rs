//! Dashboard and page summary figures.

use serde::{Deserialize, Serialize};

use crate::models::{Disease, Medicine, Role, Severity, User};

/// How many recent medicines and top categories the dashboard shows.
pub const DASHBOARD_LIST_LIMIT: usize = 5;

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Generation timestamp
    pub generated_at: String,
    pub medicine_count: usize,
    pub disease_count: usize,
    /// Only reported to admins
    pub user_count: Option<usize>,
    /// Most recently added medicines, oldest first
    pub recent_medicines: Vec<Medicine>,
    /// Disease categories by descending count
    pub top_disease_categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl DashboardSummary {
    /// Build the summary a user with `role` is allowed to see.
    pub fn build(role: Role, medicines: &[Medicine], diseases: &[Disease], users: &[User]) -> Self {
        let recent_start = medicines.len().saturating_sub(DASHBOARD_LIST_LIMIT);

        let mut top = count_categories(diseases.iter().map(|d| d.category.as_str()));
        // Stable sort keeps first-seen order among ties.
        top.sort_by(|a, b| b.count.cmp(&a.count));
        top.truncate(DASHBOARD_LIST_LIMIT);

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            medicine_count: medicines.len(),
            disease_count: diseases.len(),
            user_count: (role == Role::Admin).then_some(users.len()),
            recent_medicines: medicines[recent_start..].to_vec(),
            top_disease_categories: top,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Counts per category in first-seen order.
pub fn count_categories<'a>(categories: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for category in categories {
        match counts.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// User management header figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub admin: usize,
    pub apoteker: usize,
    pub active: usize,
}

impl UserStats {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total: users.len(),
            admin: users.iter().filter(|u| u.role == Role::Admin).count(),
            apoteker: users.iter().filter(|u| u.role == Role::Apoteker).count(),
            active: users.iter().filter(|u| u.is_active).count(),
        }
    }
}

/// Disease list footer figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityStats {
    pub total: usize,
    pub ringan: usize,
    pub sedang: usize,
    pub berat: usize,
}

impl SeverityStats {
    pub fn from_diseases(diseases: &[Disease]) -> Self {
        let count = |severity: Severity| diseases.iter().filter(|d| d.severity == severity).count();
        Self {
            total: diseases.len(),
            ringan: count(Severity::Ringan),
            sedang: count(Severity::Sedang),
            berat: count(Severity::Berat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::Fixtures;

    #[test]
    fn test_user_count_admin_only() {
        let f = Fixtures::load().unwrap();

        let admin = DashboardSummary::build(Role::Admin, &f.medicines, &f.diseases, &f.users);
        assert_eq!(admin.user_count, Some(2));

        let apoteker = DashboardSummary::build(Role::Apoteker, &f.medicines, &f.diseases, &f.users);
        assert_eq!(apoteker.user_count, None);
        assert_eq!(apoteker.medicine_count, 3);
        assert_eq!(apoteker.disease_count, 3);
    }

    #[test]
    fn test_recent_medicines_are_last_five() {
        let f = Fixtures::load().unwrap();
        let mut medicines = Vec::new();
        for i in 0..7 {
            let mut m = f.medicines[0].clone();
            m.id = i.to_string();
            medicines.push(m);
        }

        let summary = DashboardSummary::build(Role::Admin, &medicines, &[], &[]);
        let ids: Vec<_> = summary.recent_medicines.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4", "5", "6"]);
        assert!(summary.top_disease_categories.is_empty());
    }

    #[test]
    fn test_top_categories_sorted_with_stable_ties() {
        let f = Fixtures::load().unwrap();
        let mut diseases = f.diseases.clone();
        diseases.push(f.diseases[2].clone());

        let summary = DashboardSummary::build(Role::Apoteker, &[], &diseases, &[]);
        let top: Vec<_> = summary
            .top_disease_categories
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();
        assert_eq!(
            top,
            vec![("Infeksi Virus", 2), ("Kardiovaskular", 1), ("Endokrin", 1)]
        );
    }

    #[test]
    fn test_user_and_severity_stats() {
        let f = Fixtures::load().unwrap();
        let mut users = f.users.clone();
        users[1].is_active = false;

        assert_eq!(
            UserStats::from_users(&users),
            UserStats {
                total: 2,
                admin: 1,
                apoteker: 1,
                active: 1
            }
        );
        assert_eq!(
            SeverityStats::from_diseases(&f.diseases),
            SeverityStats {
                total: 3,
                ringan: 1,
                sedang: 1,
                berat: 1
            }
        );
    }

    #[test]
    fn test_summary_serializes() {
        let f = Fixtures::load().unwrap();
        let summary = DashboardSummary::build(Role::Admin, &f.medicines, &f.diseases, &f.users);
        let json = summary.to_json().unwrap();
        assert!(json.contains("\"medicineCount\": 3"));
    }
}
