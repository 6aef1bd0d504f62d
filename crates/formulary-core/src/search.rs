//! List filters for the browse pages.
//!
//! All matching is case-insensitive substring matching. An empty term
//! matches everything; the category filter, when set, is an exact match.

use crate::models::{Disease, Medicine, User};

/// Search term plus optional category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub term: String,
    pub category: Option<String>,
}

impl ListQuery {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn category_matches(&self, category: &str) -> bool {
        match self.category.as_deref() {
            None | Some("") => true,
            Some(wanted) => wanted == category,
        }
    }
}

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Medicines whose name, category, therapeutic class or manufacturer match.
pub fn filter_medicines<'a>(medicines: &'a [Medicine], query: &ListQuery) -> Vec<&'a Medicine> {
    let term = query.term.to_lowercase();
    medicines
        .iter()
        .filter(|m| {
            let matches_term = contains(&m.name, &term)
                || contains(&m.category, &term)
                || contains(&m.therapeutic_class, &term)
                || contains(&m.manufacturer, &term);
            matches_term && query.category_matches(&m.category)
        })
        .collect()
}

/// Diseases whose name, category or any symptom match.
pub fn filter_diseases<'a>(diseases: &'a [Disease], query: &ListQuery) -> Vec<&'a Disease> {
    let term = query.term.to_lowercase();
    diseases
        .iter()
        .filter(|d| {
            let matches_term = contains(&d.name, &term)
                || contains(&d.category, &term)
                || d.symptoms.iter().any(|s| contains(s, &term));
            matches_term && query.category_matches(&d.category)
        })
        .collect()
}

/// Users whose full name, username or email match.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let term = term.to_lowercase();
    users
        .iter()
        .filter(|u| {
            contains(&u.full_name, &term) || contains(&u.username, &term) || contains(&u.email, &term)
        })
        .collect()
}

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

pub fn medicine_categories(medicines: &[Medicine]) -> Vec<String> {
    distinct(medicines.iter().map(|m| m.category.as_str()))
}

pub fn disease_categories(diseases: &[Disease]) -> Vec<String> {
    distinct(diseases.iter().map(|d| d.category.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::Fixtures;

    #[test]
    fn test_medicine_search_fields() {
        let fixtures = Fixtures::load().unwrap();

        let by_name = filter_medicines(&fixtures.medicines, &ListQuery::term("PARA"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Paracetamol");

        let by_maker = filter_medicines(&fixtures.medicines, &ListQuery::term("kalbe"));
        assert_eq!(by_maker[0].name, "Omeprazole");

        let by_class = filter_medicines(&fixtures.medicines, &ListQuery::term("penisilin"));
        assert!(by_class.is_empty(), "sub-class is not searched");

        let by_class = filter_medicines(&fixtures.medicines, &ListQuery::term("anti infeksi"));
        assert_eq!(by_class[0].name, "Amoxicillin");
    }

    #[test]
    fn test_empty_term_matches_all() {
        let fixtures = Fixtures::load().unwrap();
        assert_eq!(
            filter_medicines(&fixtures.medicines, &ListQuery::default()).len(),
            fixtures.medicines.len()
        );
    }

    #[test]
    fn test_category_filter_is_exact() {
        let fixtures = Fixtures::load().unwrap();

        let query = ListQuery::default().with_category("Antibiotik");
        let results = filter_medicines(&fixtures.medicines, &query);
        assert_eq!(results.len(), 1);

        let query = ListQuery::default().with_category("antibiotik");
        assert!(filter_medicines(&fixtures.medicines, &query).is_empty());
    }

    #[test]
    fn test_disease_search_by_symptom() {
        let fixtures = Fixtures::load().unwrap();

        let results = filter_diseases(&fixtures.diseases, &ListQuery::term("pilek"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Flu");

        let results = filter_diseases(&fixtures.diseases, &ListQuery::term("sakit kepala"));
        assert_eq!(results[0].name, "Hipertensi");
    }

    #[test]
    fn test_user_search() {
        let fixtures = Fixtures::load().unwrap();

        assert_eq!(filter_users(&fixtures.users, "wijaya").len(), 1);
        assert_eq!(filter_users(&fixtures.users, "@hospital.com").len(), 2);
        assert!(filter_users(&fixtures.users, "budi").is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let fixtures = Fixtures::load().unwrap();
        let mut medicines = fixtures.medicines.clone();
        medicines.push(fixtures.medicines[0].clone());

        assert_eq!(
            medicine_categories(&medicines),
            vec!["Analgesik", "Antibiotik", "Antasida"]
        );
        assert_eq!(
            disease_categories(&fixtures.diseases),
            vec!["Kardiovaskular", "Endokrin", "Infeksi Virus"]
        );
    }
}
