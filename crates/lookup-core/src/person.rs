//! Display-ready person records returned by a persons search.

use serde::{Deserialize, Serialize};

/// One postal address attached to a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Address type code from the API (e.g. `MAL`, `RES`, `WRK`).
    pub kind: String,
    /// Non-empty address lines in order.
    pub lines: Vec<String>,
}

/// Employment summary for people with an employee record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub role: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
}

/// A person as shown in search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub byu_id: Option<String>,
    pub net_id: Option<String>,
    /// Name in "first last" order, best available.
    pub name: String,
    pub preferred_name: Option<String>,
    pub surname: Option<String>,
    pub rest_of_name: Option<String>,
    /// Name in "last, first" order for sorting.
    pub sort_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub addresses: Vec<Address>,
    pub employee: Option<EmployeeSummary>,
    pub student_status: Option<String>,
}

/// One page of search results plus the links needed to move between pages.
///
/// The default value is the empty result used when nobody matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPage {
    pub people: Vec<Person>,
    /// Opaque URL for the following page, passed back verbatim as a page link.
    pub next: Option<String>,
    /// Opaque URL for the preceding page.
    pub prev: Option<String>,
    pub collection_size: Option<u64>,
    pub page_start: Option<u64>,
    pub page_end: Option<u64>,
    pub page_size: Option<u64>,
}

impl PersonPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_page_is_empty() {
        let page = PersonPage::default();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn person_serializes_with_optional_fields() {
        let person = Person {
            byu_id: Some("123456789".into()),
            net_id: Some("cosmo".into()),
            name: "Cosmo Cougar".into(),
            employee: Some(EmployeeSummary {
                department: Some("Athletics".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["byu_id"], "123456789");
        assert_eq!(value["name"], "Cosmo Cougar");
        assert_eq!(value["employee"]["department"], "Athletics");
        assert!(value["phone"].is_null());
    }
}
