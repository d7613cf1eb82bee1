//! Persons v4 response parsing.
//!
//! The v4 API wraps every scalar as `{ "value": ..., "description": ... }`
//! and groups people under `values[]` with HATEOAS `links` and paging
//! `metadata` alongside. Everything here is lenient: missing sections become
//! `None`, and scalars of any JSON type are read as text.

use std::collections::HashMap;

use lookup_core::{Address, EmployeeSummary, Person, PersonPage};
use serde::Deserialize;

use crate::error::LookupError;

const LINK_NEXT: &str = "persons__next";
const LINK_PREV: &str = "persons__prev";

#[derive(Deserialize)]
struct PersonsResponse {
    #[serde(default)]
    values: Vec<PersonValue>,
    #[serde(default)]
    links: HashMap<String, Link>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

#[derive(Deserialize)]
struct Link {
    href: Option<String>,
}

#[derive(Deserialize)]
struct Metadata {
    collection_size: Option<u64>,
    page_start: Option<u64>,
    page_end: Option<u64>,
    page_size: Option<u64>,
}

#[derive(Deserialize, Default)]
struct Field {
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

impl Field {
    fn text(&self) -> Option<String> {
        let text = match self.value.as_ref()? {
            serde_json::Value::String(s) => s.trim().to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    fn flag(&self) -> bool {
        match self.value.as_ref() {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true") || s == "Y",
            _ => false,
        }
    }

    fn description_or_value(&self) -> Option<String> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .or_else(|| self.text())
    }
}

fn text(field: Option<&Field>) -> Option<String> {
    field.and_then(Field::text)
}

#[derive(Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    values: Vec<T>,
}

#[derive(Deserialize)]
struct PersonValue {
    basic: Option<Basic>,
    addresses: Option<Collection<AddressValue>>,
    email_addresses: Option<Collection<EmailValue>>,
    phones: Option<Collection<PhoneValue>>,
    employee_summary: Option<EmployeeValue>,
}

#[derive(Deserialize)]
struct Basic {
    byu_id: Option<Field>,
    net_id: Option<Field>,
    name_fnf: Option<Field>,
    name_lnf: Option<Field>,
    preferred_name: Option<Field>,
    surname: Option<Field>,
    rest_of_name: Option<Field>,
    personal_email_address: Option<Field>,
    student_status: Option<Field>,
}

#[derive(Deserialize)]
struct AddressValue {
    address_type: Option<Field>,
    address_line_1: Option<Field>,
    address_line_2: Option<Field>,
    address_line_3: Option<Field>,
    address_line_4: Option<Field>,
}

#[derive(Deserialize)]
struct EmailValue {
    email_address: Option<Field>,
    email_address_type: Option<Field>,
}

#[derive(Deserialize)]
struct PhoneValue {
    phone_number: Option<Field>,
    primary_flag: Option<Field>,
}

#[derive(Deserialize)]
struct EmployeeValue {
    employee_role: Option<Field>,
    department: Option<Field>,
    job_code: Option<Field>,
}

/// Parse a persons v4 response body into a [`PersonPage`].
///
/// # Errors
///
/// Returns [`LookupError::Parse`] if the body is not a JSON object of the
/// expected shape.
pub fn parse(body: &str) -> Result<PersonPage, LookupError> {
    let data: PersonsResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;
    Ok(into_page(data))
}

fn into_page(data: PersonsResponse) -> PersonPage {
    let href = |key: &str| data.links.get(key).and_then(|l| l.href.clone());
    let next = href(LINK_NEXT);
    let prev = href(LINK_PREV);

    let total = data.values.len();
    let people: Vec<Person> = data.values.into_iter().filter_map(into_person).collect();
    if people.len() < total {
        tracing::debug!(
            skipped = total - people.len(),
            "persons values without a basic section skipped"
        );
    }

    let metadata = data.metadata;
    PersonPage {
        people,
        next,
        prev,
        collection_size: metadata.as_ref().and_then(|m| m.collection_size),
        page_start: metadata.as_ref().and_then(|m| m.page_start),
        page_end: metadata.as_ref().and_then(|m| m.page_end),
        page_size: metadata.as_ref().and_then(|m| m.page_size),
    }
}

fn into_person(value: PersonValue) -> Option<Person> {
    let basic = value.basic?;

    let surname = text(basic.surname.as_ref());
    let rest_of_name = text(basic.rest_of_name.as_ref());
    let preferred_name = text(basic.preferred_name.as_ref());
    let name = text(basic.name_fnf.as_ref())
        .or_else(|| preferred_name.clone())
        .unwrap_or_else(|| {
            [rest_of_name.as_deref(), surname.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ")
        });

    let emails = value.email_addresses.map(|c| c.values).unwrap_or_default();
    let email = primary_email(&emails).or_else(|| text(basic.personal_email_address.as_ref()));

    let phones = value.phones.map(|c| c.values).unwrap_or_default();
    let phone = phones
        .iter()
        .find(|p| p.primary_flag.as_ref().is_some_and(Field::flag))
        .or_else(|| phones.first())
        .and_then(|p| text(p.phone_number.as_ref()));

    let addresses = value
        .addresses
        .map(|c| c.values)
        .unwrap_or_default()
        .into_iter()
        .map(into_address)
        .filter(|a| !a.lines.is_empty())
        .collect();

    Some(Person {
        byu_id: text(basic.byu_id.as_ref()),
        net_id: text(basic.net_id.as_ref()),
        name,
        preferred_name,
        surname,
        rest_of_name,
        sort_name: text(basic.name_lnf.as_ref()),
        email,
        phone,
        addresses,
        employee: value.employee_summary.and_then(into_employee),
        student_status: basic
            .student_status
            .as_ref()
            .and_then(Field::description_or_value),
    })
}

/// Personal address first, then work, then whatever is listed first.
fn primary_email(emails: &[EmailValue]) -> Option<String> {
    let of_type = |kind: &str| {
        emails.iter().find(|e| {
            e.email_address_type
                .as_ref()
                .and_then(Field::text)
                .is_some_and(|t| t.eq_ignore_ascii_case(kind))
        })
    };
    of_type("PERSONAL")
        .or_else(|| of_type("WORK"))
        .or_else(|| emails.first())
        .and_then(|e| text(e.email_address.as_ref()))
}

fn into_address(value: AddressValue) -> Address {
    let lines = [
        value.address_line_1,
        value.address_line_2,
        value.address_line_3,
        value.address_line_4,
    ]
    .iter()
    .filter_map(|line| text(line.as_ref()))
    .collect();

    Address {
        kind: text(value.address_type.as_ref()).unwrap_or_default(),
        lines,
    }
}

fn into_employee(value: EmployeeValue) -> Option<EmployeeSummary> {
    let summary = EmployeeSummary {
        role: value
            .employee_role
            .as_ref()
            .and_then(Field::description_or_value),
        department: text(value.department.as_ref()),
        job_title: value
            .job_code
            .as_ref()
            .and_then(Field::description_or_value),
    };
    let empty = summary.role.is_none() && summary.department.is_none() && summary.job_title.is_none();
    (!empty).then_some(summary)
}
