//! Employee record, draft, and the enums that name its fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Text format of an HTML `datetime-local` value, used for form input.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Outgoing `admissionDate` format. Wall-clock values are UTC; seconds and
/// fractions are kept so an untouched date is sent back unchanged.
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Server-assigned employee identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Persisted employee as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub department: String,
    #[serde(rename = "admissionDate", default, with = "admission_date")]
    pub admission_date: Option<NaiveDateTime>,
}

impl Employee {
    /// Copy the editable fields into a draft.
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            admission_date: self.admission_date,
        }
    }
}

/// Employee fields without an id; the payload of create and update.
///
/// A missing admission date is sent as `null` so an update clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub role: String,
    pub department: String,
    #[serde(rename = "admissionDate", default, with = "admission_date")]
    pub admission_date: Option<NaiveDateTime>,
}

impl EmployeeDraft {
    /// Text value of one of the text fields. The admission date has no text form here.
    pub fn text(&self, field: EmployeeField) -> Option<&str> {
        match field {
            EmployeeField::Name => Some(&self.name),
            EmployeeField::Role => Some(&self.role),
            EmployeeField::Department => Some(&self.department),
            EmployeeField::AdmissionDate => None,
        }
    }
}

/// Editable employee fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Name,
    Role,
    Department,
    AdmissionDate,
}

impl EmployeeField {
    /// Fields that must hold non-empty text.
    pub const REQUIRED: [EmployeeField; 3] = [Self::Name, Self::Role, Self::Department];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Role => "Role",
            Self::Department => "Department",
            Self::AdmissionDate => "Admission date",
        }
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field the backend orders the list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "role")]
    Role,
    #[default]
    #[serde(rename = "department")]
    Department,
    #[serde(rename = "admissionDate")]
    AdmissionDate,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Name, Self::Role, Self::Department, Self::AdmissionDate];

    /// Query-string value.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::Department => "department",
            Self::AdmissionDate => "admissionDate",
        }
    }

    /// Label for the sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AdmissionDate => "Admission date",
            Self::Name => EmployeeField::Name.label(),
            Self::Role => EmployeeField::Role.label(),
            Self::Department => EmployeeField::Department.label(),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_param() == s)
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Parse a local date-time, accepting the formats users and backends commonly produce.
///
/// RFC 3339 timestamps keep their UTC wall-clock value. A bare date means midnight.
pub fn parse_datetime_local(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &[
        DATETIME_LOCAL_FORMAT,
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Serde adapter for `admissionDate`: lenient on the way in, UTC timestamp on the way out.
mod admission_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{WIRE_FORMAT, parse_datetime_local};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => s.serialize_str(&dt.format(WIRE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_datetime_local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_deserialize_backend_record() {
        let value = json!({
            "_id": "abc123",
            "name": "Ana",
            "role": "Dev",
            "department": "Eng",
            "admissionDate": "2024-01-01T00:00:00.000Z",
            "__v": 0
        });
        let emp: Employee = serde_json::from_value(value).unwrap();

        assert_eq!(emp.id.as_str(), "abc123");
        assert_eq!(emp.name, "Ana");
        assert_eq!(emp.admission_date, Some(dt("2024-01-01 00:00:00")));
    }

    #[test]
    fn test_missing_or_empty_admission_date_is_none() {
        let missing: Employee =
            serde_json::from_value(json!({"_id": "1", "name": "a", "role": "b", "department": "c"})).unwrap();
        let empty: Employee = serde_json::from_value(
            json!({"_id": "1", "name": "a", "role": "b", "department": "c", "admissionDate": ""}),
        )
        .unwrap();
        let null: Employee = serde_json::from_value(
            json!({"_id": "1", "name": "a", "role": "b", "department": "c", "admissionDate": null}),
        )
        .unwrap();

        assert_eq!(missing.admission_date, None);
        assert_eq!(empty.admission_date, None);
        assert_eq!(null.admission_date, None);
    }

    #[test]
    fn test_draft_serializes_utc_timestamp() {
        let draft = EmployeeDraft {
            name: "Ana".to_string(),
            role: "Dev".to_string(),
            department: "Eng".to_string(),
            admission_date: Some(dt("2024-01-01 09:30:00")),
        };
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["admissionDate"], "2024-01-01T09:30:00Z");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_draft_sends_null_for_absent_admission_date() {
        let draft = EmployeeDraft {
            name: "Ana".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value.get("admissionDate"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_backend_timestamp_survives_reencode() {
        let value = json!({
            "_id": "abc123",
            "name": "Ana",
            "role": "Dev",
            "department": "Eng",
            "admissionDate": "2024-03-05T10:20:30.500+02:00"
        });
        let emp: Employee = serde_json::from_value(value).unwrap();

        let sent = serde_json::to_value(emp.to_draft()).unwrap();

        assert_eq!(sent["admissionDate"], "2024-03-05T08:20:30.500Z");
        let back = parse_datetime_local(sent["admissionDate"].as_str().unwrap());
        assert_eq!(back, emp.admission_date);
    }

    #[test]
    fn test_parse_datetime_local_formats() {
        let expected = Some(dt("2024-01-01 08:15:00"));
        assert_eq!(parse_datetime_local("2024-01-01T08:15"), expected);
        assert_eq!(parse_datetime_local("2024-01-01 08:15"), expected);
        assert_eq!(parse_datetime_local("2024-01-01T08:15:00"), expected);
        assert_eq!(parse_datetime_local("  2024-01-01T08:15  "), expected);
        assert_eq!(parse_datetime_local("2024-01-01"), Some(dt("2024-01-01 00:00:00")));
        assert_eq!(parse_datetime_local("01/01/2024"), None);
        assert_eq!(parse_datetime_local(""), None);
    }

    #[test]
    fn test_sort_key_params() {
        assert_eq!(SortKey::default(), SortKey::Department);
        for key in SortKey::ALL {
            assert_eq!(key.as_param().parse::<SortKey>().unwrap(), key);
        }
        assert!("salary".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_to_draft_keeps_fields() {
        let emp = Employee {
            id: EmployeeId::from("x"),
            name: "Ana".to_string(),
            role: "Dev".to_string(),
            department: "Eng".to_string(),
            admission_date: None,
        };
        let draft = emp.to_draft();

        assert_eq!(draft.name, "Ana");
        assert_eq!(draft.text(EmployeeField::Department), Some("Eng"));
        assert_eq!(draft.text(EmployeeField::AdmissionDate), None);
    }
}
