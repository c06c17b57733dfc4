//! JSON request and response bodies.
//!
//! Field names follow the REST API's camelCase convention.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Patient gender as accepted by the prescription API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Wire value (`MALE`, `FEMALE`, `OTHER`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown gender value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGender(pub String);

impl fmt::Display for UnknownGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gender '{}' (expected MALE, FEMALE or OTHER)", self.0)
    }
}

impl std::error::Error for UnknownGender {}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGender(s.to_string()))
    }
}

/// A prescription record as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Server-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "2025-01-15")]
    pub prescription_date: NaiveDate,
    #[schema(example = "John Doe")]
    pub patient_name: String,
    #[schema(example = 35)]
    pub patient_age: i32,
    pub patient_gender: Gender,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub medicines: Option<String>,
    #[serde(default)]
    pub next_visit_date: Option<NaiveDate>,
}

impl Prescription {
    pub fn from_payload(id: i64, payload: PrescriptionPayload) -> Self {
        Self {
            id,
            prescription_date: payload.prescription_date,
            patient_name: payload.patient_name,
            patient_age: payload.patient_age,
            patient_gender: payload.patient_gender,
            diagnosis: payload.diagnosis,
            medicines: payload.medicines,
            next_visit_date: payload.next_visit_date,
        }
    }

    /// Every field except `id`, as sent on update.
    pub fn payload(&self) -> PrescriptionPayload {
        PrescriptionPayload {
            prescription_date: self.prescription_date,
            patient_name: self.patient_name.clone(),
            patient_age: self.patient_age,
            patient_gender: self.patient_gender,
            diagnosis: self.diagnosis.clone(),
            medicines: self.medicines.clone(),
            next_visit_date: self.next_visit_date,
        }
    }
}

/// Body of a create or update call: every prescription field except `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionPayload {
    pub prescription_date: NaiveDate,
    pub patient_name: String,
    pub patient_age: i32,
    pub patient_gender: Gender,
    pub diagnosis: Option<String>,
    pub medicines: Option<String>,
    pub next_visit_date: Option<NaiveDate>,
}

/// One row of the day-wise report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    #[schema(example = "2025-01-15")]
    pub day: NaiveDate,
    pub prescription_count: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The signed-in user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub username: String,
}

/// Error body returned by every failing endpoint.
///
/// `errors` maps form field names to validation messages and is only present for validation
/// failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            errors: None,
        }
    }

    pub fn with_errors(error: impl Into<String>, errors: BTreeMap<String, String>) -> Self {
        Self {
            error: error.into(),
            errors: Some(errors),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parses_case_insensitively() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" OTHER ".parse::<Gender>().unwrap(), Gender::Other);
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_prescription_uses_camel_case_wire_names() {
        let json = serde_json::json!({
            "id": 7,
            "prescriptionDate": "2024-01-10",
            "patientName": "Jane Doe",
            "patientAge": 45,
            "patientGender": "FEMALE",
            "diagnosis": "Flu",
            "medicines": null,
            "nextVisitDate": null
        });

        let prescription: Prescription = serde_json::from_value(json).unwrap();
        assert_eq!(prescription.id, 7);
        assert_eq!(prescription.patient_gender, Gender::Female);
        assert_eq!(prescription.medicines, None);

        let back = serde_json::to_value(prescription.payload()).unwrap();
        assert_eq!(back["patientAge"], serde_json::json!(45));
        assert!(back.get("id").is_none());
    }

    #[test]
    fn test_error_body_omits_missing_field_errors() {
        let body = serde_json::to_value(ErrorBody::new("Not authenticated")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Not authenticated" }));
    }

    #[test]
    fn test_schema_carries_date_examples() {
        let (name, schema) = <DayCount as ToSchema>::schema();
        assert_eq!(name, "DayCount");

        let schema = serde_json::to_value(schema).unwrap();
        assert_eq!(
            schema["properties"]["day"]["example"],
            serde_json::json!("2025-01-15")
        );
    }
}
