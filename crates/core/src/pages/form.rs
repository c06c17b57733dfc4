//! The shared create/edit prescription form.
//!
//! Inputs are kept as raw strings, the way a user types them, and converted into a
//! [`PrescriptionPayload`] on submit. Conversion enforces the input constraints of the form
//! (required fields, age bounds, date format) before anything is sent.

use api_shared::range::DATE_FORMAT;
use api_shared::{Gender, Prescription, PrescriptionPayload};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Form field name to validation message.
pub type FieldErrors = BTreeMap<String, String>;

pub const FIELD_PRESCRIPTION_DATE: &str = "prescriptionDate";
pub const FIELD_PATIENT_NAME: &str = "patientName";
pub const FIELD_PATIENT_AGE: &str = "patientAge";
pub const FIELD_PATIENT_GENDER: &str = "patientGender";
pub const FIELD_DIAGNOSIS: &str = "diagnosis";
pub const FIELD_MEDICINES: &str = "medicines";
pub const FIELD_NEXT_VISIT_DATE: &str = "nextVisitDate";

pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrescriptionForm {
    pub prescription_date: String,
    pub patient_name: String,
    pub patient_age: String,
    pub patient_gender: Gender,
    pub diagnosis: String,
    pub medicines: String,
    pub next_visit_date: String,
}

impl PrescriptionForm {
    /// Pre-filled from an existing record, for editing.
    pub fn from_prescription(p: &Prescription) -> Self {
        Self {
            prescription_date: p.prescription_date.format(DATE_FORMAT).to_string(),
            patient_name: p.patient_name.clone(),
            patient_age: p.patient_age.to_string(),
            patient_gender: p.patient_gender,
            diagnosis: p.diagnosis.clone().unwrap_or_default(),
            medicines: p.medicines.clone().unwrap_or_default(),
            next_visit_date: p
                .next_visit_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Converts the raw inputs into a request payload, coercing the age to a number.
    ///
    /// # Errors
    /// Returns every failing field with its message.
    pub fn to_payload(&self) -> Result<PrescriptionPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let prescription_date = match parse_date(&self.prescription_date) {
            Ok(Some(date)) => Some(date),
            Ok(None) => {
                errors.insert(
                    FIELD_PRESCRIPTION_DATE.into(),
                    "Prescription date is mandatory".into(),
                );
                None
            }
            Err(message) => {
                errors.insert(FIELD_PRESCRIPTION_DATE.into(), message);
                None
            }
        };

        let patient_name = self.patient_name.trim();
        if patient_name.is_empty() {
            errors.insert(FIELD_PATIENT_NAME.into(), "Patient name is mandatory".into());
        }

        let patient_age = match parse_age(&self.patient_age) {
            Ok(age) => Some(age),
            Err(message) => {
                errors.insert(FIELD_PATIENT_AGE.into(), message);
                None
            }
        };

        let next_visit_date = match parse_date(&self.next_visit_date) {
            Ok(date) => date,
            Err(message) => {
                errors.insert(FIELD_NEXT_VISIT_DATE.into(), message);
                None
            }
        };

        match (prescription_date, patient_age) {
            (Some(prescription_date), Some(patient_age)) if errors.is_empty() => {
                Ok(PrescriptionPayload {
                    prescription_date,
                    patient_name: patient_name.to_string(),
                    patient_age,
                    patient_gender: self.patient_gender,
                    diagnosis: non_blank(&self.diagnosis),
                    medicines: non_blank(&self.medicines),
                    next_visit_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// `Ok(None)` for a blank input.
fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| format!("'{raw}' is not a valid date (expected YYYY-MM-DD)"))
}

fn parse_age(raw: &str) -> Result<i32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Patient age is mandatory".into());
    }
    let age: i32 = raw
        .parse()
        .map_err(|_| "Patient age must be a whole number".to_string())?;
    if age < MIN_AGE {
        return Err("Age must be 0 or greater".into());
    }
    if age > MAX_AGE {
        return Err("Age must be 150 or less".into());
    }
    Ok(age)
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
