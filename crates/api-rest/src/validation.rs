//! Request body validation for prescription create/update.

use api_shared::{Gender, PrescriptionPayload};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const MAX_NAME_CHARS: usize = 255;
pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 150;

/// A prescription body as received. Every field is optional here so that missing values are
/// reported as field errors rather than as a rejected body.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionInput {
    pub prescription_date: Option<NaiveDate>,
    pub patient_name: Option<String>,
    pub patient_age: Option<i32>,
    pub patient_gender: Option<Gender>,
    pub diagnosis: Option<String>,
    pub medicines: Option<String>,
    pub next_visit_date: Option<NaiveDate>,
}

impl PrescriptionInput {
    /// Checks every field against `today` and returns the payload, or all failing fields.
    pub fn validate(self, today: NaiveDate) -> Result<PrescriptionPayload, BTreeMap<String, String>> {
        let mut errors = BTreeMap::new();
        let mut fail = |field: &str, message: &str| {
            errors
                .entry(field.to_string())
                .or_insert_with(|| message.to_string());
        };

        match self.prescription_date {
            None => fail("prescriptionDate", "Prescription date is mandatory"),
            Some(date) if date > today => {
                fail("prescriptionDate", "Prescription date cannot be in the future")
            }
            Some(_) => {}
        }

        match self.patient_name.as_deref().map(str::trim) {
            None | Some("") => fail("patientName", "Patient name is mandatory"),
            Some(name) if name.chars().count() > MAX_NAME_CHARS => fail(
                "patientName",
                "Patient name must be between 1 and 255 characters",
            ),
            Some(_) => {}
        }

        match self.patient_age {
            None => fail("patientAge", "Patient age is mandatory"),
            Some(age) if age < MIN_AGE => fail("patientAge", "Age must be 0 or greater"),
            Some(age) if age > MAX_AGE => fail("patientAge", "Age must be 150 or less"),
            Some(_) => {}
        }

        if self.patient_gender.is_none() {
            fail("patientGender", "Patient gender is mandatory");
        }

        if let Some(next) = self.next_visit_date {
            if next <= today {
                fail("nextVisitDate", "Next visit date must be in the future");
            }
        }

        match (
            self.prescription_date,
            self.patient_name,
            self.patient_age,
            self.patient_gender,
        ) {
            (Some(prescription_date), Some(patient_name), Some(patient_age), Some(patient_gender))
                if errors.is_empty() =>
            {
                Ok(PrescriptionPayload {
                    prescription_date,
                    patient_name: patient_name.trim().to_string(),
                    patient_age,
                    patient_gender,
                    diagnosis: self.diagnosis,
                    medicines: self.medicines,
                    next_visit_date: self.next_visit_date,
                })
            }
            _ => Err(errors),
        }
    }
}
