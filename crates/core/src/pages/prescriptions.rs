//! Prescription list with its create/edit form and delete flow.

use super::form::{FieldErrors, PrescriptionForm};
use super::{table_body, TableBody};
use crate::constants::UNEXPECTED_ERROR;
use crate::error::{ApiError, ApiResult};
use crate::http::{ReqwestTransport, Transport};
use crate::services::PrescriptionService;
use api_shared::range::DATE_FORMAT;
use api_shared::{DateRange, Prescription};
use chrono::NaiveDate;

pub const EMPTY_LIST: &str = "No prescriptions found for the selected date range.";
pub const LOAD_FAILED: &str = "Failed to load prescriptions";
pub const DELETE_FAILED: &str = "Failed to delete prescription";
pub const CREATED: &str = "Prescription created successfully";
pub const UPDATED: &str = "Prescription updated successfully";
pub const DELETED: &str = "Prescription deleted successfully";
pub const FIX_FIELDS: &str = "Please correct the highlighted fields";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Prescription),
}

/// An open create/edit form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub values: PrescriptionForm,
    pub submitting: bool,
    pub errors: Option<FieldErrors>,
}

impl FormState {
    fn create() -> Self {
        Self {
            mode: FormMode::Create,
            values: PrescriptionForm::default(),
            submitting: false,
            errors: None,
        }
    }

    fn edit(prescription: &Prescription) -> Self {
        Self {
            mode: FormMode::Edit(prescription.clone()),
            values: PrescriptionForm::from_prescription(prescription),
            submitting: false,
            errors: None,
        }
    }
}

/// Text shown before a delete is issued.
pub fn delete_confirmation(prescription: &Prescription) -> String {
    format!(
        "Delete prescription for {} dated {}?",
        prescription.patient_name,
        prescription.prescription_date.format(DATE_FORMAT)
    )
}

pub struct PrescriptionsPage<T = ReqwestTransport> {
    service: PrescriptionService<T>,
    range: DateRange,
    prescriptions: Vec<Prescription>,
    loading: bool,
    error: Option<String>,
    form: Option<FormState>,
    feedback: Option<String>,
}

impl<T: Transport> PrescriptionsPage<T> {
    /// A page filtered to the calendar month containing `today`. Nothing is loaded until
    /// [`refresh`](Self::refresh) or [`set_range`](Self::set_range) is called.
    pub fn new(service: PrescriptionService<T>, today: NaiveDate) -> Self {
        Self {
            service,
            range: DateRange::current_month(today),
            prescriptions: Vec::new(),
            loading: false,
            error: None,
            form: None,
            feedback: None,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Returns and clears the transient feedback message.
    pub fn take_feedback(&mut self) -> Option<String> {
        self.feedback.take()
    }

    pub fn table(&self) -> TableBody<'_, Prescription> {
        table_body(self.loading, &self.prescriptions, EMPTY_LIST)
    }

    /// Changes the filter and reloads.
    pub async fn set_range(&mut self, range: DateRange) {
        self.range = range;
        self.load().await;
    }

    /// Reloads the list for the current filter.
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.service.list(&self.range).await {
            Ok(items) => self.prescriptions = items,
            Err(e) => {
                tracing::debug!("list prescriptions failed: {}", e);
                self.error = Some(e.user_message(LOAD_FAILED));
            }
        }

        self.loading = false;
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(FormState::create());
    }

    pub fn open_edit_form(&mut self, prescription: &Prescription) {
        self.form = Some(FormState::edit(prescription));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submits `values` through the open form (a create form is opened if none is).
    ///
    /// Returns `true` when the record was saved. On success the form closes and the list is
    /// reloaded once. On failure the form stays open with field errors and feedback set.
    pub async fn submit_form(&mut self, values: PrescriptionForm) -> bool {
        self.feedback = None;
        let form = self.form.get_or_insert_with(FormState::create);
        form.values = values;
        form.errors = None;
        form.submitting = true;

        let payload = match form.values.to_payload() {
            Ok(payload) => payload,
            Err(errors) => {
                form.errors = Some(errors);
                form.submitting = false;
                self.feedback = Some(FIX_FIELDS.to_string());
                return false;
            }
        };
        let editing = match &form.mode {
            FormMode::Edit(existing) => Some(existing.id),
            FormMode::Create => None,
        };

        let result: ApiResult<&str> = match editing {
            Some(id) => self.service.update(id, &payload).await.map(|_| UPDATED),
            None => self.service.create(&payload).await.map(|_| CREATED),
        };

        match result {
            Ok(message) => {
                self.feedback = Some(message.to_string());
                self.close_form();
                self.load().await;
                true
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.errors = e.field_errors();
                    form.submitting = false;
                }
                self.feedback = Some(match &e {
                    ApiError::Http { message, .. } => message.clone(),
                    _ => UNEXPECTED_ERROR.to_string(),
                });
                false
            }
        }
    }

    /// Deletes `prescription` once `confirm` accepts the confirmation text.
    ///
    /// Returns `true` when the record was deleted; the list is then reloaded once.
    pub async fn delete<F>(&mut self, prescription: &Prescription, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(&delete_confirmation(prescription)) {
            return false;
        }

        self.feedback = None;
        match self.service.delete(prescription.id).await {
            Ok(()) => {
                self.feedback = Some(DELETED.to_string());
                self.load().await;
                true
            }
            Err(e) => {
                self.feedback = Some(e.user_message(DELETE_FAILED));
                false
            }
        }
    }
}
