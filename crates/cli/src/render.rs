//! Plain-text rendering of page state for the terminal.

use rxdesk_core::display::{display_date, display_text};
use rxdesk_core::pages::{FieldErrors, TableBody};
use rxdesk_core::{DayCount, Prescription};

/// Left-aligned columns separated by two spaces, with a header row.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}

pub fn prescriptions(body: TableBody<'_, Prescription>) -> String {
    match body {
        TableBody::Loading => "Loading...".to_string(),
        TableBody::Empty(message) => message.to_string(),
        TableBody::Rows(rows) => {
            let rows: Vec<Vec<String>> = rows
                .iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        display_date(Some(p.prescription_date)),
                        p.patient_name.clone(),
                        p.patient_age.to_string(),
                        p.patient_gender.label().to_string(),
                        display_text(p.diagnosis.as_deref()).to_string(),
                        display_text(p.medicines.as_deref()).to_string(),
                        display_date(p.next_visit_date),
                    ]
                })
                .collect();
            table(
                &[
                    "ID",
                    "Date",
                    "Patient",
                    "Age",
                    "Gender",
                    "Diagnosis",
                    "Medicines",
                    "Next visit",
                ],
                &rows,
            )
        }
    }
}

pub fn report(body: TableBody<'_, DayCount>, total: i64) -> String {
    match body {
        TableBody::Loading => "Loading...".to_string(),
        TableBody::Empty(message) => message.to_string(),
        TableBody::Rows(rows) => {
            let rows: Vec<Vec<String>> = rows
                .iter()
                .map(|r| vec![display_date(Some(r.day)), r.prescription_count.to_string()])
                .collect();
            format!("{}\nTotal: {total}", table(&["Day", "Prescriptions"], &rows))
        }
    }
}

pub fn detail(p: &Prescription) -> String {
    let fields = [
        ("ID", p.id.to_string()),
        ("Date", display_date(Some(p.prescription_date))),
        ("Patient", p.patient_name.clone()),
        ("Age", p.patient_age.to_string()),
        ("Gender", p.patient_gender.label().to_string()),
        ("Diagnosis", display_text(p.diagnosis.as_deref()).to_string()),
        ("Medicines", display_text(p.medicines.as_deref()).to_string()),
        ("Next visit", display_date(p.next_visit_date)),
    ];
    fields
        .iter()
        .map(|(name, value)| format!("{:<12}{}", format!("{name}:"), value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}
