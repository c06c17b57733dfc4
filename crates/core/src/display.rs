//! Display formatting for dates and optional text.

use chrono::NaiveDate;

/// Placeholder for a missing value.
pub const MISSING: &str = "—";

/// `Jan 5, 2024`, or [`MISSING`].
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// The text itself, or [`MISSING`] when absent or blank.
pub fn display_text(text: Option<&str>) -> &str {
    text.filter(|t| !t.trim().is_empty()).unwrap_or(MISSING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(display_date(Some(d)), "Jan 5, 2024");
        assert_eq!(display_date(None), MISSING);
    }

    #[test]
    fn test_display_text_replaces_blank() {
        assert_eq!(display_text(Some("Amoxicillin")), "Amoxicillin");
        assert_eq!(display_text(Some("  ")), MISSING);
        assert_eq!(display_text(None), MISSING);
    }
}
