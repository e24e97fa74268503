//! Event date conversions.
//!
//! The dashboard labels games as `DD/MM/YY` while the database stores ISO
//! `YYYY-MM-DD`. Two-digit years follow chrono's `%y` rule (00-68 → 20xx).

use crate::errors::{Error, Result};
use chrono::{Local, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";
const LABEL_FORMAT: &str = "%d/%m/%y";

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Parses a `DD/MM/YY` label.
pub fn parse_label(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), LABEL_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Formats a date as a zero-padded `DD/MM/YY` label.
#[must_use]
pub fn to_label(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

/// Formats a date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Converts a stored ISO date into the display label.
///
/// Values that are not ISO dates are returned unchanged, so rows written with a
/// label (or free text) still show up under their own label.
#[must_use]
pub fn iso_to_label(value: &str) -> String {
    parse_iso(value).map_or_else(|_| value.to_string(), to_label)
}

/// Converts a display label into the ISO date written to the database.
///
/// Values that are not labels are returned unchanged.
#[must_use]
pub fn label_to_iso(value: &str) -> String {
    parse_label(value).map_or_else(|_| value.to_string(), to_iso)
}

/// Today's date as a display label, the default for a new sale.
#[must_use]
pub fn today_label() -> String {
    to_label(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_iso_to_label_zero_pads() {
        assert_eq!(iso_to_label("2025-11-02"), "02/11/25");
        assert_eq!(iso_to_label("2026-01-09"), "09/01/26");
    }

    #[test]
    fn test_iso_to_label_passes_through_unparseable() {
        assert_eq!(iso_to_label("04/11/25"), "04/11/25");
        assert_eq!(iso_to_label(""), "");
        assert_eq!(iso_to_label("2025-13-01"), "2025-13-01");
    }

    #[test]
    fn test_label_to_iso() {
        assert_eq!(label_to_iso("05/11/25"), "2025-11-05");
        assert_eq!(label_to_iso("not a date"), "not a date");
    }

    #[test]
    fn test_label_iso_agree() {
        let date = parse_label("06/11/25").unwrap();
        assert_eq!(to_iso(date), "2025-11-06");
        assert_eq!(parse_iso("2025-11-06").unwrap(), date);
    }

    #[test]
    fn test_parse_errors_carry_input() {
        let err = parse_iso("yesterday").unwrap_err();
        assert!(matches!(err, Error::InvalidDate { value } if value == "yesterday"));
    }

    #[test]
    fn test_today_label_is_a_label() {
        let today = today_label();
        assert_eq!(today.len(), 8);
        assert!(parse_label(&today).is_ok());
    }
}
