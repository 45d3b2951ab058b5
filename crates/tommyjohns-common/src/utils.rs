//! Utility functions used across the Tommy Johns workspace

use crate::{Result, TjError};
use chrono::NaiveDate;

/// Date layouts accepted in the surgery date column, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// `%Y` happily reads "12" as year 12, so two digit years get their own layout.
const SHORT_YEAR_FORMAT: &str = "%m/%d/%y";

/// Cell contents that mean "no value", matching pandas' default NA markers.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell holds no value: blank, or one of the NA markers.
pub fn is_missing_cell(raw: &str) -> bool {
    let value = raw.trim();
    value.is_empty() || MISSING_MARKERS.contains(&value)
}

/// Parse a surgery date cell into the canonical `NaiveDate`.
///
/// Missing cells are `Ok(None)`. A bare four digit year maps to January 1st
/// of that year, so year-only rows still sort and group correctly.
pub fn parse_surgery_date(raw: &str) -> Result<Option<NaiveDate>> {
    if is_missing_cell(raw) {
        return Ok(None);
    }
    let value = raw.trim();

    let short_year = value.contains('/') && value.rsplit('/').next().map_or(false, |y| y.len() == 2);
    let formats: &[&str] = if short_year { &[SHORT_YEAR_FORMAT] } else { DATE_FORMATS };

    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(Some(date));
        }
    }

    if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
        if let Some(date) = value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        {
            return Ok(Some(date));
        }
    }

    Err(TjError::data(format!("unrecognized surgery date '{value}'")))
}

/// Parse an optional numeric cell.
///
/// Missing cells are `Ok(None)`. Infinite values are rejected along with
/// anything that is not a number.
pub fn parse_optional_f64(raw: &str, field_name: &str) -> Result<Option<f64>> {
    if is_missing_cell(raw) {
        return Ok(None);
    }
    let value = raw.trim();
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        Ok(_) => Err(TjError::data(format!("{field_name} '{value}' is not finite"))),
        Err(_) => Err(TjError::data(format!("{field_name} '{value}' is not a number"))),
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TjError::new(format!("{} cannot be empty", field_name)))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_surgery_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2012, 3, 14).unwrap();
        assert_eq!(parse_surgery_date("3/14/2012").unwrap(), Some(expected));
        assert_eq!(parse_surgery_date("03/14/2012").unwrap(), Some(expected));
        assert_eq!(parse_surgery_date("2012-03-14").unwrap(), Some(expected));
        assert_eq!(parse_surgery_date("3/14/12").unwrap(), Some(expected));
    }

    #[test]
    fn test_parse_surgery_date_bare_year() {
        assert_eq!(
            parse_surgery_date("2010").unwrap(),
            NaiveDate::from_ymd_opt(2010, 1, 1)
        );
    }

    #[test]
    fn test_parse_surgery_date_empty_and_invalid() {
        assert_eq!(parse_surgery_date("").unwrap(), None);
        assert_eq!(parse_surgery_date("   ").unwrap(), None);
        assert!(parse_surgery_date("March 2012").is_err());
        assert!(parse_surgery_date("13/45/2012").is_err());
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("24", "Age").unwrap(), Some(24.0));
        assert_eq!(parse_optional_f64(" 13.5 ", "Age").unwrap(), Some(13.5));
        assert_eq!(parse_optional_f64("", "Age").unwrap(), None);

        let err = parse_optional_f64("twelve", "Age").unwrap_err();
        assert!(err.to_string().contains("Age 'twelve' is not a number"));
    }

    #[test]
    fn test_na_markers_are_missing() {
        for marker in ["NaN", "nan", "NA", "N/A", "#N/A", "null", "NULL", "None", "<NA>", " NaN "] {
            assert_eq!(parse_optional_f64(marker, "Age").unwrap(), None, "{marker}");
            assert_eq!(parse_surgery_date(marker).unwrap(), None, "{marker}");
        }
        assert!(!is_missing_cell("0"));
        assert!(!is_missing_cell("Nancy"));
    }

    #[test]
    fn test_infinite_numbers_are_rejected() {
        for raw in ["inf", "-inf", "infinity", "1e999"] {
            let err = parse_optional_f64(raw, "Recovery Time (months)").unwrap_err();
            assert!(matches!(err, TjError::Data { .. }), "{raw}");
            assert!(err.to_string().contains("is not finite"), "{raw}");
        }
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("test", "field").is_ok());
        assert!(validate_non_empty("", "field").is_err());
        assert!(validate_non_empty("   ", "field").is_err());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'John'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;John&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
