//! Conversion between calendar dates and their `dd/mm/yyyy` text form.

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::warn;

/// The only textual date layout the module accepts and produces.
pub const DATE_PATTERN: &str = "%d/%m/%Y";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse '{input}' as dd/mm/yyyy: {reason}")]
pub struct DateParseError {
    pub input: String,
    pub reason: String,
}

/// Parse `dd/mm/yyyy`, reporting malformed text or impossible calendar dates.
///
/// Fields must be zero-padded: two-digit day and month, four-digit year.
pub fn try_parse(text: &str) -> Result<NaiveDate, DateParseError> {
    let fail = |reason: String| DateParseError {
        input: text.to_string(),
        reason,
    };

    let parsed =
        NaiveDate::parse_from_str(text, DATE_PATTERN).map_err(|e| fail(e.to_string()))?;
    // chrono accepts unpadded and short fields; only the canonical rendering is valid.
    if format(parsed) != text {
        return Err(fail("not in dd/mm/yyyy form".to_string()));
    }
    Ok(parsed)
}

/// Parse `dd/mm/yyyy`, substituting today's local date when the text is not a valid date.
///
/// The failure is only logged. Callers that must tell a fallback apart from a real
/// value should use [`try_parse`].
pub fn parse(text: &str) -> NaiveDate {
    try_parse(text).unwrap_or_else(|e| {
        warn!(input = %e.input, reason = %e.reason, "Date parsing failed, using today");
        today()
    })
}

/// Render a date as `dd/mm/yyyy`.
pub fn format(date: NaiveDate) -> String {
    date.format(DATE_PATTERN).to_string()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_well_formed_text() {
        assert_eq!(parse("01/01/2001"), ymd(2001, 1, 1));
        assert_eq!(parse("29/02/2020"), ymd(2020, 2, 29));
        assert_eq!(try_parse("31/12/1999").unwrap(), ymd(1999, 12, 31));
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format(ymd(2005, 5, 5)), "05/05/2005");
        assert_eq!(format(ymd(987, 10, 3)), "03/10/0987");
    }

    #[test]
    fn invalid_calendar_date_falls_back_to_today() {
        let before = today();
        let parsed = parse("31/02/2020");
        let after = today();
        assert!(parsed == before || parsed == after);
    }

    #[test]
    fn malformed_text_falls_back_to_today() {
        for input in ["", "2001-01-01", "01/13/2001", "aa/bb/cccc", "01/01"] {
            let before = today();
            let parsed = parse(input);
            assert!(
                parsed == before || parsed == today(),
                "'{input}' should fall back to today"
            );
        }
    }

    #[test]
    fn unpadded_or_short_fields_fall_back_to_today() {
        let inputs = [
            "1/1/2001",
            "01/1/2001",
            "1/01/2001",
            "01/01/01",
            "01/01/201",
            "01/01/+2001",
        ];
        for input in inputs {
            let err = try_parse(input).unwrap_err();
            assert_eq!(err.input, input);

            let before = today();
            let parsed = parse(input);
            assert!(
                parsed == before || parsed == today(),
                "'{input}' should fall back to today"
            );
        }
        assert_eq!(
            try_parse("1/1/2001").unwrap_err().reason,
            "not in dd/mm/yyyy form"
        );
    }

    #[test]
    fn try_parse_reports_the_offending_input() {
        let err = try_parse("31/02/2020").unwrap_err();
        assert_eq!(err.input, "31/02/2020");
        assert!(err.to_string().contains("31/02/2020"));
    }

    #[test]
    fn well_formed_text_survives_parse_then_format() {
        for s in [
            "01/01/2001",
            "02/02/2002",
            "29/02/2000",
            "31/12/9999",
            "01/01/0001",
            "15/08/1947",
        ] {
            assert_eq!(format(parse(s)), s);
        }
    }

    #[test]
    fn dates_survive_format_then_parse() {
        // Walk a long span with a stride that hits every day-of-month and month.
        let mut d = ymd(1, 1, 1);
        let end = ymd(9999, 12, 31);
        while d <= end {
            assert_eq!(try_parse(&format(d)).unwrap(), d);
            d = match d.checked_add_days(Days::new(997)) {
                Some(next) => next,
                None => break,
            };
        }
        for d in [ymd(2024, 2, 29), ymd(9999, 12, 31), ymd(1, 1, 1)] {
            assert_eq!(parse(&format(d)), d);
        }
    }
}
