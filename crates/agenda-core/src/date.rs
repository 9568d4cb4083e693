//! Display formatting for catalog timestamps.
//!
//! The catalog emits `YYYY-MM-DDTHH:MM:SS±HH:MM`. Users see `DD/MM/YYYY à HHhMM`.
//! Anything that cannot be read that way is shown exactly as received.

use chrono::{NaiveDate, NaiveTime};

/// Shown when an event carries no date at all.
pub const DATE_NOT_SPECIFIED: &str = "Date non précisée";

/// Formats a catalog timestamp for display.
///
/// Never fails: malformed input is returned unchanged.
///
/// ```
/// use agenda_core::date::format_date;
///
/// assert_eq!(format_date(Some("2023-03-15T19:00:00+01:00")), "15/03/2023 à 19h00");
/// assert_eq!(format_date(Some("demain soir")), "demain soir");
/// ```
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return DATE_NOT_SPECIFIED.to_string();
    };

    parse_timestamp(raw).unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<String> {
    let (date_part, time_part) = raw.trim().split_once('T')?;

    let date = parse_date(date_part)?;
    let mut display = date.format("%d/%m/%Y").to_string();

    let time_part = strip_offset(time_part);
    if !time_part.is_empty() {
        let time = parse_time(time_part)?;
        display.push_str(&time.format(" à %Hh%M").to_string());
    }

    Some(display)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut tokens = value.split('-');
    let year = numeric(tokens.next()?)?;
    let month = numeric(tokens.next()?)?;
    let day = numeric(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let mut tokens = value.split(':');
    let hour = numeric(tokens.next()?)?;
    let minute = numeric(tokens.next()?)?;

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Drops a trailing `Z` or `±HH:MM` offset.
fn strip_offset(time: &str) -> &str {
    match time.find(['+', '-', 'Z', 'z']) {
        Some(index) => &time[..index],
        None => time,
    }
}

fn numeric(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_timestamp() {
        assert_eq!(
            format_date(Some("2023-03-15T19:00:00+01:00")),
            "15/03/2023 à 19h00"
        );
        assert_eq!(
            format_date(Some("2024-12-01T09:05:30-05:00")),
            "01/12/2024 à 09h05"
        );
        assert_eq!(format_date(Some("2024-07-14T22:30:00Z")), "14/07/2024 à 22h30");
    }

    #[test]
    fn test_missing_input_uses_placeholder() {
        assert_eq!(format_date(None), DATE_NOT_SPECIFIED);
        assert_eq!(format_date(Some("")), DATE_NOT_SPECIFIED);
        assert_eq!(format_date(Some("   ")), DATE_NOT_SPECIFIED);
    }

    #[test]
    fn test_inputs_without_separator_are_returned_unchanged() {
        for raw in ["2023-03-15", "15 mars 2023", "tous les jours", "20230315 190000"] {
            assert_eq!(format_date(Some(raw)), raw);
        }
    }

    #[test]
    fn test_malformed_parts_are_returned_unchanged() {
        for raw in [
            "2023-03T19:00:00",
            "2023-03-15-01T19:00:00",
            "2023-xx-15T19:00:00",
            "2023-03-15T19h00",
            "2023-13-45T19:00:00+01:00",
            "2023-03-15T25:00:00",
        ] {
            assert_eq!(format_date(Some(raw)), raw, "input: {raw}");
        }
    }

    #[test]
    fn test_date_without_time_component() {
        assert_eq!(format_date(Some("2023-03-15T")), "15/03/2023");
        assert_eq!(format_date(Some("2023-03-15T+01:00")), "15/03/2023");
    }
}
