//! Spanish date labels.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

pub const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

pub const MONTHS_SHORT: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];

/// Formats the producer writes timestamps in, besides RFC 3339.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a document timestamp, keeping its local wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// `"15 de marzo de 2024, 03:45 p. m."`; unparseable input comes back as is.
pub fn format_date(value: &str) -> String {
    let Some(dt) = parse_timestamp(value) else {
        return value.to_string();
    };

    let (is_pm, hour) = dt.hour12();
    format!(
        "{} de {} de {}, {:02}:{:02} {}",
        dt.day(),
        MONTHS[dt.month0() as usize].to_lowercase(),
        dt.year(),
        hour,
        dt.minute(),
        if is_pm { "p. m." } else { "a. m." }
    )
}

/// `"3 de enero"` for day-of-year 3.
pub fn day_of_year_label(day: u32, year: i32) -> Option<String> {
    let date = NaiveDate::from_yo_opt(year, day)?;
    Some(format!(
        "{} de {}",
        date.day(),
        MONTHS[date.month0() as usize].to_lowercase()
    ))
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_naive_timestamp() {
        assert_eq!(
            format_date("2024-03-15 15:45:00"),
            "15 de marzo de 2024, 03:45 p. m."
        );
    }

    #[test]
    fn test_format_rfc3339_keeps_local_time() {
        assert_eq!(
            format_date("2022-10-01T00:05:00-04:00"),
            "1 de octubre de 2022, 12:05 a. m."
        );
    }

    #[test]
    fn test_format_iso_without_offset() {
        assert_eq!(
            format_date("2023-07-04T09:30:12.500"),
            "4 de julio de 2023, 09:30 a. m."
        );
    }

    #[test]
    fn test_unparseable_date_returned_unchanged() {
        assert_eq!(format_date("ayer"), "ayer");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_day_of_year_label() {
        assert_eq!(day_of_year_label(3, 2024).as_deref(), Some("3 de enero"));
        assert_eq!(day_of_year_label(60, 2024).as_deref(), Some("29 de febrero"));
        assert_eq!(day_of_year_label(60, 2023).as_deref(), Some("1 de marzo"));
        assert_eq!(day_of_year_label(366, 2023), None);
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2025), 365);
    }
}
