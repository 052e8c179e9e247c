//! Human-readable durations in Spanish.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
/// Calendar months are approximated as 30 days.
const MONTH: u64 = 30 * DAY;

/// (seconds per unit, singular, plural), largest first.
const UNITS: [(u64, &str, &str); 5] = [
    (MONTH, "mes", "meses"),
    (DAY, "día", "días"),
    (HOUR, "hora", "horas"),
    (MINUTE, "minuto", "minutos"),
    (1, "segundo", "segundos"),
];

/// Format a number of seconds as e.g. `"2 días, 1 hora, 5 segundos"`.
///
/// Zero-valued units are left out; zero itself is `"0 segundos"`.
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "0 segundos".to_string();
    }

    let mut remaining = seconds;
    let mut parts = Vec::new();

    for (size, singular, plural) in UNITS {
        let amount = remaining / size;
        remaining %= size;
        if amount > 0 {
            let label = if amount == 1 { singular } else { plural };
            parts.push(format!("{} {}", amount, label));
        }
    }

    parts.join(", ")
}

/// Largest unit only, e.g. `"3 días"`, for tight spaces.
pub fn format_duration_short(seconds: u64) -> String {
    for (size, singular, plural) in UNITS {
        let amount = seconds / size;
        if amount > 0 {
            let label = if amount == 1 { singular } else { plural };
            return format!("{} {}", amount, label);
        }
    }
    "0 segundos".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seconds() {
        assert_eq!(format_duration(0), "0 segundos");
    }

    #[test]
    fn test_minute_and_seconds() {
        assert_eq!(format_duration(90), "1 minuto, 30 segundos");
    }

    #[test]
    fn test_units_in_descending_order() {
        assert_eq!(format_duration(3661), "1 hora, 1 minuto, 1 segundo");
    }

    #[test]
    fn test_zero_units_are_skipped() {
        assert_eq!(format_duration(2 * DAY + 5), "2 días, 5 segundos");
        assert_eq!(format_duration(HOUR), "1 hora");
    }

    #[test]
    fn test_months() {
        assert_eq!(format_duration(MONTH + DAY), "1 mes, 1 día");
        assert_eq!(format_duration(3 * MONTH + 2 * HOUR), "3 meses, 2 horas");
    }

    #[test]
    fn test_short_form() {
        assert_eq!(format_duration_short(0), "0 segundos");
        assert_eq!(format_duration_short(59), "59 segundos");
        assert_eq!(format_duration_short(3 * DAY + 7 * HOUR), "3 días");
    }
}
