//! Number formatting following the es-ES locale.

const MILLION: u64 = 1_000_000;
const THOUSAND: u64 = 1_000;

/// Group digits the way `Intl.NumberFormat('es-ES')` does: `.` between
/// groups of three, but four-digit numbers stay ungrouped.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 4 {
        return digits;
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Compact form for stat tiles: millions abbreviated to one decimal
/// (`"1.5M"`), everything else grouped.
pub fn format_number(value: u64) -> String {
    if value >= MILLION {
        format!("{:.1}M", value as f64 / MILLION as f64)
    } else {
        group_digits(value)
    }
}

/// Chart axis labels: `"2.3M"`, `"15K"`, or the plain value.
pub fn format_axis_tick(value: u64) -> String {
    if value >= MILLION {
        format!("{:.1}M", value as f64 / MILLION as f64)
    } else if value >= THOUSAND {
        format!("{:.0}K", value as f64 / THOUSAND as f64)
    } else {
        value.to_string()
    }
}

/// Percentage with one decimal.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_are_plain() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(950), "950");
    }

    #[test]
    fn test_four_digits_not_grouped() {
        assert_eq!(group_digits(1500), "1500");
        assert_eq!(group_digits(9999), "9999");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_digits(15000), "15.000");
        assert_eq!(group_digits(123456), "123.456");
        assert_eq!(group_digits(1234567), "1.234.567");
        assert_eq!(format_number(999_999), "999.999");
    }

    #[test]
    fn test_millions_abbreviated() {
        assert_eq!(format_number(1_500_000), "1.5M");
        assert_eq!(format_number(1_000_000), "1.0M");
        assert_eq!(format_number(23_450_000), "23.4M");
    }

    #[test]
    fn test_axis_ticks() {
        assert_eq!(format_axis_tick(800), "800");
        assert_eq!(format_axis_tick(15_000), "15K");
        assert_eq!(format_axis_tick(2_300_000), "2.3M");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(0.0), "0.0%");
    }
}
