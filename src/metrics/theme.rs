//! Per-year accent palette.

use serde::Serialize;

/// Years with a published document, oldest first.
pub const AVAILABLE_YEARS: [i32; 5] = [2022, 2023, 2024, 2025, 2026];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearTheme {
    pub name: &'static str,
    pub primary: &'static str,
    pub background: &'static str,
}

const THEMES: [(i32, YearTheme); 9] = [
    (2022, YearTheme { name: "blue", primary: "#3b82f6", background: "#eff6ff" }),
    (2023, YearTheme { name: "green", primary: "#22c55e", background: "#f0fdf4" }),
    (2024, YearTheme { name: "purple", primary: "#a855f7", background: "#faf5ff" }),
    (2025, YearTheme { name: "orange", primary: "#f97316", background: "#fff7ed" }),
    (2026, YearTheme { name: "rose", primary: "#f43f5e", background: "#fff1f2" }),
    (2027, YearTheme { name: "teal", primary: "#14b8a6", background: "#f0fdfa" }),
    (2028, YearTheme { name: "slate", primary: "#64748b", background: "#f8fafc" }),
    (2029, YearTheme { name: "violet", primary: "#8b5cf6", background: "#f5f3ff" }),
    (2030, YearTheme { name: "stone", primary: "#78716c", background: "#fafaf9" }),
];

const FALLBACK: YearTheme = YearTheme {
    name: "default",
    primary: "#000000",
    background: "#ffffff",
};

pub fn theme_for_year(year: i32) -> YearTheme {
    THEMES
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, theme)| *theme)
        .unwrap_or(FALLBACK)
}

/// Most recent published year.
pub fn latest_year() -> i32 {
    AVAILABLE_YEARS[AVAILABLE_YEARS.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_year() {
        let theme = theme_for_year(2025);
        assert_eq!(theme.name, "orange");
        assert_eq!(theme.primary, "#f97316");
    }

    #[test]
    fn test_unknown_year_falls_back() {
        assert_eq!(theme_for_year(1999), FALLBACK);
    }

    #[test]
    fn test_every_available_year_has_a_theme() {
        for year in AVAILABLE_YEARS {
            assert_ne!(theme_for_year(year), FALLBACK);
        }
        assert_eq!(latest_year(), 2026);
    }
}
