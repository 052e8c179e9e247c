//! Monthly time series for the bar charts.

use crate::metrics::dates::{MONTHS, MONTHS_SHORT};
use crate::models::{OrderedCounts, YearAnalysis};
use serde::Serialize;

/// Which monthly series to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Views,
    Replies,
    Reactions,
    Messages,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Views,
        SeriesKind::Replies,
        SeriesKind::Reactions,
        SeriesKind::Messages,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Views => "Vistas",
            SeriesKind::Replies => "Comentarios",
            SeriesKind::Reactions => "Reacciones",
            SeriesKind::Messages => "Mensajes",
        }
    }

    pub fn counts(self, analysis: &YearAnalysis) -> &OrderedCounts {
        match self {
            SeriesKind::Views => &analysis.monthly_views,
            SeriesKind::Replies => &analysis.monthly_replies,
            SeriesKind::Reactions => &analysis.monthly_reactions,
            SeriesKind::Messages => &analysis.monthly_messages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    pub short: &'static str,
    pub month: &'static str,
    pub value: u64,
}

/// Twelve points, January first. Months absent from the map are zero.
pub fn monthly_series(counts: &OrderedCounts) -> Vec<MonthPoint> {
    (0..12)
        .map(|i| MonthPoint {
            short: MONTHS_SHORT[i],
            month: MONTHS[i],
            value: counts.get(&(i + 1).to_string()).unwrap_or(0),
        })
        .collect()
}

/// Month with the highest value; the earliest wins a tie. `None` if all zero.
pub fn peak_month(points: &[MonthPoint]) -> Option<&MonthPoint> {
    points
        .iter()
        .filter(|p| p.value > 0)
        .fold(None, |best: Option<&MonthPoint>, p| match best {
            Some(b) if b.value >= p.value => Some(b),
            _ => Some(p),
        })
}
