//! Intensity scales for the weekly block matrix and the daily calendar.

use crate::metrics::dates::{days_in_year, MONTHS};
use crate::models::{BlockAnalysis, OrderedCounts};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const WEEKDAYS_SHORT: [&str; 7] = ["LUN", "MAR", "MIE", "JUE", "VIE", "SAB", "DOM"];
pub const WEEKDAYS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Calendar rows run Sunday first.
pub const CALENDAR_ROWS: [&str; 7] = ["Dom", "Lun", "Mar", "Mie", "Jue", "Vie", "Sab"];

/// Bucketed share of the maximum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    Empty,
    Faint,
    Low,
    Medium,
    High,
    Peak,
}

impl IntensityLevel {
    pub fn from_value(value: u64, max: u64) -> Self {
        if max == 0 || value == 0 {
            return IntensityLevel::Empty;
        }
        let ratio = value as f64 / max as f64;
        if ratio < 0.2 {
            IntensityLevel::Faint
        } else if ratio < 0.4 {
            IntensityLevel::Low
        } else if ratio < 0.6 {
            IntensityLevel::Medium
        } else if ratio < 0.8 {
            IntensityLevel::High
        } else {
            IntensityLevel::Peak
        }
    }

    /// Single-character rendering for terminals.
    pub fn glyph(self) -> char {
        match self {
            IntensityLevel::Empty => '·',
            IntensityLevel::Faint => '░',
            IntensityLevel::Low => '▒',
            IntensityLevel::Medium => '▓',
            IntensityLevel::High => '█',
            IntensityLevel::Peak => '■',
        }
    }
}

/// Which weekday series of a block to show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyMode {
    /// Outage seconds summed per weekday
    #[default]
    Total,
    /// Average outage seconds per weekday
    Average,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRow {
    pub block: u32,
    /// Outage seconds, Monday first.
    pub values: [u64; 7],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyMatrix {
    pub mode: WeeklyMode,
    pub max: u64,
    pub rows: Vec<BlockRow>,
}

impl WeeklyMatrix {
    pub fn level(&self, value: u64) -> IntensityLevel {
        IntensityLevel::from_value(value, self.max)
    }

    /// Whether any block carries weekday data at all.
    pub fn has_data(&self) -> bool {
        self.max > 0
    }
}

/// Blocks × weekdays matrix. Missing weekday entries count as zero and
/// fractional averages are floored to whole seconds.
pub fn weekly_block_matrix(blocks: &[BlockAnalysis], mode: WeeklyMode) -> WeeklyMatrix {
    let rows: Vec<BlockRow> = blocks
        .iter()
        .map(|block| {
            let series: Vec<u64> = match mode {
                WeeklyMode::Total => block.weekday_off_seconds.clone(),
                WeeklyMode::Average => block
                    .weekday_off_avg_seconds
                    .iter()
                    .map(|&avg| avg.max(0.0).floor() as u64)
                    .collect(),
            };
            let mut values = [0u64; 7];
            for (slot, value) in values.iter_mut().zip(series) {
                *slot = value;
            }
            BlockRow {
                block: block.number,
                values,
            }
        })
        .collect();

    let max = rows
        .iter()
        .flat_map(|row| row.values.iter().copied())
        .max()
        .unwrap_or(0);

    WeeklyMatrix { mode, max, rows }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    /// 1-based day of the year.
    pub day: u32,
    pub count: u64,
    /// 0 for silent days, otherwise `0.2 + 0.8 * count / max`.
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthMarker {
    pub label: &'static str,
    pub column: usize,
}

/// GitHub-style calendar of messages per day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyActivity {
    /// Seven rows, Sunday first; `None` pads the first week.
    pub rows: Vec<Vec<Option<DayCell>>>,
    /// Busiest day's count, at least 1.
    pub max: u64,
    pub average: f64,
    pub months: Vec<MonthMarker>,
}

impl DailyActivity {
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

pub fn daily_activity(daily: &OrderedCounts, year: i32) -> DailyActivity {
    let max = daily.values().max().unwrap_or(0).max(1);
    let average = if daily.is_empty() {
        0.0
    } else {
        daily.total() as f64 / daily.len() as f64
    };

    let mut rows: Vec<Vec<Option<DayCell>>> = vec![Vec::new(); 7];
    let mut months = Vec::new();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return DailyActivity {
            rows,
            max,
            average,
            months,
        };
    };

    let offset = first_day.weekday().num_days_from_sunday() as usize;
    let total_days = days_in_year(year) as usize;
    let mut last_month = None;

    for slot in 0..(total_days + offset) {
        let row = slot % 7;
        let column = slot / 7;

        if slot < offset {
            rows[row].push(None);
            continue;
        }

        let day = (slot - offset + 1) as u32;
        let count = daily.get(&day.to_string()).unwrap_or(0);
        let intensity = if count == 0 {
            0.0
        } else {
            0.2 + (count as f64 / max as f64) * 0.8
        };
        rows[row].push(Some(DayCell {
            day,
            count,
            intensity,
        }));

        if let Some(date) = NaiveDate::from_yo_opt(year, day) {
            let month = date.month0() as usize;
            if last_month != Some(month) {
                months.push(MonthMarker {
                    label: MONTHS[month],
                    column,
                });
                last_month = Some(month);
            }
        }
    }

    DailyActivity {
        rows,
        max,
        average,
        months,
    }
}
