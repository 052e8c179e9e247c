//! Derived metrics.
//!
//! Pure functions that turn a loaded [`crate::models::YearAnalysis`] into
//! display-ready values. Nothing in here performs I/O.

pub mod dates;
pub mod duration;
pub mod heatmap;
pub mod number;
pub mod ranking;
pub mod ratio;
pub mod series;
pub mod theme;
pub mod wordcloud;

pub use dates::format_date;
pub use duration::format_duration;
pub use number::{format_number, format_percent, group_digits};
pub use ratio::{percentage, reaction_share};
