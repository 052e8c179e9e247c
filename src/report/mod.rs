//! Report assembly and rendering.

pub mod generator;
pub mod summary;

pub use generator::{generate_json_report, generate_markdown_report, generate_text_summary};
pub use summary::{SummaryOptions, YearSummary};
