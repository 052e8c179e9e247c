//! Loading of yearly analysis documents.
//!
//! [`YearLoader`] owns the per-session cache and the supersession logic;
//! [`AnalysisSource`] implementations decide where documents come from.

pub mod error;
pub mod source;
pub mod year_loader;

pub use error::LoadError;
pub use source::{AnalysisSource, DirectorySource, HttpSource};
pub use year_loader::{LoadState, LoaderOptions, YearLoader};
