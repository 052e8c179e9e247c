//! UNE Unwrapped
//!
//! Loads the yearly analysis documents published for the UNE Telegram
//! channel through a cancellable, cached [`loader::YearLoader`], and turns
//! them into the dashboard figures with the pure functions in [`metrics`].

pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod report;

pub use loader::{
    AnalysisSource, DirectorySource, HttpSource, LoadError, LoadState, LoaderOptions, YearLoader,
};
pub use models::YearAnalysis;
