//! Where year documents come from.
//!
//! The loader only needs "give me year N"; these sources answer that over
//! HTTP (the deployed static site) or from a local data directory.

use crate::loader::LoadError;
use crate::models::YearAnalysis;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Placeholder replaced by the year in resource templates.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// A provider of year documents.
pub trait AnalysisSource: Send + Sync {
    /// Fetch and parse the document for `year`.
    fn fetch(&self, year: i32) -> BoxFuture<'_, Result<YearAnalysis, LoadError>>;

    /// Human-readable location of the document for `year`.
    fn location(&self, year: i32) -> String;
}

/// Expand a resource template such as `data/analysis_data_{year}.json`.
pub fn resource_path(template: &str, year: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// Fetches documents from a static web host.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    path_template: String,
}

impl HttpSource {
    pub fn new(
        base_url: &str,
        path_template: &str,
        timeout: Duration,
    ) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            path_template: path_template.trim_start_matches('/').to_string(),
        })
    }

    fn url_for(&self, year: i32) -> String {
        format!("{}/{}", self.base_url, resource_path(&self.path_template, year))
    }

    async fn fetch_year(&self, year: i32) -> Result<YearAnalysis, LoadError> {
        let url = self.url_for(year);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                status: response.status(),
                url,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl AnalysisSource for HttpSource {
    fn fetch(&self, year: i32) -> BoxFuture<'_, Result<YearAnalysis, LoadError>> {
        self.fetch_year(year).boxed()
    }

    fn location(&self, year: i32) -> String {
        self.url_for(year)
    }
}

/// Reads documents from a local directory, e.g. the site's `public/data`.
pub struct DirectorySource {
    dir: PathBuf,
    file_template: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, file_template: &str) -> Self {
        Self {
            dir: dir.into(),
            file_template: file_template.to_string(),
        }
    }

    fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(resource_path(&self.file_template, year))
    }

    async fn read_year(&self, year: i32) -> Result<YearAnalysis, LoadError> {
        let path = self.path_for(year);
        debug!("Reading {}", path.display());

        let content = tokio::fs::read(&path)
            .await
            .map_err(|source| LoadError::Io { path, source })?;

        Ok(serde_json::from_slice(&content)?)
    }
}

impl AnalysisSource for DirectorySource {
    fn fetch(&self, year: i32) -> BoxFuture<'_, Result<YearAnalysis, LoadError>> {
        self.read_year(year).boxed()
    }

    fn location(&self, year: i32) -> String {
        self.path_for(year).display().to_string()
    }
}
