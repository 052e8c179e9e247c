//! Year-scoped loading with supersession and a per-session cache.
//!
//! Selecting a year aborts whatever the previous selection was still doing.
//! Every commit to the observable state is checked against a generation
//! number bumped by each selection, under the watch channel's lock, so a
//! late result for an older selection can never overwrite a newer one.

use crate::loader::AnalysisSource;
use crate::models::YearAnalysis;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// What consumers render: the data for the selected year, if any, and
/// whether a load is in progress.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    /// Most recently selected year.
    pub year: Option<i32>,
    pub data: Option<Arc<YearAnalysis>>,
    pub loading: bool,
    generation: u64,
}

impl LoadState {
    /// Year of the committed data, which may lag `year` while loading.
    pub fn data_year(&self) -> Option<i32> {
        self.data.as_ref().map(|d| d.year)
    }
}

/// Loader tuning.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Pause before committing a cache hit, so the loading transition is
    /// still observable. Zero means a bare scheduler yield.
    pub cache_hit_delay: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            cache_hit_delay: Duration::from_millis(1),
        }
    }
}

type YearCache = Arc<Mutex<HashMap<i32, Arc<YearAnalysis>>>>;

/// Loads one year at a time from an [`AnalysisSource`].
pub struct YearLoader {
    source: Arc<dyn AnalysisSource>,
    cache: YearCache,
    state: Arc<watch::Sender<LoadState>>,
    pending: Option<JoinHandle<()>>,
    options: LoaderOptions,
}

impl YearLoader {
    pub fn new(source: Arc<dyn AnalysisSource>, options: LoaderOptions) -> Self {
        let (state, _) = watch::channel(LoadState::default());

        Self {
            source,
            cache: Arc::new(Mutex::new(HashMap::new())),
            state: Arc::new(state),
            pending: None,
            options,
        }
    }

    /// Select `year`, superseding any selection still in flight.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn select_year(&mut self, year: i32) {
        if let Some(previous) = self.pending.take() {
            if !previous.is_finished() {
                debug!("Superseding in-flight load before selecting {}", year);
            }
            previous.abort();
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.year = Some(year);
            state.loading = true;
            generation = state.generation;
        });

        let state = Arc::clone(&self.state);

        let task = match self.cached(year) {
            Some(data) => {
                debug!("Year {} served from cache", year);
                let delay = self.options.cache_hit_delay;
                tokio::spawn(async move {
                    if delay.is_zero() {
                        tokio::task::yield_now().await;
                    } else {
                        tokio::time::sleep(delay).await;
                    }
                    commit(&state, generation, Some(data));
                })
            }
            None => {
                let source = Arc::clone(&self.source);
                let cache = Arc::clone(&self.cache);
                info!("Loading year {} from {}", year, source.location(year));
                tokio::spawn(async move {
                    match source.fetch(year).await {
                        Ok(analysis) => {
                            let data = store(&cache, year, analysis);
                            if !commit(&state, generation, Some(data)) {
                                debug!("Discarded result for superseded year {}", year);
                            }
                        }
                        Err(e) => {
                            error!(year, kind = e.kind(), "Failed to load year analysis: {}", e);
                            commit(&state, generation, None);
                        }
                    }
                })
            }
        };

        self.pending = Some(task);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every committed state change.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Wait until the current selection has settled, then return the state.
    pub async fn wait_until_loaded(&self) -> LoadState {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    pub fn is_cached(&self, year: i32) -> bool {
        self.cached(year).is_some()
    }

    /// Years fetched so far this session, ascending.
    pub fn cached_years(&self) -> Vec<i32> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        let mut years: Vec<i32> = cache.keys().copied().collect();
        years.sort_unstable();
        years
    }

    fn cached(&self, year: i32) -> Option<Arc<YearAnalysis>> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(&year).cloned()
    }
}

impl Drop for YearLoader {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

/// Insert a fetched year unless one is already cached; return the cached value.
fn store(cache: &YearCache, year: i32, analysis: YearAnalysis) -> Arc<YearAnalysis> {
    let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
    Arc::clone(cache.entry(year).or_insert_with(|| Arc::new(analysis)))
}

/// Publish the outcome of `generation`. Returns false if it was superseded.
fn commit(
    state: &watch::Sender<LoadState>,
    generation: u64,
    data: Option<Arc<YearAnalysis>>,
) -> bool {
    state.send_if_modified(|current| {
        if current.generation != generation {
            return false;
        }
        current.data = data;
        current.loading = false;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadError;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source with a fixed latency per year, counting every fetch.
    struct ScriptedSource {
        latency: HashMap<i32, Duration>,
        missing: Vec<i32>,
        fetches: Mutex<HashMap<i32, usize>>,
        total_fetches: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(latency: &[(i32, u64)]) -> Self {
            Self {
                latency: latency
                    .iter()
                    .map(|(year, ms)| (*year, Duration::from_millis(*ms)))
                    .collect(),
                missing: Vec::new(),
                fetches: Mutex::new(HashMap::new()),
                total_fetches: AtomicUsize::new(0),
            }
        }

        fn with_missing(mut self, year: i32) -> Self {
            self.missing.push(year);
            self
        }

        fn fetch_count(&self, year: i32) -> usize {
            self.fetches.lock().unwrap().get(&year).copied().unwrap_or(0)
        }
    }

    impl AnalysisSource for ScriptedSource {
        fn fetch(&self, year: i32) -> BoxFuture<'_, Result<YearAnalysis, LoadError>> {
            *self.fetches.lock().unwrap().entry(year).or_insert(0) += 1;
            self.total_fetches.fetch_add(1, Ordering::SeqCst);
            let latency = self.latency.get(&year).copied().unwrap_or_default();
            let missing = self.missing.contains(&year);

            async move {
                tokio::time::sleep(latency).await;
                if missing {
                    return Err(LoadError::Status {
                        status: reqwest::StatusCode::NOT_FOUND,
                        url: format!("memory://{}", year),
                    });
                }
                Ok(YearAnalysis {
                    year,
                    total_messages: year as u64,
                    ..Default::default()
                })
            }
            .boxed()
        }

        fn location(&self, year: i32) -> String {
            format!("memory://{}", year)
        }
    }

    fn loader_with(source: &Arc<ScriptedSource>) -> YearLoader {
        let source: Arc<dyn AnalysisSource> = source.clone();
        YearLoader::new(source, LoaderOptions::default())
    }

    #[tokio::test]
    async fn test_initial_state_is_empty() {
        let source = Arc::new(ScriptedSource::new(&[]));
        let loader = loader_with(&source);

        let state = loader.state();
        assert!(state.year.is_none());
        assert!(state.data.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_wait_until_loaded_returns_settled_state() {
        let source = Arc::new(ScriptedSource::new(&[(2025, 1)]));
        let mut loader = loader_with(&source);

        // Nothing selected: already settled.
        let idle = loader.wait_until_loaded().await;
        assert!(!idle.loading);
        assert!(idle.year.is_none());

        loader.select_year(2025);
        let first = loader.wait_until_loaded().await;
        let again = loader.wait_until_loaded().await;
        assert_eq!(first.data_year(), Some(2025));
        assert_eq!(again.data_year(), Some(2025));
        assert!(!again.loading);
    }

    #[tokio::test]
    async fn test_select_year_loads_data() {
        let source = Arc::new(ScriptedSource::new(&[(2024, 5)]));
        let mut loader = loader_with(&source);

        loader.select_year(2024);
        assert!(loader.state().loading);

        let state = loader.wait_until_loaded().await;
        assert!(!state.loading);
        assert_eq!(state.year, Some(2024));
        assert_eq!(state.data_year(), Some(2024));
        assert!(loader.is_cached(2024));
    }

    #[tokio::test]
    async fn test_reselecting_cached_year_skips_source() {
        let source = Arc::new(ScriptedSource::new(&[(2023, 2), (2024, 2)]));
        let mut loader = loader_with(&source);

        loader.select_year(2023);
        loader.wait_until_loaded().await;
        loader.select_year(2024);
        loader.wait_until_loaded().await;

        loader.select_year(2023);
        // Cache hits still pass through a loading phase.
        assert!(loader.state().loading);
        let state = loader.wait_until_loaded().await;

        assert_eq!(state.data_year(), Some(2023));
        assert_eq!(source.fetch_count(2023), 1);
        assert_eq!(source.fetch_count(2024), 1);
        assert_eq!(loader.cached_years(), vec![2023, 2024]);
    }

    #[tokio::test]
    async fn test_superseded_slow_request_never_commits() {
        let source = Arc::new(ScriptedSource::new(&[(2023, 150), (2024, 5)]));
        let mut loader = loader_with(&source);
        let mut rx = loader.subscribe();

        loader.select_year(2023);
        loader.select_year(2024);

        let state = loader.wait_until_loaded().await;
        assert_eq!(state.data_year(), Some(2024));

        // Outlive the slow request; nothing may replace the newer data.
        tokio::time::sleep(Duration::from_millis(250)).await;
        let state = loader.state();
        assert_eq!(state.year, Some(2024));
        assert_eq!(state.data_year(), Some(2024));
        assert!(!loader.is_cached(2023));

        let seen = rx.borrow_and_update().clone();
        assert_ne!(seen.data_year(), Some(2023));
    }

    #[tokio::test]
    async fn test_fast_older_request_is_superseded_too() {
        let source = Arc::new(ScriptedSource::new(&[(2023, 5), (2024, 60)]));
        let mut loader = loader_with(&source);

        loader.select_year(2023);
        loader.select_year(2024);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let state = loader.state();
        assert!(state.loading);
        assert!(state.data.is_none());

        let state = loader.wait_until_loaded().await;
        assert_eq!(state.data_year(), Some(2024));
    }

    #[tokio::test]
    async fn test_failed_load_clears_data_and_is_not_cached() {
        let source = Arc::new(ScriptedSource::new(&[(2024, 1)]).with_missing(2030));
        let mut loader = loader_with(&source);

        loader.select_year(2024);
        loader.wait_until_loaded().await;

        loader.select_year(2030);
        let state = loader.wait_until_loaded().await;
        assert!(!state.loading);
        assert!(state.data.is_none());
        assert_eq!(state.year, Some(2030));
        assert!(!loader.is_cached(2030));

        // No retry happens on its own; selecting again fetches again.
        loader.select_year(2030);
        loader.wait_until_loaded().await;
        assert_eq!(source.fetch_count(2030), 2);
    }

    #[tokio::test]
    async fn test_zero_cache_delay_still_yields() {
        let source = Arc::new(ScriptedSource::new(&[]));
        let dyn_source: Arc<dyn AnalysisSource> = source.clone();
        let mut loader = YearLoader::new(
            dyn_source,
            LoaderOptions {
                cache_hit_delay: Duration::ZERO,
            },
        );

        loader.select_year(2022);
        loader.wait_until_loaded().await;
        loader.select_year(2022);
        assert!(loader.state().loading);

        let state = loader.wait_until_loaded().await;
        assert_eq!(state.data_year(), Some(2022));
        assert_eq!(source.total_fetches.load(Ordering::SeqCst), 1);
    }
}
