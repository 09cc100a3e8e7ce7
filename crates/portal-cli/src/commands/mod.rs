pub mod prefs;
pub mod records;
pub mod render;
pub mod ui;

use anyhow::Result;
use portal_config::{Config, PreferenceStore, SourceMode};
use portal_core::{EvalContext, Record};
use portal_engine::{CollectionView, Notifier};
use portal_sources::{
    DataSource, FallbackSource, FetchQuery, Fixture, Resource, RestSettings, RestSource,
    StubSource,
};
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

/// Everything a command needs from the loaded configuration
pub struct Session {
    pub config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn context(&self) -> EvalContext {
        EvalContext::now_local().with_current_user(self.config.session.current_user.clone())
    }

    pub fn query(&self) -> FetchQuery {
        FetchQuery {
            limit: self.config.api.fetch_limit,
        }
    }

    fn rest<R: Resource>(&self) -> Result<RestSource<R>> {
        let settings = RestSettings {
            base_url: self.config.api.base_url.clone(),
            token: self.config.api_token(),
            timeout: Duration::from_secs(self.config.api.timeout_secs),
        };
        Ok(RestSource::new(settings)?)
    }

    pub fn source<R: Resource + Fixture>(&self) -> Result<Arc<dyn DataSource<R>>> {
        let source: Arc<dyn DataSource<R>> = match self.config.source.mode {
            SourceMode::Rest => Arc::new(self.rest::<R>()?),
            SourceMode::Stub => Arc::new(StubSource::<R>::with_fixtures(OffsetDateTime::now_utc())),
            SourceMode::Fallback => Arc::new(FallbackSource::new(
                Arc::new(self.rest::<R>()?),
                Arc::new(StubSource::<R>::with_fixtures(OffsetDateTime::now_utc())),
            )),
        };
        tracing::debug!(kind = %R::KIND, mode = %self.config.source.mode, "data source ready");
        Ok(source)
    }

    /// Fresh view state; the page size comes from `page_size`, then the
    /// saved preference, then the per-view default.
    pub fn view<R: Record>(
        &self,
        prefs: &PreferenceStore,
        page_size: Option<usize>,
    ) -> Result<CollectionView<R>> {
        let size = page_size
            .or_else(|| prefs.page_size(R::KIND.view_key()))
            .unwrap_or_else(|| R::KIND.default_page_size());
        Ok(CollectionView::new(size, self.context())?)
    }
}

/// Prints notifications to the terminal
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("✓ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}
