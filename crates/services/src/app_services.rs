use std::sync::Arc;

use storage::repository::{ProfileCache, Storage};

use crate::analytics::{ProfileAnalytics, TracingAnalytics};
use crate::api::HttpEdxApi;
use crate::config::ApiConfig;
use crate::downloads::{DownloadQueue, DownloadWorkerController};
use crate::error::AppServicesError;
use crate::interactor::{CourseInteractor, ProfileInteractor};
use crate::notifier::ProfileNotifier;
use crate::session::{CookieManager, SessionCookieStore};
use crate::Clock;

/// Assembles app-facing collaborators shared by every screen.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    profile_interactor: Arc<dyn ProfileInteractor>,
    course_interactor: Arc<dyn CourseInteractor>,
    profile_cache: Arc<dyn ProfileCache>,
    notifier: ProfileNotifier,
    cookies: Arc<dyn CookieManager>,
    downloads: Arc<dyn DownloadWorkerController>,
    analytics: Arc<dyn ProfileAnalytics>,
}

impl AppServices {
    /// Build services backed by the HTTP API and a `SQLite` profile cache.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or HTTP client setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        config: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api = Arc::new(HttpEdxApi::new(config)?);

        Ok(Self {
            clock,
            profile_interactor: Arc::clone(&api) as Arc<dyn ProfileInteractor>,
            course_interactor: api,
            profile_cache: Arc::clone(&storage.profile),
            notifier: ProfileNotifier::new(),
            cookies: Arc::new(SessionCookieStore::new()),
            downloads: Arc::new(DownloadQueue::new()),
            analytics: Arc::new(TracingAnalytics),
        })
    }

    /// Assemble from explicit parts; used by tests and alternate front ends.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        clock: Clock,
        profile_interactor: Arc<dyn ProfileInteractor>,
        course_interactor: Arc<dyn CourseInteractor>,
        profile_cache: Arc<dyn ProfileCache>,
        notifier: ProfileNotifier,
        cookies: Arc<dyn CookieManager>,
        downloads: Arc<dyn DownloadWorkerController>,
        analytics: Arc<dyn ProfileAnalytics>,
    ) -> Self {
        Self {
            clock,
            profile_interactor,
            course_interactor,
            profile_cache,
            notifier,
            cookies,
            downloads,
            analytics,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn profile_interactor(&self) -> Arc<dyn ProfileInteractor> {
        Arc::clone(&self.profile_interactor)
    }

    #[must_use]
    pub fn course_interactor(&self) -> Arc<dyn CourseInteractor> {
        Arc::clone(&self.course_interactor)
    }

    #[must_use]
    pub fn profile_cache(&self) -> Arc<dyn ProfileCache> {
        Arc::clone(&self.profile_cache)
    }

    #[must_use]
    pub fn notifier(&self) -> ProfileNotifier {
        self.notifier.clone()
    }

    #[must_use]
    pub fn cookies(&self) -> Arc<dyn CookieManager> {
        Arc::clone(&self.cookies)
    }

    #[must_use]
    pub fn downloads(&self) -> Arc<dyn DownloadWorkerController> {
        Arc::clone(&self.downloads)
    }

    #[must_use]
    pub fn analytics(&self) -> Arc<dyn ProfileAnalytics> {
        Arc::clone(&self.analytics)
    }
}
