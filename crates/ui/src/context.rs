use std::sync::Arc;

use edx_core::model::CourseId;
use services::{AppServices, Clock};

use crate::resources::ResourceManager;
use crate::vm::{CourseProgressViewModel, ProfileDeps, ProfileViewModel};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
    fn resources(&self) -> Arc<dyn ResourceManager>;

    /// Course opened by the "Progress" sidebar link, if any.
    fn default_course(&self) -> Option<CourseId>;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    resources: Arc<dyn ResourceManager>,
    default_course: Option<CourseId>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            resources: app.resources(),
            default_course: app.default_course(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.services.clock()
    }

    #[must_use]
    pub fn default_course(&self) -> Option<&CourseId> {
        self.default_course.as_ref()
    }

    #[must_use]
    pub fn services(&self) -> &AppServices {
        &self.services
    }

    #[must_use]
    pub fn resources(&self) -> Arc<dyn ResourceManager> {
        Arc::clone(&self.resources)
    }

    /// Fresh profile coordinator wired to the shared services.
    #[must_use]
    pub fn profile_view_model(&self) -> ProfileViewModel {
        ProfileViewModel::new(ProfileDeps {
            interactor: self.services.profile_interactor(),
            cache: self.services.profile_cache(),
            resources: self.resources(),
            notifier: self.services.notifier(),
            cookies: self.services.cookies(),
            downloads: self.services.downloads(),
            analytics: self.services.analytics(),
        })
    }

    #[must_use]
    pub fn course_progress_view_model(&self, course_id: CourseId) -> CourseProgressViewModel {
        CourseProgressViewModel::new(
            course_id,
            self.services.course_interactor(),
            self.resources(),
        )
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
