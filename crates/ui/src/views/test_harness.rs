use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use edx_core::model::{Account, CourseId, CourseProgress};
use edx_core::time::fixed_clock;
use services::{AppServices, ProfileNotifier};
use storage::repository::{InMemoryProfileCache, ProfileCache, Storage};

use crate::context::{UiApp, build_app_context};
use crate::resources::{EnglishResources, ResourceManager};
use crate::views::{CourseProgressView, ProfileView};
use crate::vm::test_support::{
    CountingCookies, CountingDownloads, FakeCourseInteractor, FakeProfileInteractor, Outcome,
    RecordingAnalytics,
};

pub const COURSE: &str = "course-v1:edX+DemoX+Demo";

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn resources(&self) -> Arc<dyn ResourceManager> {
        Arc::new(EnglishResources)
    }

    fn default_course(&self) -> Option<CourseId> {
        CourseId::new(COURSE).ok()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Profile,
    Progress(CourseId),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Progress(course_id) => rsx! { CourseProgressView { course_id } },
    }
}

/// Remote and local collaborators a harness starts from.
pub struct Fixture {
    pub account: Outcome<Account>,
    pub cached: Option<Account>,
    pub progress: Outcome<CourseProgress>,
}

impl Fixture {
    pub fn account(account: Outcome<Account>) -> Self {
        Self {
            account,
            cached: None,
            progress: Outcome::Unknown,
        }
    }

    pub fn progress(progress: Outcome<CourseProgress>) -> Self {
        Self {
            account: Outcome::Unknown,
            cached: None,
            progress,
        }
    }

    #[must_use]
    pub fn with_cached(mut self, account: Account) -> Self {
        self.cached = Some(account);
        self
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub profile: Arc<FakeProfileInteractor>,
    pub courses: Arc<FakeCourseInteractor>,
    pub notifier: ProfileNotifier,
    built: bool,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
        self.built = true;
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Build once, then let pending futures publish into signals.
    pub async fn settle(&mut self) {
        if !self.built {
            self.rebuild();
        }
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, fixture: Fixture) -> ViewHarness {
    let profile = Arc::new(FakeProfileInteractor::new(fixture.account, Outcome::Ok(())));
    let courses = Arc::new(FakeCourseInteractor::new(fixture.progress));
    let cache: Arc<dyn ProfileCache> = match fixture.cached {
        Some(account) => Arc::new(InMemoryProfileCache::with_profile(account)),
        None => Storage::in_memory().profile,
    };
    let notifier = ProfileNotifier::new();

    let services = AppServices::from_parts(
        fixed_clock(),
        profile.clone(),
        courses.clone(),
        cache,
        notifier.clone(),
        Arc::new(CountingCookies::default()),
        Arc::new(CountingDownloads::default()),
        Arc::new(RecordingAnalytics::default()),
    );

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
        },
    );

    ViewHarness {
        dom,
        profile,
        courses,
        notifier,
        built: false,
    }
}
