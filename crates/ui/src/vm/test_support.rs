//! Hand-written collaborators for view-model and view tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use edx_core::model::{
    Account, AccountDraft, AccountPrivacy, CourseId, CourseProgress, Score, Section, Subsection,
    Username,
};
use services::error::StatusCode;
use services::{
    CookieManager, CourseInteractor, DownloadWorkerController, ProfileAnalytics,
    ProfileInteractor, ProfileServiceError,
};

/// How a fake remote call should resolve.
#[derive(Clone, Debug)]
pub enum Outcome<T> {
    Ok(T),
    NoConnection,
    Unknown,
}

impl<T: Clone> Outcome<T> {
    fn resolve(&self) -> Result<T, ProfileServiceError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::NoConnection => Err(ProfileServiceError::NoConnection(
                "failed to lookup address information".into(),
            )),
            Self::Unknown => Err(ProfileServiceError::HttpStatus(
                StatusCode::INTERNAL_SERVER_ERROR,
            )),
        }
    }
}

pub fn account(name: &str) -> Account {
    AccountDraft {
        name: name.to_owned(),
        email: Some("learner@example.com".into()),
        year_of_birth: Some(1990),
        account_privacy: AccountPrivacy::AllUsers,
        ..AccountDraft::new(Username::new("learner").expect("username"))
    }
    .validate()
    .expect("valid account")
}

/// One fully earned, graded homework in "Week 1"; overall progress 50%.
pub fn sample_progress() -> CourseProgress {
    CourseProgress {
        sections: vec![Section {
            display_name: "Week 1".into(),
            subsections: vec![Subsection {
                earned: 2.0,
                total: 2.0,
                percentage_string: "100%".into(),
                display_name: "Homework 1".into(),
                score: vec![Score {
                    earned: 2.0,
                    possible: 2.0,
                }],
                show_grades: true,
                graded: true,
                grade_type: "Homework".into(),
            }],
        }],
        progress: 50,
    }
}

pub struct FakeProfileInteractor {
    account: Mutex<Outcome<Account>>,
    logout: Mutex<Outcome<()>>,
    account_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl FakeProfileInteractor {
    pub fn new(account: Outcome<Account>, logout: Outcome<()>) -> Self {
        Self {
            account: Mutex::new(account),
            logout: Mutex::new(logout),
            account_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_account(&self, outcome: Outcome<Account>) {
        *self.account.lock().expect("lock") = outcome;
    }

    pub fn set_logout(&self, outcome: Outcome<()>) {
        *self.logout.lock().expect("lock") = outcome;
    }

    pub fn account_calls(&self) -> usize {
        self.account_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileInteractor for FakeProfileInteractor {
    async fn get_account(&self) -> Result<Account, ProfileServiceError> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.account.lock().expect("lock").clone();
        outcome.resolve()
    }

    async fn logout(&self) -> Result<(), ProfileServiceError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.logout.lock().expect("lock").clone();
        outcome.resolve()
    }
}

pub struct FakeCourseInteractor {
    progress: Mutex<Outcome<CourseProgress>>,
    calls: AtomicUsize,
}

impl FakeCourseInteractor {
    pub fn new(progress: Outcome<CourseProgress>) -> Self {
        Self {
            progress: Mutex::new(progress),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_progress(&self, outcome: Outcome<CourseProgress>) {
        *self.progress.lock().expect("lock") = outcome;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseInteractor for FakeCourseInteractor {
    async fn get_course_progress(
        &self,
        _course_id: &CourseId,
    ) -> Result<CourseProgress, ProfileServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.progress.lock().expect("lock").clone();
        outcome.resolve()
    }
}

#[derive(Default)]
pub struct CountingCookies {
    clears: AtomicUsize,
}

impl CountingCookies {
    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CookieManager for CountingCookies {
    fn clear_web_view_cookie(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct CountingDownloads {
    cancels: AtomicUsize,
}

impl CountingDownloads {
    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DownloadWorkerController for CountingDownloads {
    async fn cancel_work(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    logouts: Mutex<Vec<bool>>,
}

impl RecordingAnalytics {
    pub fn logouts(&self) -> Vec<bool> {
        self.logouts.lock().expect("lock").clone()
    }
}

impl ProfileAnalytics for RecordingAnalytics {
    fn logout_event(&self, force: bool) {
        self.logouts.lock().expect("lock").push(force);
    }
}

/// Poll `condition` until it holds or a second has passed.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .is_ok()
}
