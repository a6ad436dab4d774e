use dioxus::prelude::*;
use edx_core::model::CourseId;

use super::ChapterEndDialog;
use super::test_harness::{COURSE, Fixture, ViewKind, setup_view_harness};
use crate::resources::EnglishResources;
use crate::vm::test_support::{Outcome, account, sample_progress, wait_until};
use services::ProfileEvent;

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_fetched_account() {
    let mut harness =
        setup_view_harness(ViewKind::Profile, Fixture::account(Outcome::Ok(account("Ada Lovelace"))));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Ada Lovelace"), "missing name in {html}");
    assert!(html.contains("learner@example.com"), "missing email in {html}");
    assert!(html.contains("Sign out"), "missing logout in {html}");
    assert_eq!(harness.profile.account_calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_keeps_cached_account_when_offline() {
    let fixture = Fixture::account(Outcome::NoConnection).with_cached(account("Cached Name"));
    let mut harness = setup_view_harness(ViewKind::Profile, fixture);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Cached Name"), "missing cached name in {html}");
    assert!(
        html.contains(EnglishResources::NO_CONNECTION),
        "missing connectivity banner in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_offers_retry_without_cache() {
    let mut harness = setup_view_harness(ViewKind::Profile, Fixture::account(Outcome::Unknown));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Loading profile"), "missing loading text in {html}");
    assert!(html.contains(EnglishResources::UNKNOWN_ERROR), "missing banner in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_reloads_on_account_updated() {
    let mut harness =
        setup_view_harness(ViewKind::Profile, Fixture::account(Outcome::Ok(account("Before"))));
    harness.settle().await;
    assert_eq!(harness.profile.account_calls(), 1);

    harness.profile.set_account(Outcome::Ok(account("After")));
    harness.notifier.send(ProfileEvent::AccountUpdated);

    let profile = harness.profile.clone();
    assert!(wait_until(|| profile.account_calls() == 2).await);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("After"), "missing refreshed name in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_sections() {
    let course = CourseId::new(COURSE).unwrap();
    let mut harness = setup_view_harness(
        ViewKind::Progress(course),
        Fixture::progress(Outcome::Ok(sample_progress())),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Course progress: 50%"), "missing overall in {html}");
    assert!(html.contains("Week 1"), "missing section in {html}");
    assert!(html.contains("Homework 1"), "missing subsection in {html}");
    assert!(html.contains("2 / 2"), "missing score in {html}");
    assert!(html.contains("Completed"), "missing badge in {html}");
    assert_eq!(harness.courses.calls(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_error_state() {
    let course = CourseId::new(COURSE).unwrap();
    let mut harness =
        setup_view_harness(ViewKind::Progress(course), Fixture::progress(Outcome::NoConnection));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains(EnglishResources::NO_CONNECTION), "missing banner in {html}");
}

#[component]
fn DialogHarness() -> Element {
    rsx! {
        ChapterEndDialog {
            section_name: "Week 1".to_string(),
            on_close: |()| {},
        }
    }
}

#[test]
fn chapter_end_dialog_smoke_renders_section_name() {
    let mut dom = VirtualDom::new(DialogHarness);
    dom.rebuild_in_place();

    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("Week 1"), "missing section in {html}");
    assert!(html.contains("Back to outline"), "missing close button in {html}");
}
