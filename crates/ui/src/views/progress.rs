use std::sync::Arc;

use dioxus::prelude::*;
use edx_core::model::CourseId;

use crate::context::AppContext;
use crate::views::{ChapterEndDialog, use_watch};
use crate::vm::{ProgressVm, SectionVm, UiMessage, UiState, map_progress};

#[component]
pub fn CourseProgressView(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_hook(|| Arc::new(ctx.course_progress_view_model(course_id.clone())));

    let state = use_watch({
        let vm = Arc::clone(&vm);
        move || vm.subscribe_state()
    });
    let message = use_watch({
        let vm = Arc::clone(&vm);
        move || vm.subscribe_message()
    });

    use_future({
        let vm = Arc::clone(&vm);
        move || {
            let vm = Arc::clone(&vm);
            async move { vm.load_progress().await }
        }
    });

    let progress = state.read().clone().map(|progress| map_progress(&progress));

    let on_refresh = {
        let vm = Arc::clone(&vm);
        move |()| {
            let vm = Arc::clone(&vm);
            spawn(async move { vm.refresh().await });
        }
    };
    let on_dismiss = {
        let vm = Arc::clone(&vm);
        move |()| {
            vm.take_message();
        }
    };

    rsx! {
        ProgressContent {
            course_id: course_id.to_string(),
            state: progress,
            message: message.read().clone(),
            on_refresh,
            on_dismiss,
        }
    }
}

#[component]
pub fn ProgressContent(
    course_id: String,
    state: UiState<ProgressVm>,
    message: Option<UiMessage>,
    on_refresh: EventHandler<()>,
    on_dismiss: EventHandler<()>,
) -> Element {
    let mut finished_section = use_signal(|| None::<String>);

    let banner = message.map(|message| {
        let text = message.text().to_owned();
        rsx! {
            div { class: "banner snackbar", role: "status",
                span { "{text}" }
                button { class: "btn", onclick: move |_| on_dismiss.call(()), "Dismiss" }
            }
        }
    });

    let body = match state {
        UiState::Loading => rsx! { p { class: "muted", "Loading progress..." } },
        UiState::Error => rsx! {
            p { "Something went wrong" }
            button { class: "btn", onclick: move |_| on_refresh.call(()), "Retry" }
        },
        UiState::Data(progress) if progress.sections.is_empty() => rsx! {
            p { class: "muted", "No graded content yet." }
        },
        UiState::Data(progress) => rsx! {
            p { class: "overall", "Course progress: {progress.overall_percent}%" }
            for section in progress.sections {
                SectionCard {
                    key: "{section.name}",
                    section,
                    on_finished: move |name| finished_section.set(Some(name)),
                }
            }
            button { class: "btn", onclick: move |_| on_refresh.call(()), "Refresh" }
        },
    };

    let dialog = finished_section.read().clone().map(|section_name| {
        rsx! {
            ChapterEndDialog {
                section_name,
                on_close: move |()| finished_section.set(None),
            }
        }
    });

    rsx! {
        div { class: "page progress",
            h2 { "Progress" }
            p { class: "muted", "{course_id}" }
            {banner}
            {body}
            {dialog}
        }
    }
}

#[component]
fn SectionCard(section: SectionVm, on_finished: EventHandler<String>) -> Element {
    let name = section.name.clone();
    rsx! {
        section { class: "card section",
            header {
                h3 { "{section.name}" }
                if section.completed {
                    button {
                        class: "badge done",
                        onclick: move |_| on_finished.call(name.clone()),
                        "Completed"
                    }
                }
            }
            ul {
                for subsection in section.subsections {
                    li { class: if subsection.graded { "graded" } else { "ungraded" },
                        span { class: "name", "{subsection.name}" }
                        if !subsection.grade_type.is_empty() {
                            span { class: "muted", " ({subsection.grade_type})" }
                        }
                        if !subsection.score_label.is_empty() {
                            span { class: "score", " {subsection.score_label}" }
                        }
                        span { class: "percent", " {subsection.percentage}" }
                        progress { max: "100", value: "{subsection.completion_percent}" }
                    }
                }
            }
        }
    }
}
