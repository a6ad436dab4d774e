use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use edx_core::model::CourseId;

use crate::context::AppContext;
use crate::views::{CourseProgressView, ProfileView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ProfileView)] Profile {},
        #[route("/progress/:course_id", ProgressPage)] Progress { course_id: CourseId },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn ProgressPage(course_id: CourseId) -> Element {
    rsx! { CourseProgressView { key: "{course_id}", course_id } }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let course = ctx.default_course().cloned();

    rsx! {
        nav { class: "sidebar",
            h1 { "Open edX" }
            ul {
                li { Link { to: Route::Profile {}, "Profile" } }
                if let Some(course_id) = course {
                    li { Link { to: Route::Progress { course_id }, "Progress" } }
                }
            }
        }
    }
}
