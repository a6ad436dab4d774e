use dioxus::prelude::*;

/// Shown when every subsection of a section has been fully earned.
#[component]
pub fn ChapterEndDialog(section_name: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog", role: "dialog",
                h3 { "Section complete" }
                p { "You finished every assignment in {section_name}." }
                button {
                    class: "btn primary",
                    onclick: move |_| on_close.call(()),
                    "Back to outline"
                }
            }
        }
    }
}
