use dioxus::prelude::*;
use services::Intent;

use crate::vm::{QuestionVm, RING_RADIUS};

#[component]
pub fn QuestionView(vm: QuestionVm, on_intent: EventHandler<Intent>) -> Element {
    let ring_style = vm.ring_style();

    rsx! {
        section { class: "screen question-screen", id: "question-screen",
            header { class: "question-header",
                button {
                    id: "logo-button",
                    class: "logo-button",
                    onclick: move |_| on_intent.call(Intent::GoToTop),
                    "Memo Writing"
                }
            }

            div { class: "question-card",
                div { class: "question-meta",
                    span { class: "question-number", "#{vm.number}" }
                    span { id: "current-category", class: "question-category", "{vm.category}" }
                }
                p { id: "current-question", class: "question-text", "{vm.text}" }
            }

            div { class: "timer",
                svg { class: "timer-ring", view_box: "0 0 120 120", width: "120", height: "120",
                    circle { class: "timer-track", cx: "60", cy: "60", r: "{RING_RADIUS}" }
                    circle {
                        id: "timer-progress",
                        class: "{vm.ring_class}",
                        cx: "60",
                        cy: "60",
                        r: "{RING_RADIUS}",
                        style: "{ring_style}",
                    }
                }
                span { id: "timer-value", class: "timer-value", "{vm.seconds}" }
            }
            p { id: "timer-status", class: "{vm.status_class}", "{vm.status}" }

            if let Some(url) = vm.share_failure.clone() {
                div { class: "share-fallback",
                    p { "Copy this link manually:" }
                    input { id: "share-url", readonly: true, value: "{url}" }
                }
            }

            div { class: "question-actions",
                button {
                    id: "share-button",
                    class: "btn btn-secondary",
                    onclick: move |_| on_intent.call(Intent::Share),
                    "Share"
                }
                button {
                    id: "next-button",
                    class: "btn btn-primary",
                    onclick: move |_| on_intent.call(Intent::Next),
                    "{vm.next_label}"
                }
            }
        }
    }
}
