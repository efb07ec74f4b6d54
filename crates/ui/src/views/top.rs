use dioxus::prelude::*;
use services::Intent;

use crate::vm::TopVm;

#[component]
pub fn TopView(vm: TopVm, on_intent: EventHandler<Intent>) -> Element {
    let progress_label = vm.progress.label();
    let fill_style = vm.progress.fill_style();

    rsx! {
        section { class: "screen top-screen", id: "top-screen",
            h1 { class: "logo", "Memo Writing" }
            p { class: "tagline", "Pick a prompt and write for one minute." }

            form {
                class: "start-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_intent.call(Intent::Submit);
                },
                label { r#for: "question-number", "Prompt number" }
                input {
                    id: "question-number",
                    r#type: "text",
                    autocomplete: "off",
                    placeholder: "1-108",
                    value: "{vm.input}",
                    oninput: move |evt: FormEvent| on_intent.call(Intent::EditInput(evt.value())),
                }
                button { id: "start-button", class: "btn btn-primary", r#type: "submit", "Start" }
            }
            button {
                id: "random-button",
                class: "btn btn-secondary",
                onclick: move |_| on_intent.call(Intent::StartRandom),
                "Random prompt"
            }
            if let Some(error) = vm.error {
                p { id: "error-message", class: "error-message", "{error}" }
            }

            div { class: "progress-panel",
                div { class: "progress-panel__row",
                    span { "Completed" }
                    span { id: "completed-count", "{progress_label}" }
                    span { id: "progress-percent", "{vm.progress.percent}%" }
                }
                div { class: "progress-bar",
                    div { id: "progress-fill", class: "progress-bar__fill", style: "{fill_style}" }
                }
            }
        }
    }
}
