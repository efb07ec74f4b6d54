use dioxus::document::eval;
use dioxus::prelude::*;
use services::{Intent, NavigationSnapshot, Screen, intent_channel};

use crate::context::AppContext;
use crate::platform::FOCUS_ID_INPUT_SCRIPT;
use crate::views::{QuestionView, TopView};
use crate::vm::{QuestionVm, TopVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Lets tests push intents into the loop the view spawned.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MemoTestHandles {
    sender: Rc<RefCell<Option<services::IntentSender>>>,
    focus_requests: Rc<RefCell<usize>>,
}

#[cfg(test)]
impl MemoTestHandles {
    fn attach(&self, sender: services::IntentSender) {
        *self.sender.borrow_mut() = Some(sender);
    }

    fn record_focus(&self) {
        *self.focus_requests.borrow_mut() += 1;
    }

    pub(crate) fn focus_requests(&self) -> usize {
        *self.focus_requests.borrow()
    }

    pub(crate) fn send(&self, intent: Intent) {
        if let Some(sender) = self.sender.borrow().as_ref() {
            let _ = sender.send(intent);
        }
    }
}

/// Root screen switcher. Owns the session loop for this window and renders
/// whatever snapshot it last published.
#[component]
pub fn MemoView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut snapshot = use_signal(|| None::<NavigationSnapshot>);

    let intents = use_hook(|| {
        let (sender, receiver) = intent_channel();
        let session = ctx.session_loop();
        spawn(async move {
            let _ = session
                .run(receiver, move |next| snapshot.set(Some(next)))
                .await;
        });
        #[cfg(test)]
        if let Some(handles) = try_consume_context::<MemoTestHandles>() {
            handles.attach(sender.clone());
        }
        sender
    });

    #[cfg(test)]
    let test_handles = use_hook(try_consume_context::<MemoTestHandles>);

    let dispatch = use_callback(move |intent: Intent| {
        if intents.send(intent).is_err() {
            tracing::warn!("session loop is gone, intent dropped");
        }
    });

    use_effect(move || {
        let has_error = snapshot
            .read()
            .as_ref()
            .is_some_and(|snap| snap.error.is_some());
        if has_error {
            let _ = eval(FOCUS_ID_INPUT_SCRIPT);
            #[cfg(test)]
            if let Some(handles) = &test_handles {
                handles.record_focus();
            }
        }
    });

    let current = snapshot.read().clone();
    let Some(snap) = current else {
        return rsx! {
            div { class: "page loading", p { "Loading..." } }
        };
    };

    rsx! {
        div { class: "page memo-page",
            match snap.screen {
                Screen::Top => rsx! {
                    TopView { vm: TopVm::from_snapshot(&snap), on_intent: dispatch }
                },
                Screen::Question => match QuestionVm::from_snapshot(&snap) {
                    Some(vm) => rsx! {
                        QuestionView { vm, on_intent: dispatch }
                    },
                    None => rsx! {
                        p { class: "error-message", "Prompt not found" }
                    },
                },
            }
            footer { class: "address-bar",
                span { class: "address-bar__label", "Address" }
                code { id: "current-address", "{snap.location}" }
            }
        }
    }
}
