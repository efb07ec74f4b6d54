use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use memo_core::model::{Prompt, PromptCatalog, PromptId};
use memo_core::time::fixed_clock;
use services::{AppServices, AudioBackend, ClipboardError, ClipboardWriter, Intent, SilentAudio};
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::platform::ClipboardRef;
use crate::views::MemoView;
use crate::views::memo::MemoTestHandles;

#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: Mutex<Vec<String>>,
}

#[async_trait(?Send)]
impl ClipboardWriter for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

struct TestApp {
    services: AppServices,
    location: Url,
    clipboard: Arc<RecordingClipboard>,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn start_location(&self) -> Url {
        self.location.clone()
    }

    fn audio(&self) -> Arc<dyn AudioBackend> {
        Arc::new(SilentAudio)
    }

    fn clipboard(&self) -> ClipboardRef {
        self.clipboard.clone()
    }

    fn fallback_clipboard(&self) -> ClipboardRef {
        self.clipboard.clone()
    }
}

#[derive(Props, Clone)]
struct MemoHarnessProps {
    app: Arc<TestApp>,
    handles: MemoTestHandles,
}

impl PartialEq for MemoHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn MemoHarness(props: MemoHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { MemoView {} }
}

pub fn test_catalog() -> PromptCatalog {
    let prompts = (1..=108)
        .map(|raw| {
            Prompt::new(
                PromptId::new(raw).unwrap(),
                format!("Theme {}", raw % 6),
                format!("Prompt {raw}"),
            )
        })
        .collect();
    PromptCatalog::new(prompts).unwrap()
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub clipboard: Arc<RecordingClipboard>,
    pub handles: MemoTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Lets the session loop pick up queued intents and publish.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub async fn send(&mut self, intent: Intent) {
        self.handles.send(intent);
        self.settle().await;
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

pub async fn setup_view_harness(location: &str) -> ViewHarness {
    let services = AppServices::in_memory(test_catalog(), fixed_clock());
    let clipboard = Arc::new(RecordingClipboard::default());
    let handles = MemoTestHandles::default();

    let app = Arc::new(TestApp {
        services: services.clone(),
        location: Url::parse(location).unwrap(),
        clipboard: Arc::clone(&clipboard),
    });
    let dom = VirtualDom::new_with_props(
        MemoHarness,
        MemoHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness {
        dom,
        services,
        clipboard,
        handles,
    };
    harness.rebuild();
    harness.settle().await;
    harness
}
