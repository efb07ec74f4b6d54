use std::future;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::navigation::{FlashToken, NavigationController, NavigationSnapshot};
use crate::share_service::{COPIED_FLASH, CopyOutcome, ShareLink};
use crate::ticker::TickReceiver;

/// User actions fed into a running [`SessionLoop`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    EditInput(String),
    /// Start the prompt typed into the id field.
    Submit,
    StartRandom,
    /// Next prompt, or start the previewed one.
    Next,
    GoToTop,
    /// Copy the deep link for the open prompt.
    Share,
}

pub type IntentSender = mpsc::UnboundedSender<Intent>;
pub type IntentReceiver = mpsc::UnboundedReceiver<Intent>;

#[must_use]
pub fn intent_channel() -> (IntentSender, IntentReceiver) {
    mpsc::unbounded_channel()
}

/// Serialises intents, timer ticks and flash expiry onto one controller.
pub struct SessionLoop {
    controller: NavigationController,
    ticks: TickReceiver,
    share: ShareLink,
}

impl SessionLoop {
    #[must_use]
    pub fn new(controller: NavigationController, ticks: TickReceiver, share: ShareLink) -> Self {
        Self {
            controller,
            ticks,
            share,
        }
    }

    /// Runs until the intent sender is dropped, publishing a snapshot after
    /// every state change. Returns the controller for inspection.
    pub async fn run<F>(self, mut intents: IntentReceiver, mut publish: F) -> NavigationController
    where
        F: FnMut(NavigationSnapshot),
    {
        let Self {
            mut controller,
            mut ticks,
            share,
        } = self;

        controller.load().await;
        publish(controller.snapshot());

        let mut flash: Option<(Instant, FlashToken)> = None;
        loop {
            tokio::select! {
                intent = intents.recv() => {
                    let Some(intent) = intent else { break };
                    if let Some(token) = apply(&mut controller, &share, intent).await {
                        flash = Some((Instant::now() + COPIED_FLASH, token));
                    }
                }
                Some(run) = ticks.recv() => {
                    controller.on_tick(run);
                }
                () = flash_expiry(flash) => {
                    if let Some((_, token)) = flash.take() {
                        controller.expire_flash(token);
                    }
                }
            }
            publish(controller.snapshot());
        }

        tracing::debug!("session loop stopped");
        controller
    }
}

async fn apply(
    controller: &mut NavigationController,
    share: &ShareLink,
    intent: Intent,
) -> Option<FlashToken> {
    let result = match intent {
        Intent::EditInput(text) => {
            controller.set_input(text);
            Ok(())
        }
        Intent::Submit => controller.submit_input().await.map(drop),
        Intent::StartRandom => controller.start_random().await.map(drop),
        Intent::Next => controller.next().await.map(drop),
        Intent::GoToTop => {
            controller.go_to_top();
            Ok(())
        }
        Intent::Share => {
            let url = controller.share_url()?;
            return match share.copy(&url).await {
                CopyOutcome::Copied(method) => {
                    tracing::debug!(?method, %url, "share link copied");
                    Some(controller.show_link_copied())
                }
                CopyOutcome::Failed { url } => {
                    controller.show_share_failure(url);
                    None
                }
            };
        }
    };
    if let Err(err) = result {
        tracing::debug!(error = %err, "intent rejected");
    }
    None
}

async fn flash_expiry(flash: Option<(Instant, FlashToken)>) {
    match flash {
        Some((deadline, _)) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}
