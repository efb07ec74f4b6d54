use services::Intent;

use super::test_harness::setup_view_harness;

#[tokio::test(flavor = "current_thread")]
async fn top_view_smoke_renders_form_and_progress() {
    let harness = setup_view_harness("https://memo.local/").await;
    let html = harness.render();
    assert!(html.contains("Prompt number"), "missing label in {html}");
    assert!(html.contains("Random prompt"), "missing random button in {html}");
    assert!(html.contains("0 / 108"), "missing progress in {html}");
    assert!(!html.contains("error-message"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn deep_link_smoke_renders_preview() {
    let harness = setup_view_harness("https://memo.local/?q=42").await;
    let html = harness.render();
    assert!(html.contains("Prompt 42"), "missing prompt in {html}");
    assert!(html.contains("Press Start to begin"), "missing status in {html}");
    assert!(!html.contains("Next prompt"), "preview shows next label in {html}");
    assert!(
        html.contains("stroke-dashoffset: 0.000;"),
        "ring not full in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn submit_smoke_opens_prompt_and_records_progress() {
    let mut harness = setup_view_harness("https://memo.local/").await;
    harness.send(Intent::EditInput("7".to_string())).await;
    harness.send(Intent::Submit).await;

    let html = harness.render();
    assert!(html.contains("Prompt 7"), "missing prompt in {html}");
    assert!(html.contains("Next prompt"), "missing next label in {html}");
    let summary = harness.services.progress().summary().await;
    assert_eq!(summary.completed, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_input_smoke_shows_error() {
    let mut harness = setup_view_harness("https://memo.local/").await;
    harness.send(Intent::EditInput("0".to_string())).await;
    harness.send(Intent::Submit).await;

    let html = harness.render();
    assert!(
        html.contains("Enter a prompt number from 1 to 108"),
        "missing error in {html}"
    );
    assert!(html.contains("Prompt number"), "left top screen in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn validation_error_refocuses_id_field() {
    let mut harness = setup_view_harness("https://memo.local/").await;
    assert_eq!(harness.handles.focus_requests(), 0);

    harness.send(Intent::EditInput("abc".to_string())).await;
    harness.send(Intent::Submit).await;
    harness.settle().await;
    assert!(harness.handles.focus_requests() >= 1);

    let before = harness.handles.focus_requests();
    harness.send(Intent::EditInput("5".to_string())).await;
    harness.send(Intent::Submit).await;
    harness.settle().await;
    assert_eq!(harness.handles.focus_requests(), before);
    assert!(harness.render().contains("Prompt 5"));
}

#[tokio::test(flavor = "current_thread")]
async fn share_smoke_copies_link_and_flashes() {
    let mut harness = setup_view_harness("https://memo.local/").await;
    harness.send(Intent::EditInput("3".to_string())).await;
    harness.send(Intent::Submit).await;
    harness.send(Intent::Share).await;

    let html = harness.render();
    assert!(html.contains("Link copied!"), "missing copied status in {html}");
    assert_eq!(
        *harness.clipboard.writes.lock().unwrap(),
        vec!["https://memo.local/?q=3".to_string()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn logo_smoke_returns_to_top() {
    let mut harness = setup_view_harness("https://memo.local/?q=9").await;
    harness.send(Intent::GoToTop).await;

    let html = harness.render();
    assert!(html.contains("Prompt number"), "missing top screen in {html}");
    assert!(!html.contains("Prompt 9"), "prompt still shown in {html}");
}
