//! Tests for the workspace layer
//!
//! Default-tab content loading (including the close-during-fetch race),
//! program message routing, replay scripts, and the serialized snapshot.

mod common;

use common::{
    HOME_MARKUP, RecordingSource, active, assert_workspace_invariants, bare_workspace,
    home_source, names, offline_workspace, open_all, test_config, x_for_slot,
};
use serde_json::json;
use std::sync::Arc;
use thalis_scaffold::Workspace;
use thalis_scaffold::frame_program::{FrameId, frame_markup, scan_iframe_src};
use thalis_scaffold::replay::{self, ReplayStep};
use thalis_scaffold::tab::ContainerTag::{Center, Right};

fn open_tab_message(title: Option<&str>, src: Option<&str>) -> String {
    json!({
        "__thalis__": true,
        "type": "open-tab",
        "detail": { "title": title, "src": src },
    })
    .to_string()
}

fn title_message(title: &str) -> String {
    json!({ "__thalis__": true, "type": "update-tab-title", "title": title }).to_string()
}

// ============================================================================
// Default Tabs
// ============================================================================

#[tokio::test]
async fn test_initialize_creates_one_default_per_container() {
    let mut ws = bare_workspace();
    ws.initialize().await;

    assert_eq!(names(&ws, Center), vec!["Home"]);
    assert_eq!(names(&ws, Right), vec!["Home (2)"]);
    for (tag, name) in [(Center, "Home"), (Right, "Home (2)")] {
        let manager = ws.container(tag).unwrap();
        assert_eq!(manager.tab(name).unwrap().content, HOME_MARKUP);
        assert_eq!(manager.visible_tabs(), vec![name]);
        assert_eq!(manager.pending_default(), None);
    }
    assert_workspace_invariants(&ws);
}

#[tokio::test]
async fn test_failed_fetch_shows_fallback_text() {
    let mut ws = offline_workspace();
    ws.initialize().await;

    let center = ws.container(Center).unwrap();
    assert_eq!(center.tab("Home").unwrap().content, "Welcome to openThalis");
    assert_eq!(
        center.content_element("Home").unwrap().markup,
        "Welcome to openThalis"
    );
}

#[tokio::test]
async fn test_close_during_fetch_drops_late_content() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Right, &["Only"]);
    ws.close_tab(Right, "Only").unwrap();

    let pending = ws.take_pending_defaults();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].tab_name, "Home");

    // User opens something else and closes the placeholder mid-fetch
    open_all(&mut ws, Right, &["Other"]);
    ws.close_tab(Right, "Home").unwrap();

    let source = home_source();
    let fallback = ws.config().home_fallback_text.clone();
    let mut applied = Vec::new();
    for request in pending {
        let resolved = request.fetch(&source, &fallback).await;
        applied.push(ws.apply_default(resolved).await);
    }

    assert_eq!(applied, vec![false]);
    assert_eq!(names(&ws, Right), vec!["Other"]);
    assert_workspace_invariants(&ws);
}

#[tokio::test]
async fn test_late_default_content_spares_reopened_name() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Right, &["Only"]);
    ws.close_tab(Right, "Only").unwrap();
    let pending = ws.take_pending_defaults();
    assert_eq!(pending.len(), 1);

    // Placeholder closed mid-fetch, then a user tab reuses its name
    open_all(&mut ws, Right, &["Other"]);
    ws.close_tab(Right, "Home").unwrap();
    let reopened = ws
        .container_mut(Right)
        .unwrap()
        .open_tab("Home", "<p>my notes</p>");
    assert_eq!(reopened, "Home");

    let source = home_source();
    let fallback = ws.config().home_fallback_text.clone();
    for request in pending {
        let resolved = request.fetch(&source, &fallback).await;
        assert!(!ws.apply_default(resolved).await);
    }

    let right = ws.container(Right).unwrap();
    assert_eq!(names(&ws, Right), vec!["Other", "Home"]);
    assert_eq!(right.tab("Home").unwrap().content, "<p>my notes</p>");
    assert_eq!(right.content_element("Home").unwrap().markup, "<p>my notes</p>");
    assert_workspace_invariants(&ws);
}

#[tokio::test]
async fn test_in_flight_default_follows_moved_tab() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["Work"]);
    open_all(&mut ws, Right, &["Only"]);
    ws.close_tab(Right, "Only").unwrap();
    let pending = ws.take_pending_defaults();

    ws.drag_tab(Right, "Home", Center, x_for_slot(0)).unwrap();

    let source = home_source();
    let fallback = ws.config().home_fallback_text.clone();
    for request in pending {
        let resolved = request.fetch(&source, &fallback).await;
        assert!(ws.apply_default(resolved).await);
    }
    assert_eq!(
        ws.container(Center).unwrap().tab("Home").unwrap().content,
        HOME_MARKUP
    );
    assert_workspace_invariants(&ws);
}

#[tokio::test]
async fn test_pending_default_follows_moved_tab() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["Work"]);
    open_all(&mut ws, Right, &["Only"]);
    ws.close_tab(Right, "Only").unwrap();

    ws.drag_tab(Right, "Home", Center, x_for_slot(0)).unwrap();
    assert_eq!(ws.container(Center).unwrap().pending_default(), Some("Home"));

    ws.settle().await;
    assert_eq!(names(&ws, Center), vec!["Home", "Work"]);
    assert_eq!(
        ws.container(Center).unwrap().tab("Home").unwrap().content,
        HOME_MARKUP
    );
    // The emptied right container got its own default
    assert_eq!(names(&ws, Right), vec!["Home (2)"]);
    assert_eq!(
        ws.container(Right).unwrap().tab("Home (2)").unwrap().content,
        HOME_MARKUP
    );
    assert_workspace_invariants(&ws);
}

#[tokio::test]
async fn test_home_initializer_runs_on_default_content() {
    let source = Arc::new(RecordingSource {
        inner: home_source(),
        ..RecordingSource::default()
    });
    let mut ws = Workspace::new(test_config(), source.clone());
    ws.initialize().await;

    assert_eq!(
        *source.initialized.lock(),
        vec![HOME_MARKUP.to_string(), HOME_MARKUP.to_string()]
    );
}

#[tokio::test]
async fn test_failing_initializer_keeps_content() {
    let source = Arc::new(RecordingSource {
        inner: home_source(),
        fail_initializer: true,
        ..RecordingSource::default()
    });
    let mut ws = Workspace::new(test_config(), source.clone());
    ws.initialize().await;

    assert_eq!(
        ws.container(Center).unwrap().tab("Home").unwrap().content,
        HOME_MARKUP
    );
    assert_eq!(source.initialized.lock().len(), 2);
    assert_workspace_invariants(&ws);
}

// ============================================================================
// Program Messages: open-tab
// ============================================================================

#[test]
fn test_open_tab_defaults_to_center() {
    let mut ws = bare_workspace();
    let opened = ws.handle_program_message(
        None,
        &open_tab_message(Some("Docs"), Some("/apps/docs.html")),
    );

    assert_eq!(opened, Some((Center, "Docs".to_string())));
    let tab = ws.container(Center).unwrap().tab("Docs").unwrap();
    assert_eq!(
        scan_iframe_src(&tab.content).as_deref(),
        Some("/apps/docs.html")
    );
    assert_eq!(active(&ws, Center).as_deref(), Some("Docs"));
}

#[test]
fn test_open_tab_goes_right_when_right_was_last_selected() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["A"]);
    open_all(&mut ws, Right, &["B"]);

    let opened = ws.handle_program_message(None, &open_tab_message(None, Some("/apps/x.html")));
    assert_eq!(opened, Some((Right, "Tab".to_string())));
    assert_eq!(names(&ws, Right), vec!["B", "Tab"]);
}

#[test]
fn test_open_tab_skips_hidden_right_container() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Right, &["B"]);
    ws.set_right_visible(false);

    let opened = ws.handle_program_message(None, &open_tab_message(Some("Viewer"), Some("/v.html")));
    assert_eq!(opened, Some((Center, "Viewer".to_string())));
}

#[test]
fn test_open_tab_without_src_is_ignored() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["A"]);

    assert_eq!(ws.handle_program_message(None, &open_tab_message(Some("X"), None)), None);
    assert_eq!(ws.handle_program_message(None, &open_tab_message(Some("X"), Some(""))), None);
    assert_eq!(names(&ws, Center), vec!["A"]);
}

#[test]
fn test_unmarked_messages_are_ignored() {
    let mut ws = bare_workspace();
    let raw = json!({ "type": "open-tab", "detail": { "src": "/a.html" } }).to_string();

    assert_eq!(ws.handle_program_message(None, &raw), None);
    assert_eq!(ws.handle_program_message(None, "not json"), None);
    assert!(names(&ws, Center).is_empty());
}

// ============================================================================
// Program Messages: update-tab-title
// ============================================================================

fn open_frame(ws: &mut Workspace, tag: thalis_scaffold::ContainerTag, title: &str) -> FrameId {
    ws.open_tab(tag, title, &frame_markup("/apps/files.html")).unwrap();
    ws.container(tag)
        .unwrap()
        .content_element(title)
        .and_then(|element| element.frame())
        .map(|host| host.frame_id)
        .unwrap()
}

#[test]
fn test_title_update_renames_the_sender_tab() {
    let mut ws = bare_workspace();
    let frame = open_frame(&mut ws, Right, "Files");
    open_all(&mut ws, Center, &["Focused"]);

    let renamed = ws.handle_program_message(Some(frame), &title_message("Downloads"));
    assert_eq!(renamed, Some((Right, "Downloads".to_string())));
    assert_eq!(names(&ws, Right), vec!["Downloads"]);
    assert_eq!(active(&ws, Right).as_deref(), Some("Downloads"));
    assert_eq!(names(&ws, Center), vec!["Focused"]);
    assert_workspace_invariants(&ws);
}

#[test]
fn test_title_update_collision_gets_suffix() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["docs"]);
    let frame = open_frame(&mut ws, Center, "Files");

    let renamed = ws.handle_program_message(Some(frame), &title_message("docs"));
    assert_eq!(renamed, Some((Center, "docs (2)".to_string())));
    assert_eq!(names(&ws, Center), vec!["docs", "docs (2)"]);
    assert!(!ws.context().namespace.lock().is_used("Files"));
    assert_workspace_invariants(&ws);
}

#[test]
fn test_title_update_from_unknown_frame_does_nothing() {
    let mut ws = bare_workspace();
    open_frame(&mut ws, Center, "Files");

    assert_eq!(
        ws.handle_program_message(Some(FrameId::new()), &title_message("Elsewhere")),
        None
    );
    assert_eq!(names(&ws, Center), vec!["Files"]);
}

#[test]
fn test_title_update_without_sender_renames_focused_tab() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["A", "B"]);
    open_all(&mut ws, Right, &["R"]);
    ws.set_active_tab(Center, "A").unwrap();

    let renamed = ws.handle_program_message(None, &title_message("Renamed"));
    assert_eq!(renamed, Some((Center, "Renamed".to_string())));
    assert_eq!(names(&ws, Center), vec!["Renamed", "B"]);
}

#[test]
fn test_blank_title_is_ignored() {
    let mut ws = bare_workspace();
    open_all(&mut ws, Center, &["A"]);
    assert_eq!(ws.handle_program_message(None, &title_message("   ")), None);
    assert_eq!(names(&ws, Center), vec!["A"]);
}

// ============================================================================
// Replay
// ============================================================================

#[tokio::test]
async fn test_replay_script_runs_and_skips_bad_steps() {
    let steps: Vec<ReplayStep> = serde_json::from_value(json!([
        { "op": "open_tab", "container": "center", "title": "Chats" },
        { "op": "open_tab", "container": "center", "title": "Tasks" },
        { "op": "open_tab", "container": "right", "title": "Settings" },
        { "op": "close_tab", "container": "right", "name": "Missing" },
        { "op": "drag", "from": "center", "name": "Chats", "to": "right", "x": 10.0 },
        { "op": "context", "container": "right", "name": "Settings", "action": "toggle_pin" }
    ]))
    .unwrap();

    let mut ws = bare_workspace();
    replay::run(&mut ws, &steps).await;

    assert_eq!(names(&ws, Center), vec!["Tasks"]);
    assert_eq!(names(&ws, Right), vec!["Chats", "Settings"]);
    assert!(ws.container(Right).unwrap().tab("Settings").unwrap().pinned);
    assert_workspace_invariants(&ws);
}

#[tokio::test]
async fn test_replay_script_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.json");
    std::fs::write(
        &path,
        r#"[{ "op": "open_tab", "container": "center", "title": "A", "content": "<p>a</p>" }]"#,
    )
    .unwrap();

    let steps = replay::load_script(&path).unwrap();
    assert_eq!(steps.len(), 1);

    std::fs::write(&path, "[{ \"op\": \"explode\" }]").unwrap();
    assert!(replay::load_script(&path).is_err());
}

// ============================================================================
// Snapshot
// ============================================================================

#[tokio::test]
async fn test_snapshot_serializes_both_containers() {
    let mut ws = bare_workspace();
    ws.initialize().await;
    open_all(&mut ws, Center, &["Notes"]);

    let value = serde_json::to_value(ws.snapshot()).unwrap();
    assert_eq!(value["containers"][0]["component"], "center");
    assert_eq!(value["containers"][0]["active_tab"], "Notes");
    assert_eq!(value["containers"][0]["tabs"][1]["name"], "Notes");
    assert_eq!(value["containers"][0]["tabs"][1]["visible"], true);
    assert_eq!(value["containers"][1]["component"], "right");
    assert_eq!(value["used_names"], json!(["Home", "Home (2)", "Notes"]));
    assert_eq!(value["last_selected"], "center");
    assert_eq!(value["right_visible"], true);
}
