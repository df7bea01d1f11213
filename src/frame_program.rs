//! Iframe-hosted sub-programs (e.g. the local file browser).
//!
//! A live frame cannot be re-parented without losing its document state, so a
//! frame tab moving between containers is destroyed and recreated from a URL
//! that encodes the program's current navigation state (`?path=<cwd>`).

use parking_lot::Mutex;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};
use url::Url;
use uuid::Uuid;

/// Origin used to resolve the root-relative frame URLs the shell works with
const URL_BASE: &str = "http://scaffold.invalid/";

/// Query parameter carrying the file browser's working directory
pub const PATH_PARAM: &str = "path";

/// Identifies one frame browsing context (the sender of program messages)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(Uuid);

impl FrameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0.simple())
    }
}

/// In-memory navigation state a frame program exposes on its window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameNavState {
    pub cwd: Option<String>,
}

pub type SharedFrameState = Arc<Mutex<FrameNavState>>;

/// A mounted frame: where it points and (optionally) its live state.
#[derive(Debug, Clone)]
pub struct FrameHost {
    pub frame_id: FrameId,
    pub src: String,
    /// Set by the program once its window has loaded
    pub live_state: Option<SharedFrameState>,
}

impl FrameHost {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            frame_id: FrameId::new(),
            src: src.into(),
            live_state: None,
        }
    }

    /// Attach the program's live state object and return a handle to it
    pub fn expose_state(&mut self) -> SharedFrameState {
        Arc::clone(
            self.live_state
                .get_or_insert_with(|| Arc::new(Mutex::new(FrameNavState::default()))),
        )
    }

    /// Current working directory of the program.
    ///
    /// Prefers the live state (fresher than the URL, which only reflects the
    /// directory the frame was opened at) and falls back to the `path` query
    /// parameter of `src`.
    pub fn current_path(&self) -> Option<String> {
        if let Some(state) = &self.live_state
            && let Some(cwd) = state.lock().cwd.clone()
        {
            return Some(cwd);
        }
        path_param(&self.src)
    }

    pub fn is_program(&self, program_path: &str) -> bool {
        is_program_src(&self.src, program_path)
    }
}

fn resolve(src: &str) -> Option<Url> {
    let base = Url::parse(URL_BASE).ok()?;
    base.join(src).ok()
}

/// Extract the `path` query parameter from a (possibly root-relative) URL
pub fn path_param(src: &str) -> Option<String> {
    let url = resolve(src)?;
    url.query_pairs()
        .find(|(key, _)| key == PATH_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Whether `src` loads the program whose shell page is `program_path`
pub fn is_program_src(src: &str, program_path: &str) -> bool {
    let (Some(url), Some(program)) = (resolve(src), resolve(program_path)) else {
        return false;
    };
    let file_name = program.path().rsplit('/').next().unwrap_or_default();
    url.path() == program.path() || (!file_name.is_empty() && url.path().ends_with(file_name))
}

/// Build the program URL for a given working directory
pub fn program_url(program_path: &str, cwd: Option<&str>) -> String {
    let Some(mut url) = resolve(program_path) else {
        return program_path.to_string();
    };
    url.set_query(None);
    if let Some(cwd) = cwd {
        url.query_pairs_mut().append_pair(PATH_PARAM, cwd);
    }
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Wrapper markup hosting `src` in a full-size frame
pub fn frame_markup(src: &str) -> String {
    format!(
        concat!(
            r#"<div class="program-iframe-wrapper" style="width:100%;height:100%;">"#,
            r#"<iframe src="{}" style="width:100%;height:100%;border:0;display:block;"></iframe>"#,
            "</div>"
        ),
        escape_attr(src)
    )
}

/// Fresh markup for a moved frame program, preserving its navigation state
pub fn rebuild_markup(host: &FrameHost, program_path: &str) -> String {
    let cwd = host.current_path();
    frame_markup(&program_url(program_path, cwd.as_deref()))
}

/// Find the `src` of the first `<iframe>` in a markup string
pub fn scan_iframe_src(markup: &str) -> Option<String> {
    static IFRAME_SRC: OnceLock<Option<Regex>> = OnceLock::new();
    let re = IFRAME_SRC
        .get_or_init(|| Regex::new(r#"(?is)<iframe\b[^>]*?\bsrc\s*=\s*["']([^"']*)["']"#).ok())
        .as_ref()?;
    re.captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape_attr(m.as_str()))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
