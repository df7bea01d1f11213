//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! [`crate::ScaffoldConfig`] fields.

pub fn default_tab_name() -> String {
    "Home".to_string()
}

pub fn home_page_path() -> String {
    "/src/programs/system/home/home.html".to_string()
}

pub fn home_fallback_text() -> String {
    "Welcome to openThalis".to_string()
}

pub fn loading_placeholder() -> String {
    "Loading...".to_string()
}

pub fn frame_program_path() -> String {
    "/src/programs/envs/local/local.html".to_string()
}

pub fn tab_width() -> f32 {
    120.0
}

pub fn tab_spacing() -> f32 {
    2.0
}

pub fn bool_true() -> bool {
    true
}
