//! Output formatting for council entities

pub mod console;
pub mod formatter;
pub mod json;

/// Turn colored output off for the whole process
pub fn set_color_enabled(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}
