use gloo::console;

/// Thin console logger with a component tag, so page and service logs
/// stay greppable in the browser devtools.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(format!("[{component}] {message}"));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::info!(format!("[{component}] {message}"));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(format!("[{component}] {message}"));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(format!("[{component}] {message}"));
    }
}
