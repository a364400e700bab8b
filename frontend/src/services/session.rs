use gloo::storage::{LocalStorage, Storage};

const TOKEN_KEY: &str = "token";

/// The bearer token persisted across reloads. Only login/logout and the
/// API client's 401 hook may change it; everything else reads.
pub fn token() -> Option<String> {
    LocalStorage::get(TOKEN_KEY).ok()
}

pub fn store_token(token: &str) {
    let _ = LocalStorage::set(TOKEN_KEY, token);
}

pub fn clear_token() {
    LocalStorage::delete(TOKEN_KEY);
}

/// Presence of the token is the app-wide "signed in" signal.
pub fn is_authenticated() -> bool {
    token().is_some()
}

/// Drop the session and send the browser to the login route. Used by the
/// API client when any request comes back 401, which can happen outside
/// of any component context.
pub fn force_login() {
    clear_token();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}
