use shared::{AuthRequest, RegisterRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::alert::{Alert, AlertKind, AlertMessage};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

const ROLES: [&str; 2] = ["LIBRARIAN", "ADMIN"];

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let navigator = use_navigator();
    let mode = use_state(|| AuthMode::Login);
    let username = use_state(String::new);
    let password = use_state(String::new);
    let role = use_state(|| ROLES[0].to_string());
    let alert = use_state(|| Option::<AlertMessage>::None);
    let is_submitting = use_state(|| false);

    if session::is_authenticated() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    let on_username = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_role = {
        let role = role.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            role.set(select.value());
        })
    };

    let on_toggle_mode = {
        let mode = mode.clone();
        let alert = alert.clone();
        Callback::from(move |_: MouseEvent| {
            mode.set(match *mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            });
            alert.set(None);
        })
    };

    let on_submit = {
        let mode = mode.clone();
        let username = username.clone();
        let password = password.clone();
        let role = role.clone();
        let alert = alert.clone();
        let is_submitting = is_submitting.clone();
        let navigator = navigator.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let name = username.trim().to_string();
            let pass = (*password).clone();
            if name.is_empty() || pass.is_empty() {
                alert.set(Some(AlertMessage::error("Username and password are required.")));
                return;
            }
            is_submitting.set(true);
            alert.set(None);

            let current_mode = *mode;
            let mode = mode.clone();
            let role = (*role).clone();
            let alert = alert.clone();
            let is_submitting = is_submitting.clone();
            let navigator = navigator.clone();

            spawn_local(async move {
                let api = ApiClient::new();
                match current_mode {
                    AuthMode::Login => {
                        let request = AuthRequest { username: name, password: pass };
                        match api.login(&request).await {
                            Ok(response) => {
                                session::store_token(&response.token);
                                if let Some(navigator) = navigator {
                                    navigator.push(&Route::Dashboard);
                                }
                            }
                            Err(error) => {
                                Logger::warn_with_component("login", &format!("login failed: {error}"));
                                alert.set(Some(AlertMessage::error(error.to_string())));
                            }
                        }
                    }
                    AuthMode::Register => {
                        let request = RegisterRequest { username: name, password: pass, role };
                        match api.register(&request).await {
                            Ok(()) => {
                                mode.set(AuthMode::Login);
                                alert.set(Some(AlertMessage::success(
                                    "Account created. You can sign in now.",
                                )));
                            }
                            Err(error) => {
                                Logger::warn_with_component("login", &format!("registration failed: {error}"));
                                alert.set(Some(AlertMessage::error(error.to_string())));
                            }
                        }
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let on_alert_close = {
        let alert = alert.clone();
        Callback::from(move |_: ()| alert.set(None))
    };

    let (heading, submit_label, toggle_label) = match *mode {
        AuthMode::Login => ("Sign in to SmartShelf", "Sign In", "Need an account? Register"),
        AuthMode::Register => ("Create an account", "Register", "Have an account? Sign in"),
    };

    html! {
        <div class="min-h-screen bg-gray-100 flex items-center justify-center">
            <div class="max-w-md w-full bg-white rounded-lg shadow-lg p-8">
                <h1 class="text-2xl font-bold text-center text-gray-900 mb-6">{ heading }</h1>
                { alert.as_ref().map(|message| html! {
                    <Alert
                        kind={message.kind}
                        message={message.message.clone()}
                        auto_close={message.kind != AlertKind::Error}
                        on_close={on_alert_close.clone()}
                    />
                }).unwrap_or_default() }

                <form class="space-y-4" onsubmit={on_submit}>
                    <div>
                        <label for="username" class="block text-sm font-medium text-gray-700 mb-1">{ "Username" }</label>
                        <input
                            type="text"
                            id="username"
                            class="form-input"
                            value={(*username).clone()}
                            oninput={on_username}
                            disabled={*is_submitting}
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-gray-700 mb-1">{ "Password" }</label>
                        <input
                            type="password"
                            id="password"
                            class="form-input"
                            value={(*password).clone()}
                            oninput={on_password}
                            disabled={*is_submitting}
                        />
                    </div>
                    if *mode == AuthMode::Register {
                        <div>
                            <label for="role" class="block text-sm font-medium text-gray-700 mb-1">{ "Role" }</label>
                            <select id="role" class="form-input" onchange={on_role} disabled={*is_submitting}>
                                { for ROLES.iter().map(|option| html! {
                                    <option value={*option} selected={*option == role.as_str()}>{ *option }</option>
                                }) }
                            </select>
                        </div>
                    }
                    <button type="submit" class="btn btn-primary w-full" disabled={*is_submitting}>
                        { if *is_submitting { "Please wait..." } else { submit_label } }
                    </button>
                </form>

                <button class="mt-4 w-full text-sm text-blue-600 hover:text-blue-900" onclick={on_toggle_mode}>
                    { toggle_label }
                </button>
            </div>
        </div>
    }
}
