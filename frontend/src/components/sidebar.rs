use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::services::session;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let route = use_route::<Route>();
    let navigator = use_navigator();

    let nav_link = |target: Route, label: &str| {
        let active = route == Some(target.clone());
        let classes = if active {
            "flex items-center px-4 py-2 mt-2 rounded-md bg-blue-500 text-white"
        } else {
            "flex items-center px-4 py-2 mt-2 rounded-md text-gray-600 hover:bg-gray-100"
        };
        html! {
            <Link<Route> to={target} classes={classes}>{ label.to_string() }</Link<Route>>
        }
    };

    let on_logout = Callback::from(move |_: MouseEvent| {
        session::clear_token();
        if let Some(navigator) = navigator.clone() {
            navigator.push(&Route::Login);
        }
    });

    html! {
        <div class="fixed inset-y-0 left-0 w-64 bg-white shadow-lg">
            <div class="px-6 py-4 border-b">
                <div class="text-xl font-bold text-blue-600">{ "SmartShelf" }</div>
            </div>
            <nav class="mt-6 px-6">
                { nav_link(Route::Dashboard, "Dashboard") }
                { nav_link(Route::Books, "Books") }
                { nav_link(Route::Members, "Members") }
                { nav_link(Route::Transactions, "Transactions") }
                <button
                    class="flex items-center px-4 py-2 mt-8 w-full rounded-md text-gray-600 hover:bg-gray-100"
                    onclick={on_logout}
                >
                    { "Logout" }
                </button>
            </nav>
        </div>
    }
}
