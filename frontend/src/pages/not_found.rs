use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="min-h-screen bg-gray-100 flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-300">{ "404" }</h1>
                <p class="mt-4 text-lg text-gray-600">{ "The page you are looking for does not exist." }</p>
                <Link<Route> to={Route::Dashboard} classes="mt-6 inline-block btn btn-primary">
                    { "Back to Dashboard" }
                </Link<Route>>
            </div>
        </div>
    }
}
