use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::sidebar::Sidebar;
use crate::pages::book_details::BookDetailsPage;
use crate::pages::books::BooksPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::member_details::MemberDetailsPage;
use crate::pages::members::MembersPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::transactions::TransactionsPage;
use crate::services::session;

#[derive(Routable, Debug, Clone, PartialEq)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Dashboard,
    #[at("/books")]
    Books,
    #[at("/books/:id")]
    BookDetails { id: i64 },
    #[at("/members")]
    Members,
    #[at("/members/:id")]
    MemberDetails { id: i64 },
    #[at("/transactions")]
    Transactions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Wraps every admin page: unauthenticated visitors land on the login
/// screen instead.
fn guarded(page: Html) -> Html {
    if !session::is_authenticated() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }
    html! {
        <div class="min-h-screen bg-gray-100">
            <Sidebar />
            <main class="ml-64 p-8">
                { page }
            </main>
        </div>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Dashboard => guarded(html! { <DashboardPage /> }),
        Route::Books => guarded(html! { <BooksPage /> }),
        Route::BookDetails { id } => guarded(html! { <BookDetailsPage {id} /> }),
        Route::Members => guarded(html! { <MembersPage /> }),
        Route::MemberDetails { id } => guarded(html! { <MemberDetailsPage {id} /> }),
        Route::Transactions => guarded(html! { <TransactionsPage /> }),
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}
