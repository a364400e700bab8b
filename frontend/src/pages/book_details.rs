use shared::{Book, Transaction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::data_table::{Column, DataTable};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct BookDetailsProps {
    pub id: i64,
}

fn member_cell(transaction: &Transaction) -> Html {
    html! {
        <Link<Route>
            to={Route::MemberDetails { id: transaction.member.id }}
            classes="text-blue-600 hover:text-blue-900"
        >
            { &transaction.member.name }
        </Link<Route>>
    }
}

fn history_columns() -> Vec<Column<Transaction>> {
    vec![
        Column::rendered("member", "Member", member_cell),
        Column::new("borrowDate", "Borrowed"),
        Column::new("dueDate", "Due"),
        Column::new("returnDate", "Returned"),
        Column::new("status", "Status"),
    ]
}

#[function_component(BookDetailsPage)]
pub fn book_details_page(props: &BookDetailsProps) -> Html {
    let book = use_state(|| Option::<Book>::None);
    let history = use_state(Vec::<Transaction>::new);
    let is_loading = use_state(|| true);
    let load_error = use_state(|| Option::<String>::None);

    use_effect_with(props.id, {
        let book = book.clone();
        let history = history.clone();
        let is_loading = is_loading.clone();
        let load_error = load_error.clone();
        move |&id| {
            is_loading.set(true);
            load_error.set(None);
            let book = book.clone();
            let history = history.clone();
            let is_loading = is_loading.clone();
            let load_error = load_error.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                let (book_result, history_result) =
                    futures::join!(api.get_book(id), api.transactions_by_book(id));
                match (book_result, history_result) {
                    (Ok(found), Ok(transactions)) => {
                        book.set(Some(found));
                        history.set(transactions);
                    }
                    (book_result, history_result) => {
                        if let Err(error) = book_result {
                            Logger::error_with_component("book-details", &format!("loading book failed: {error}"));
                        }
                        if let Err(error) = history_result {
                            Logger::error_with_component("book-details", &format!("loading history failed: {error}"));
                        }
                        load_error.set(Some("Failed to load book details.".to_string()));
                    }
                }
                is_loading.set(false);
            });
            || ()
        }
    });

    if *is_loading {
        return html! {
            <div class="py-12 text-center">
                <div class="loader mx-auto"></div>
            </div>
        };
    }

    let Some(book) = (*book).clone() else {
        return html! {
            <div>
                <div class="bg-red-50 border-l-4 border-red-500 text-red-700 p-4 mb-4 rounded-r-md" role="alert">
                    { load_error.as_deref().unwrap_or("Book not found.") }
                </div>
                <Link<Route> to={Route::Books} classes="text-blue-600 hover:text-blue-900">
                    { "Back to Books" }
                </Link<Route>>
            </div>
        };
    };

    let detail = |label: &str, value: Html| {
        html! {
            <div>
                <dt class="text-sm font-medium text-gray-500">{ label.to_string() }</dt>
                <dd class="mt-1 text-sm text-gray-900">{ value }</dd>
            </div>
        }
    };

    html! {
        <div>
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-semibold text-gray-900">{ &book.title }</h1>
                <Link<Route> to={Route::Books} classes="text-blue-600 hover:text-blue-900">
                    { "Back to Books" }
                </Link<Route>>
            </div>

            <div class="bg-white rounded-lg shadow p-6 mb-6">
                <dl class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    { detail("Author", html! { { &book.author } }) }
                    { detail("ISBN", html! { { &book.isbn } }) }
                    { detail("Publication Year", match book.publication_year {
                        Some(year) => html! { { year } },
                        None => html! { { "—" } },
                    }) }
                    { detail("Total Copies", html! { { book.quantity } }) }
                    { detail("Available Copies", html! { { book.available_quantity } }) }
                </dl>
            </div>

            <h2 class="text-lg font-medium text-gray-900 mb-4">{ "Borrowing History" }</h2>
            if history.is_empty() {
                <p class="text-gray-500">{ "This book has never been borrowed." }</p>
            } else {
                <div class="bg-white rounded-lg shadow overflow-hidden">
                    <DataTable<Transaction>
                        columns={history_columns()}
                        data={(*history).clone()}
                    />
                </div>
            }
        </div>
    }
}
