use gloo::dialogs::confirm;
use shared::Book;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::Route;
use crate::components::alert::{Alert, AlertMessage};
use crate::components::book_form_modal::BookFormModal;
use crate::components::data_table::{Column, DataTable};
use crate::hooks::{use_entity_list, ListAction};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

fn book_route(id: i64) -> Route {
    Route::BookDetails { id }
}

fn availability_cell(book: &Book) -> Html {
    html! { { format!("{} / {}", book.available_quantity, book.quantity) } }
}

fn columns() -> Vec<Column<Book>> {
    vec![
        Column::new("id", "ID"),
        Column::new("title", "Title"),
        Column::new("author", "Author"),
        Column::new("isbn", "ISBN"),
        Column::new("publicationYear", "Year"),
        Column::rendered("availability", "Available", availability_cell),
    ]
}

#[function_component(BooksPage)]
pub fn books_page() -> Html {
    let list = use_entity_list({
        let api = ApiClient::new();
        move || {
            let api = api.clone();
            async move { api.list_books().await }
        }
    });
    let query = use_state(String::new);
    let show_form = use_state(|| false);
    let editing = use_state(|| Option::<Book>::None);

    let on_query_input = {
        let query = query.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            query.set(input.value());
        })
    };

    // An empty query falls back to the full list so clearing the box
    // behaves like a reset.
    let on_search = {
        let list = list.clone();
        let query = query.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let term = query.trim().to_string();
            if term.is_empty() {
                list.reload.emit(());
                return;
            }
            let state = list.state.clone();
            state.dispatch(ListAction::BeginFetch);
            spawn_local(async move {
                let api = ApiClient::new();
                match api.search_books(&term).await {
                    Ok(books) => state.dispatch(ListAction::Loaded(books)),
                    Err(error) => {
                        Logger::error_with_component("books", &format!("search failed: {error}"));
                        state.dispatch(ListAction::FetchFailed(error.to_string()));
                    }
                }
            });
        })
    };

    let on_add = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            show_form.set(true);
        })
    };

    let on_edit = {
        let show_form = show_form.clone();
        let editing = editing.clone();
        Callback::from(move |book: Book| {
            editing.set(Some(book));
            show_form.set(true);
        })
    };

    let on_delete = {
        let list = list.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this book?") {
                return;
            }
            let list = list.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                match api.delete_book(id).await {
                    Ok(()) => {
                        list.remove(id);
                        list.notify(AlertMessage::success("Book deleted successfully."));
                    }
                    Err(error) => {
                        Logger::error_with_component("books", &format!("delete failed: {error}"));
                        list.notify(AlertMessage::error(error.to_string()));
                    }
                }
            });
        })
    };

    let on_form_close = {
        let show_form = show_form.clone();
        Callback::from(move |_: ()| show_form.set(false))
    };

    let on_form_success = {
        let list = list.clone();
        let editing = editing.clone();
        Callback::from(move |book: Book| {
            if editing.is_some() {
                list.replace(book);
                list.notify(AlertMessage::success("Book updated successfully."));
            } else {
                list.append(book);
                list.notify(AlertMessage::success("Book added successfully."));
            }
            editing.set(None);
        })
    };

    let alert = list.state.alert.clone().map(|alert| {
        html! {
            <Alert kind={alert.kind} message={alert.message} on_close={list.dismiss_alert()} />
        }
    });

    html! {
        <div>
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-semibold text-gray-900">{ "Books" }</h1>
                <button class="btn btn-primary" onclick={on_add}>{ "Add Book" }</button>
            </div>
            { for alert }

            <form class="mb-4 flex space-x-2" onsubmit={on_search}>
                <input
                    type="text"
                    class="form-input flex-1"
                    placeholder="Search by title, author or ISBN"
                    value={(*query).clone()}
                    oninput={on_query_input}
                />
                <button type="submit" class="btn btn-secondary">{ "Search" }</button>
            </form>

            if list.state.is_loading {
                <div class="py-12 text-center">
                    <div class="loader mx-auto"></div>
                </div>
            } else if let Some(message) = &list.state.load_error {
                <div class="bg-red-50 border-l-4 border-red-500 text-red-700 p-4 rounded-r-md" role="alert">
                    { message.clone() }
                </div>
            } else {
                <div class="bg-white rounded-lg shadow overflow-hidden">
                    <DataTable<Book>
                        columns={columns()}
                        data={list.state.items.clone()}
                        link_to={book_route as fn(i64) -> Route}
                        on_edit={on_edit}
                        on_delete={on_delete}
                    />
                </div>
            }

            <BookFormModal
                is_open={*show_form}
                book={(*editing).clone()}
                on_close={on_form_close}
                on_success={on_form_success}
            />
        </div>
    }
}
