use shared::{Member, Transaction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::data_table::{Column, DataTable};
use crate::components::records::{format_date, member_status_badge};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct MemberDetailsProps {
    pub id: i64,
}

fn book_cell(transaction: &Transaction) -> Html {
    html! {
        <Link<Route>
            to={Route::BookDetails { id: transaction.book.id }}
            classes="text-blue-600 hover:text-blue-900"
        >
            { &transaction.book.title }
        </Link<Route>>
    }
}

fn history_columns() -> Vec<Column<Transaction>> {
    vec![
        Column::rendered("book", "Book", book_cell),
        Column::new("borrowDate", "Borrowed"),
        Column::new("dueDate", "Due"),
        Column::new("returnDate", "Returned"),
        Column::new("status", "Status"),
    ]
}

#[function_component(MemberDetailsPage)]
pub fn member_details_page(props: &MemberDetailsProps) -> Html {
    let member = use_state(|| Option::<Member>::None);
    let history = use_state(Vec::<Transaction>::new);
    let is_loading = use_state(|| true);
    let load_error = use_state(|| Option::<String>::None);

    use_effect_with(props.id, {
        let member = member.clone();
        let history = history.clone();
        let is_loading = is_loading.clone();
        let load_error = load_error.clone();
        move |&id| {
            is_loading.set(true);
            load_error.set(None);
            let member = member.clone();
            let history = history.clone();
            let is_loading = is_loading.clone();
            let load_error = load_error.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                let (member_result, history_result) =
                    futures::join!(api.get_member(id), api.transactions_by_member(id));
                match (member_result, history_result) {
                    (Ok(found), Ok(transactions)) => {
                        member.set(Some(found));
                        history.set(transactions);
                    }
                    (member_result, history_result) => {
                        if let Err(error) = member_result {
                            Logger::error_with_component("member-details", &format!("loading member failed: {error}"));
                        }
                        if let Err(error) = history_result {
                            Logger::error_with_component("member-details", &format!("loading history failed: {error}"));
                        }
                        load_error.set(Some("Failed to load member details.".to_string()));
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

    let Some(member) = (*member).clone() else {
        return html! {
            <div>
                <div class="bg-red-50 border-l-4 border-red-500 text-red-700 p-4 mb-4 rounded-r-md" role="alert">
                    { load_error.as_deref().unwrap_or("Member not found.") }
                </div>
                <Link<Route> to={Route::Members} classes="text-blue-600 hover:text-blue-900">
                    { "Back to Members" }
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
                <h1 class="text-2xl font-semibold text-gray-900">{ &member.name }</h1>
                <Link<Route> to={Route::Members} classes="text-blue-600 hover:text-blue-900">
                    { "Back to Members" }
                </Link<Route>>
            </div>

            <div class="bg-white rounded-lg shadow p-6 mb-6">
                <dl class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    { detail("Member ID", html! { { &member.member_id } }) }
                    { detail("Email", html! { { &member.email } }) }
                    { detail("Registered", html! { { format_date(&member.registration_date) } }) }
                    { detail("Status", member_status_badge(member.status)) }
                </dl>
            </div>

            <h2 class="text-lg font-medium text-gray-900 mb-4">{ "Borrowing History" }</h2>
            if history.is_empty() {
                <p class="text-gray-500">{ "This member has not borrowed any books." }</p>
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
