use chrono::{DateTime, Utc};
use shared::{ReturnRequest, Transaction, TransactionStatus};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::alert::{Alert, AlertMessage};
use crate::components::data_table::{Column, DataTable};
use crate::components::modal::Modal;
use crate::components::records::format_date;
use crate::components::transaction_form_modal::TransactionFormModal;
use crate::hooks::use_entity_list;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Borrowed,
    Returned,
    Overdue,
}

impl TransactionFilter {
    const ALL: [TransactionFilter; 4] = [
        TransactionFilter::All,
        TransactionFilter::Borrowed,
        TransactionFilter::Returned,
        TransactionFilter::Overdue,
    ];

    fn label(&self) -> &'static str {
        match self {
            TransactionFilter::All => "All",
            TransactionFilter::Borrowed => "Borrowed",
            TransactionFilter::Returned => "Returned",
            TransactionFilter::Overdue => "Overdue",
        }
    }

    fn from_label(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label() == value)
            .unwrap_or_default()
    }
}

/// Client-side filter over the derived status, so the select needs no
/// extra round trip.
fn apply_filter(
    transactions: &[Transaction],
    filter: TransactionFilter,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| match filter {
            TransactionFilter::All => true,
            TransactionFilter::Borrowed => transaction.status(now) == TransactionStatus::Borrowed,
            TransactionFilter::Returned => transaction.status(now) == TransactionStatus::Returned,
            TransactionFilter::Overdue => transaction.status(now) == TransactionStatus::Overdue,
        })
        .cloned()
        .collect()
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

fn columns() -> Vec<Column<Transaction>> {
    vec![
        Column::new("id", "ID"),
        Column::rendered("book", "Book", book_cell),
        Column::rendered("member", "Member", member_cell),
        Column::new("borrowDate", "Borrowed"),
        Column::new("dueDate", "Due"),
        Column::new("returnDate", "Returned"),
        Column::new("status", "Status"),
    ]
}

#[function_component(TransactionsPage)]
pub fn transactions_page() -> Html {
    let list = use_entity_list({
        let api = ApiClient::new();
        move || {
            let api = api.clone();
            async move { api.list_transactions().await }
        }
    });
    let filter = use_state(TransactionFilter::default);
    let show_borrow = use_state(|| false);
    let returning = use_state(|| Option::<Transaction>::None);
    let is_returning = use_state(|| false);

    let on_filter_change = {
        let filter = filter.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            filter.set(TransactionFilter::from_label(&select.value()));
        })
    };

    let on_open_borrow = {
        let show_borrow = show_borrow.clone();
        Callback::from(move |_: MouseEvent| show_borrow.set(true))
    };

    let on_borrow_close = {
        let show_borrow = show_borrow.clone();
        Callback::from(move |_: ()| show_borrow.set(false))
    };

    let on_borrow_success = {
        let list = list.clone();
        Callback::from(move |transaction: Transaction| {
            list.append(transaction);
            list.notify(AlertMessage::success("Book borrowed successfully."));
        })
    };

    // Return flow asks for confirmation in a modal before hitting the
    // backend, then reconciles the row in place.
    let request_return = {
        let returning = returning.clone();
        Callback::from(move |transaction: Transaction| returning.set(Some(transaction)))
    };

    let on_return_cancel = {
        let returning = returning.clone();
        Callback::from(move |_: ()| returning.set(None))
    };

    let on_return_confirm = {
        let list = list.clone();
        let returning = returning.clone();
        let is_returning = is_returning.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(transaction) = (*returning).clone() else {
                return;
            };
            is_returning.set(true);
            let list = list.clone();
            let returning = returning.clone();
            let is_returning = is_returning.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                match api.return_book(&ReturnRequest { id: transaction.id }).await {
                    Ok(updated) => {
                        list.replace(updated);
                        list.notify(AlertMessage::success("Book returned successfully."));
                    }
                    Err(error) => {
                        Logger::error_with_component("transactions", &format!("return failed: {error}"));
                        list.notify(AlertMessage::error(error.to_string()));
                    }
                }
                returning.set(None);
                is_returning.set(false);
            });
        })
    };

    let actions = {
        let request_return = request_return.clone();
        Callback::from(move |transaction: Transaction| {
            if !transaction.is_open() {
                return html! {};
            }
            let request_return = request_return.clone();
            html! {
                <button
                    class="text-green-600 hover:text-green-900"
                    onclick={Callback::from(move |_| request_return.emit(transaction.clone()))}
                >
                    { "Return" }
                </button>
            }
        })
    };

    let alert = list.state.alert.clone().map(|alert| {
        html! {
            <Alert kind={alert.kind} message={alert.message} on_close={list.dismiss_alert()} />
        }
    });

    let filter_options: Html = TransactionFilter::ALL
        .into_iter()
        .map(|option| {
            html! {
                <option value={option.label()} selected={option == *filter}>
                    { option.label() }
                </option>
            }
        })
        .collect();

    let visible = apply_filter(&list.state.items, *filter, Utc::now());

    html! {
        <div>
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-2xl font-semibold text-gray-900">{ "Transactions" }</h1>
                <button class="btn btn-primary" onclick={on_open_borrow}>{ "Borrow Book" }</button>
            </div>
            { for alert }

            <div class="mb-4">
                <label for="statusFilter" class="mr-2 text-sm font-medium text-gray-700">{ "Status" }</label>
                <select id="statusFilter" class="form-input inline-block w-auto" onchange={on_filter_change}>
                    { filter_options }
                </select>
            </div>

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
                    <DataTable<Transaction>
                        columns={columns()}
                        data={visible}
                        actions={actions}
                    />
                </div>
            }

            <TransactionFormModal
                is_open={*show_borrow}
                on_close={on_borrow_close}
                on_success={on_borrow_success}
            />

            <Modal
                is_open={returning.is_some()}
                title="Return Book"
                on_close={on_return_cancel.clone()}
            >
                { returning.as_ref().map(|transaction| html! {
                    <p class="text-gray-700">
                        { format!(
                            "Return \"{}\" for {} (due {})?",
                            transaction.book.title,
                            transaction.member.name,
                            format_date(&transaction.due_date),
                        ) }
                    </p>
                }).unwrap_or_default() }
                <div class="flex justify-end space-x-3 pt-4 border-t mt-4">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        disabled={*is_returning}
                        onclick={{
                            let on_return_cancel = on_return_cancel.clone();
                            Callback::from(move |_: MouseEvent| on_return_cancel.emit(()))
                        }}
                    >
                        { "Cancel" }
                    </button>
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled={*is_returning}
                        onclick={on_return_confirm}
                    >
                        { if *is_returning { "Processing..." } else { "Confirm Return" } }
                    </button>
                </div>
            </Modal>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::{Book, Member, MemberStatus};

    fn transaction(id: i64, due_date: &str, return_date: Option<&str>) -> Transaction {
        Transaction {
            id,
            book: Book {
                id: 1,
                title: "T".to_string(),
                author: "A".to_string(),
                isbn: "I".to_string(),
                publication_year: None,
                quantity: 1,
                available_quantity: 1,
            },
            member: Member {
                id: 1,
                member_id: "M-1".to_string(),
                name: "N".to_string(),
                email: "n@example.com".to_string(),
                status: MemberStatus::Active,
                registration_date: "2024-01-01T00:00:00Z".to_string(),
            },
            borrow_date: "2025-01-01T00:00:00Z".to_string(),
            due_date: due_date.to_string(),
            return_date: return_date.map(str::to_string),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid instant")
    }

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(1, "2025-07-01T00:00:00Z", None),          // borrowed
            transaction(2, "2025-05-01T00:00:00Z", None),          // overdue
            transaction(3, "2025-05-01T00:00:00Z", Some("2025-05-02T00:00:00Z")), // returned
        ]
    }

    #[test]
    fn test_all_filter_keeps_everything() {
        assert_eq!(apply_filter(&sample(), TransactionFilter::All, now()).len(), 3);
    }

    #[test]
    fn test_filters_partition_by_derived_status() {
        let transactions = sample();
        let borrowed = apply_filter(&transactions, TransactionFilter::Borrowed, now());
        let overdue = apply_filter(&transactions, TransactionFilter::Overdue, now());
        let returned = apply_filter(&transactions, TransactionFilter::Returned, now());
        assert_eq!(borrowed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(overdue.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(returned.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_returned_book_is_never_overdue() {
        let transactions = vec![transaction(9, "2020-01-01T00:00:00Z", Some("2024-01-01T00:00:00Z"))];
        assert!(apply_filter(&transactions, TransactionFilter::Overdue, now()).is_empty());
        assert_eq!(apply_filter(&transactions, TransactionFilter::Returned, now()).len(), 1);
    }

    #[test]
    fn test_filter_labels_round_trip() {
        for filter in TransactionFilter::ALL {
            assert_eq!(TransactionFilter::from_label(filter.label()), filter);
        }
        assert_eq!(TransactionFilter::from_label("bogus"), TransactionFilter::All);
    }
}
