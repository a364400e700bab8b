use shared::{parse_instant, Transaction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;
use crate::components::records::{format_date, transaction_status_badge};
use crate::components::stats_card::StatsCard;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const RECENT_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Default)]
struct DashboardStats {
    total_books: usize,
    total_members: usize,
    total_transactions: usize,
    overdue: usize,
}

/// Latest `RECENT_COUNT` transactions by borrow date. Unparseable dates
/// sort last rather than breaking the listing.
fn recent_transactions(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| {
        let a = parse_instant(&a.borrow_date);
        let b = parse_instant(&b.borrow_date);
        b.cmp(&a)
    });
    transactions.truncate(RECENT_COUNT);
    transactions
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let stats = use_state(DashboardStats::default);
    let recent = use_state(Vec::<Transaction>::new);
    let is_loading = use_state(|| true);
    let load_error = use_state(|| Option::<String>::None);

    use_effect_with((), {
        let stats = stats.clone();
        let recent = recent.clone();
        let is_loading = is_loading.clone();
        let load_error = load_error.clone();
        move |_| {
            let api = ApiClient::new();
            spawn_local(async move {
                let (books, members, transactions, overdue) = futures::join!(
                    api.list_books(),
                    api.list_members(),
                    api.list_transactions(),
                    api.overdue_transactions(),
                );
                match (books, members, transactions, overdue) {
                    (Ok(books), Ok(members), Ok(transactions), Ok(overdue)) => {
                        stats.set(DashboardStats {
                            total_books: books.len(),
                            total_members: members.len(),
                            total_transactions: transactions.len(),
                            overdue: overdue.len(),
                        });
                        recent.set(recent_transactions(transactions));
                    }
                    _ => {
                        Logger::error_with_component("dashboard", "loading stats failed");
                        load_error.set(Some("Failed to load dashboard data.".to_string()));
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

    let recent_rows: Html = recent
        .iter()
        .map(|transaction| {
            html! {
                <tr key={transaction.id.to_string()} class="hover:bg-gray-50">
                    <td class="px-6 py-4 whitespace-nowrap">{ &transaction.book.title }</td>
                    <td class="px-6 py-4 whitespace-nowrap">{ &transaction.member.name }</td>
                    <td class="px-6 py-4 whitespace-nowrap">{ format_date(&transaction.borrow_date) }</td>
                    <td class="px-6 py-4 whitespace-nowrap">{ transaction_status_badge(transaction) }</td>
                </tr>
            }
        })
        .collect();

    html! {
        <div>
            <h1 class="text-2xl font-semibold text-gray-900 mb-6">{ "Dashboard" }</h1>
            { load_error.as_ref().map(|message| html! {
                <div class="bg-red-50 border-l-4 border-red-500 text-red-700 p-4 mb-4 rounded-r-md" role="alert">
                    { message.clone() }
                </div>
            }).unwrap_or_default() }

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-8">
                <StatsCard title="Total Books" value={stats.total_books.to_string()} />
                <StatsCard title="Total Members" value={stats.total_members.to_string()} bg_color="bg-green-500" />
                <StatsCard title="Transactions" value={stats.total_transactions.to_string()} bg_color="bg-purple-500" />
                <StatsCard title="Overdue" value={stats.overdue.to_string()} bg_color="bg-red-500" />
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                <div class="lg:col-span-2 bg-white rounded-lg shadow overflow-hidden">
                    <div class="px-6 py-4 border-b">
                        <h2 class="text-lg font-medium text-gray-900">{ "Recent Transactions" }</h2>
                    </div>
                    <table class="min-w-full divide-y divide-gray-200">
                        <thead class="bg-gray-50">
                            <tr>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{ "Book" }</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{ "Member" }</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{ "Borrowed" }</th>
                                <th class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase">{ "Status" }</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-gray-200">
                            { if recent.is_empty() {
                                html! {
                                    <tr><td class="px-6 py-4 text-gray-500" colspan="4">{ "No transactions yet." }</td></tr>
                                }
                            } else {
                                recent_rows
                            } }
                        </tbody>
                    </table>
                </div>

                <div class="bg-white rounded-lg shadow p-6">
                    <h2 class="text-lg font-medium text-gray-900 mb-4">{ "Quick Actions" }</h2>
                    <div class="space-y-3">
                        <Link<Route> to={Route::Books} classes="block w-full text-center btn btn-primary">
                            { "Manage Books" }
                        </Link<Route>>
                        <Link<Route> to={Route::Members} classes="block w-full text-center btn btn-secondary">
                            { "Manage Members" }
                        </Link<Route>>
                        <Link<Route> to={Route::Transactions} classes="block w-full text-center btn btn-secondary">
                            { "Manage Transactions" }
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Book, Member, MemberStatus};

    fn transaction(id: i64, borrow_date: &str) -> Transaction {
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
            borrow_date: borrow_date.to_string(),
            due_date: "2099-01-01T00:00:00Z".to_string(),
            return_date: None,
        }
    }

    #[test]
    fn test_recent_sorts_newest_first_and_caps_at_five() {
        let input: Vec<Transaction> = (1..=7)
            .map(|day| transaction(day, &format!("2025-03-0{day}T00:00:00Z")))
            .collect();
        let result = recent_transactions(input);
        assert_eq!(result.len(), 5);
        let ids: Vec<i64> = result.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_recent_puts_unparseable_dates_last() {
        let result = recent_transactions(vec![
            transaction(1, "not a date"),
            transaction(2, "2025-03-01T00:00:00Z"),
        ]);
        let ids: Vec<i64> = result.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
