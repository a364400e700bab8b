use shared::{Book, Member, MemberStatus, Transaction};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modal::{field_error, input_class, Modal};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::validation::{today, validate_borrow, BorrowDraft, FieldErrors, SUBMIT};

#[derive(Properties, PartialEq)]
pub struct TransactionFormModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_success: Callback<Transaction>,
}

/// Only books with copies on the shelf can be borrowed, and only by
/// members in good standing.
fn borrowable(books: Vec<Book>) -> Vec<Book> {
    books.into_iter().filter(|book| book.available_quantity > 0).collect()
}

fn eligible(members: Vec<Member>) -> Vec<Member> {
    members
        .into_iter()
        .filter(|member| member.status == MemberStatus::Active)
        .collect()
}

#[function_component(TransactionFormModal)]
pub fn transaction_form_modal(props: &TransactionFormModalProps) -> Html {
    let books = use_state(Vec::<Book>::new);
    let members = use_state(Vec::<Member>::new);
    let is_loading = use_state(|| true);
    let draft = use_state(BorrowDraft::default);
    let errors = use_state(FieldErrors::new);
    let is_submitting = use_state(|| false);
    let api = ApiClient::new();

    // Both option lists are fetched together on open so the selects
    // never render half-populated.
    use_effect_with(props.is_open, {
        let books = books.clone();
        let members = members.clone();
        let is_loading = is_loading.clone();
        let draft = draft.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let api = api.clone();
        move |is_open| {
            if *is_open {
                draft.set(BorrowDraft::default());
                errors.set(FieldErrors::new());
                is_submitting.set(false);
                is_loading.set(true);
                let books = books.clone();
                let members = members.clone();
                let is_loading = is_loading.clone();
                let errors = errors.clone();
                spawn_local(async move {
                    let (books_result, members_result) =
                        futures::join!(api.list_books(), api.list_members());
                    match (books_result, members_result) {
                        (Ok(all_books), Ok(all_members)) => {
                            books.set(borrowable(all_books));
                            members.set(eligible(all_members));
                        }
                        (books_result, members_result) => {
                            if let Err(error) = books_result {
                                Logger::error_with_component("borrow-form", &format!("loading books failed: {error}"));
                            }
                            if let Err(error) = members_result {
                                Logger::error_with_component("borrow-form", &format!("loading members failed: {error}"));
                            }
                            let mut next = FieldErrors::new();
                            next.insert(SUBMIT, "Failed to load books and members. Please try again.".to_string());
                            errors.set(next);
                        }
                    }
                    is_loading.set(false);
                });
            }
            || ()
        }
    });

    let on_book_change = {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.book_id = select.value();
            draft.set(next);
            let mut next = (*errors).clone();
            next.remove("bookId");
            errors.set(next);
        })
    };

    let on_member_change = {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.member_id = select.value();
            draft.set(next);
            let mut next = (*errors).clone();
            next.remove("memberId");
            errors.set(next);
        })
    };

    let on_due_date_change = {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            next.due_date = input.value();
            draft.set(next);
            let mut next = (*errors).clone();
            next.remove("dueDate");
            errors.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let on_close = props.on_close.clone();
        let on_success = props.on_success.clone();
        let api = api.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let found = validate_borrow(&draft);
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            let Some(request) = draft.to_request() else {
                // validate_borrow guarantees this converts; treat a miss
                // as a plain submit error rather than poisoning a field.
                let mut next = FieldErrors::new();
                next.insert(SUBMIT, "Failed to borrow book. Please try again.".to_string());
                errors.set(next);
                return;
            };
            is_submitting.set(true);
            errors.set(FieldErrors::new());

            let draft = draft.clone();
            let errors = errors.clone();
            let is_submitting = is_submitting.clone();
            let on_close = on_close.clone();
            let on_success = on_success.clone();
            let api = api.clone();

            spawn_local(async move {
                match api.borrow(&request).await {
                    Ok(transaction) => {
                        draft.set(BorrowDraft::default());
                        is_submitting.set(false);
                        on_close.emit(());
                        on_success.emit(transaction);
                    }
                    Err(error) => {
                        Logger::error_with_component("borrow-form", &format!("borrow failed: {error}"));
                        let mut next = FieldErrors::new();
                        next.insert(SUBMIT, error.to_string());
                        errors.set(next);
                        is_submitting.set(false);
                    }
                }
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = if *is_loading {
        html! {
            <div class="py-4 text-center">
                <div class="loader mx-auto"></div>
                <p class="mt-2 text-gray-600">{ "Loading books and members..." }</p>
            </div>
        }
    } else {
        html! {
            <>
                <div>
                    <label for="bookId" class="block text-sm font-medium text-gray-700 mb-1">{ "Book" }</label>
                    <select
                        id="bookId"
                        class={input_class(&errors, "bookId")}
                        onchange={on_book_change}
                        disabled={*is_submitting}
                    >
                        <option value="" selected={draft.book_id.is_empty()}>{ "Select Book" }</option>
                        { for books.iter().map(|book| html! {
                            <option value={book.id.to_string()} selected={draft.book_id == book.id.to_string()}>
                                { format!("{} by {} ({} available)", book.title, book.author, book.available_quantity) }
                            </option>
                        }) }
                    </select>
                    { field_error(&errors, "bookId") }
                    { (books.is_empty()).then(|| html! {
                        <p class="mt-1 text-sm text-amber-600">{ "No books available for borrowing." }</p>
                    }).unwrap_or_default() }
                </div>

                <div>
                    <label for="memberId" class="block text-sm font-medium text-gray-700 mb-1">{ "Member" }</label>
                    <select
                        id="memberId"
                        class={input_class(&errors, "memberId")}
                        onchange={on_member_change}
                        disabled={*is_submitting}
                    >
                        <option value="" selected={draft.member_id.is_empty()}>{ "Select Member" }</option>
                        { for members.iter().map(|member| html! {
                            <option value={member.id.to_string()} selected={draft.member_id == member.id.to_string()}>
                                { format!("{} ({})", member.name, member.member_id) }
                            </option>
                        }) }
                    </select>
                    { field_error(&errors, "memberId") }
                    { (members.is_empty()).then(|| html! {
                        <p class="mt-1 text-sm text-amber-600">{ "No active members available." }</p>
                    }).unwrap_or_default() }
                </div>

                <div>
                    <label for="dueDate" class="block text-sm font-medium text-gray-700 mb-1">{ "Due Date" }</label>
                    <input
                        type="date"
                        id="dueDate"
                        class={input_class(&errors, "dueDate")}
                        min={today()}
                        value={draft.due_date.clone()}
                        onchange={on_due_date_change}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "dueDate") }
                </div>
            </>
        }
    };

    html! {
        <Modal is_open={props.is_open} title="Borrow Book" on_close={props.on_close.clone()}>
            <form class="space-y-4" onsubmit={on_submit}>
                { field_error(&errors, SUBMIT) }
                { body }
                <div class="flex justify-end space-x-3 pt-4 border-t">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={on_cancel}
                        disabled={*is_submitting || *is_loading}
                    >
                        { "Cancel" }
                    </button>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled={*is_submitting || *is_loading}
                    >
                        { if *is_submitting { "Processing..." } else { "Borrow Book" } }
                    </button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, available: i32) -> Book {
        Book {
            id,
            title: "T".to_string(),
            author: "A".to_string(),
            isbn: "I".to_string(),
            publication_year: None,
            quantity: 5,
            available_quantity: available,
        }
    }

    fn member(id: i64, status: MemberStatus) -> Member {
        Member {
            id,
            member_id: format!("M-{id}"),
            name: "N".to_string(),
            email: "n@example.com".to_string(),
            status,
            registration_date: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_only_books_with_available_copies_are_borrowable() {
        let filtered = borrowable(vec![book(1, 0), book(2, 3), book(3, 1)]);
        let ids: Vec<i64> = filtered.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_only_active_members_are_eligible() {
        let filtered = eligible(vec![
            member(1, MemberStatus::Active),
            member(2, MemberStatus::Suspended),
            member(3, MemberStatus::Inactive),
        ]);
        let ids: Vec<i64> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_empty_lists_stay_empty() {
        assert!(borrowable(Vec::new()).is_empty());
        assert!(eligible(Vec::new()).is_empty());
    }
}
