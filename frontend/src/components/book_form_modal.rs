use shared::Book;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::components::modal::{field_error, input_class, Modal};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::validation::{validate_book, BookDraft, FieldErrors, SUBMIT};

#[derive(Properties, PartialEq)]
pub struct BookFormModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    /// Receives the server-returned record so the parent can reconcile
    /// its list.
    pub on_success: Callback<Book>,
    /// `None` = add, `Some` = edit that book.
    #[prop_or_default]
    pub book: Option<Book>,
}

#[function_component(BookFormModal)]
pub fn book_form_modal(props: &BookFormModalProps) -> Html {
    let draft = use_state(BookDraft::default);
    let errors = use_state(FieldErrors::new);
    let is_submitting = use_state(|| false);
    let cover_file = use_state(|| None::<File>);
    let api = ApiClient::new();

    // Re-seed the draft whenever the modal opens: the selected book for
    // edit, empty defaults for add.
    use_effect_with((props.is_open, props.book.clone()), {
        let draft = draft.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let cover_file = cover_file.clone();
        move |(is_open, book)| {
            if *is_open {
                draft.set(match book {
                    Some(book) => BookDraft::from_book(book),
                    None => BookDraft::default(),
                });
                errors.set(FieldErrors::new());
                is_submitting.set(false);
                cover_file.set(None);
            }
            || ()
        }
    });

    let on_field_change = |key: &'static str, apply: fn(&mut BookDraft, String)| {
        let draft = draft.clone();
        let errors = errors.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
            if errors.contains_key(key) {
                let mut next = (*errors).clone();
                next.remove(key);
                errors.set(next);
            }
        })
    };

    let on_cover_change = {
        let cover_file = cover_file.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            cover_file.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let cover_file = cover_file.clone();
        let editing = props.book.clone();
        let on_close = props.on_close.clone();
        let on_success = props.on_success.clone();
        let api = api.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let found = validate_book(&draft);
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            is_submitting.set(true);
            errors.set(FieldErrors::new());

            let draft = draft.clone();
            let errors = errors.clone();
            let is_submitting = is_submitting.clone();
            let cover_file = cover_file.clone();
            let editing = editing.clone();
            let on_close = on_close.clone();
            let on_success = on_success.clone();
            let api = api.clone();

            spawn_local(async move {
                // The upload endpoint files the image under the book's
                // identity server-side; the returned URL is not part of
                // the book payload, so the client only needs the upload
                // to succeed before saving.
                if let Some(file) = (*cover_file).clone() {
                    match api.upload_image(&file).await {
                        Ok(upload) => {
                            Logger::info_with_component("book-form", &format!("cover stored at {}", upload.url));
                        }
                        Err(error) => {
                            Logger::error_with_component("book-form", &format!("cover upload failed: {error}"));
                            let mut next = FieldErrors::new();
                            next.insert(SUBMIT, format!("Failed to upload cover image: {error}"));
                            errors.set(next);
                            is_submitting.set(false);
                            return;
                        }
                    }
                }

                let payload = draft.to_payload();
                let result = match &editing {
                    Some(book) => api.update_book(book.id, &payload).await,
                    None => api.create_book(&payload).await,
                };
                match result {
                    Ok(book) => {
                        if editing.is_none() {
                            draft.set(BookDraft::default());
                            cover_file.set(None);
                        }
                        is_submitting.set(false);
                        on_close.emit(());
                        on_success.emit(book);
                    }
                    Err(error) => {
                        Logger::error_with_component("book-form", &format!("save failed: {error}"));
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

    let title = if props.book.is_some() { "Edit Book" } else { "Add Book" };
    let submit_label = match (props.book.is_some(), *is_submitting) {
        (true, true) => "Updating...",
        (true, false) => "Update Book",
        (false, true) => "Adding...",
        (false, false) => "Add Book",
    };

    html! {
        <Modal is_open={props.is_open} title={title} on_close={props.on_close.clone()}>
            <form class="space-y-4" onsubmit={on_submit}>
                { field_error(&errors, SUBMIT) }

                <div>
                    <label for="title" class="block text-sm font-medium text-gray-700 mb-1">{ "Title" }</label>
                    <input
                        type="text"
                        id="title"
                        class={input_class(&errors, "title")}
                        placeholder="Enter book title"
                        value={draft.title.clone()}
                        onchange={on_field_change("title", |draft, value| draft.title = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "title") }
                </div>

                <div>
                    <label for="author" class="block text-sm font-medium text-gray-700 mb-1">{ "Author" }</label>
                    <input
                        type="text"
                        id="author"
                        class={input_class(&errors, "author")}
                        placeholder="Enter author name"
                        value={draft.author.clone()}
                        onchange={on_field_change("author", |draft, value| draft.author = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "author") }
                </div>

                <div>
                    <label for="isbn" class="block text-sm font-medium text-gray-700 mb-1">{ "ISBN" }</label>
                    <input
                        type="text"
                        id="isbn"
                        class={input_class(&errors, "isbn")}
                        placeholder="Enter ISBN"
                        value={draft.isbn.clone()}
                        onchange={on_field_change("isbn", |draft, value| draft.isbn = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "isbn") }
                </div>

                <div>
                    <label for="publicationYear" class="block text-sm font-medium text-gray-700 mb-1">{ "Publication Year" }</label>
                    <input
                        type="number"
                        id="publicationYear"
                        class="form-input"
                        placeholder="Enter publication year"
                        value={draft.publication_year.clone()}
                        onchange={on_field_change("publicationYear", |draft, value| draft.publication_year = value)}
                        disabled={*is_submitting}
                    />
                </div>

                <div>
                    <label for="quantity" class="block text-sm font-medium text-gray-700 mb-1">{ "Quantity" }</label>
                    <input
                        type="number"
                        id="quantity"
                        min="0"
                        class={input_class(&errors, "quantity")}
                        placeholder="Enter total quantity"
                        value={draft.quantity.clone()}
                        onchange={on_field_change("quantity", |draft, value| draft.quantity = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "quantity") }
                </div>

                <div>
                    <label for="availableQuantity" class="block text-sm font-medium text-gray-700 mb-1">{ "Available Quantity" }</label>
                    <input
                        type="number"
                        id="availableQuantity"
                        min="0"
                        max={draft.quantity.clone()}
                        class={input_class(&errors, "availableQuantity")}
                        placeholder="Enter available quantity"
                        value={draft.available_quantity.clone()}
                        onchange={on_field_change("availableQuantity", |draft, value| draft.available_quantity = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "availableQuantity") }
                </div>

                <div>
                    <label for="cover" class="block text-sm font-medium text-gray-700 mb-1">{ "Cover Image (optional)" }</label>
                    <input
                        type="file"
                        id="cover"
                        accept="image/*"
                        class="form-input"
                        onchange={on_cover_change}
                        disabled={*is_submitting}
                    />
                </div>

                <div class="flex justify-end space-x-3 pt-4 border-t">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        { "Cancel" }
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        { submit_label }
                    </button>
                </div>
            </form>
        </Modal>
    }
}
