use shared::{Member, MemberStatus};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modal::{field_error, input_class, Modal};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::validation::{validate_member, FieldErrors, MemberDraft, SUBMIT};

#[derive(Properties, PartialEq)]
pub struct MemberFormModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    pub on_success: Callback<Member>,
    /// `None` = register a new member, `Some` = edit that member.
    #[prop_or_default]
    pub member: Option<Member>,
}

#[function_component(MemberFormModal)]
pub fn member_form_modal(props: &MemberFormModalProps) -> Html {
    let draft = use_state(MemberDraft::default);
    let errors = use_state(FieldErrors::new);
    let is_submitting = use_state(|| false);
    let api = ApiClient::new();

    use_effect_with((props.is_open, props.member.clone()), {
        let draft = draft.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        move |(is_open, member)| {
            if *is_open {
                draft.set(match member {
                    Some(member) => MemberDraft::from_member(member),
                    None => MemberDraft::default(),
                });
                errors.set(FieldErrors::new());
                is_submitting.set(false);
            }
            || ()
        }
    });

    let on_field_change = |key: &'static str, apply: fn(&mut MemberDraft, String)| {
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

    let on_status_change = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Some(status) = MemberStatus::from_label(&select.value()) {
                let mut next = (*draft).clone();
                next.status = status;
                draft.set(next);
            }
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let is_submitting = is_submitting.clone();
        let editing = props.member.clone();
        let on_close = props.on_close.clone();
        let on_success = props.on_success.clone();
        let api = api.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let found = validate_member(&draft);
            if !found.is_empty() {
                errors.set(found);
                return;
            }
            is_submitting.set(true);
            errors.set(FieldErrors::new());

            let draft = draft.clone();
            let errors = errors.clone();
            let is_submitting = is_submitting.clone();
            let editing = editing.clone();
            let on_close = on_close.clone();
            let on_success = on_success.clone();
            let api = api.clone();

            spawn_local(async move {
                let payload = draft.to_payload();
                let result = match &editing {
                    Some(member) => api.update_member(member.id, &payload).await,
                    None => api.create_member(&payload).await,
                };
                match result {
                    Ok(member) => {
                        if editing.is_none() {
                            draft.set(MemberDraft::default());
                        }
                        is_submitting.set(false);
                        on_close.emit(());
                        on_success.emit(member);
                    }
                    Err(error) => {
                        Logger::error_with_component("member-form", &format!("save failed: {error}"));
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

    let title = if props.member.is_some() { "Edit Member" } else { "Add Member" };
    let submit_label = match (props.member.is_some(), *is_submitting) {
        (true, true) => "Updating...",
        (true, false) => "Update Member",
        (false, true) => "Adding...",
        (false, false) => "Add Member",
    };

    html! {
        <Modal is_open={props.is_open} title={title} on_close={props.on_close.clone()}>
            <form class="space-y-4" onsubmit={on_submit}>
                { field_error(&errors, SUBMIT) }

                <div>
                    <label for="memberId" class="block text-sm font-medium text-gray-700 mb-1">{ "Member ID" }</label>
                    <input
                        type="text"
                        id="memberId"
                        class={input_class(&errors, "memberId")}
                        placeholder="Enter member ID"
                        value={draft.member_id.clone()}
                        onchange={on_field_change("memberId", |draft, value| draft.member_id = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "memberId") }
                </div>

                <div>
                    <label for="name" class="block text-sm font-medium text-gray-700 mb-1">{ "Name" }</label>
                    <input
                        type="text"
                        id="name"
                        class={input_class(&errors, "name")}
                        placeholder="Enter full name"
                        value={draft.name.clone()}
                        onchange={on_field_change("name", |draft, value| draft.name = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "name") }
                </div>

                <div>
                    <label for="email" class="block text-sm font-medium text-gray-700 mb-1">{ "Email" }</label>
                    <input
                        type="email"
                        id="email"
                        class={input_class(&errors, "email")}
                        placeholder="Enter email address"
                        value={draft.email.clone()}
                        onchange={on_field_change("email", |draft, value| draft.email = value)}
                        disabled={*is_submitting}
                    />
                    { field_error(&errors, "email") }
                </div>

                <div>
                    <label for="status" class="block text-sm font-medium text-gray-700 mb-1">{ "Status" }</label>
                    <select
                        id="status"
                        class="form-input"
                        onchange={on_status_change}
                        disabled={*is_submitting}
                    >
                        { for MemberStatus::ALL.iter().map(|status| html! {
                            <option value={status.label()} selected={draft.status == *status}>
                                { status.label() }
                            </option>
                        }) }
                    </select>
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
