use gloo::dialogs::confirm;
use shared::Member;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::Route;
use crate::components::alert::{Alert, AlertMessage};
use crate::components::data_table::{Column, DataTable};
use crate::components::member_form_modal::MemberFormModal;
use crate::hooks::use_entity_list;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

fn member_route(id: i64) -> Route {
    Route::MemberDetails { id }
}

fn columns() -> Vec<Column<Member>> {
    vec![
        Column::new("id", "ID"),
        Column::new("memberId", "Member ID"),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("registrationDate", "Registered"),
        Column::new("status", "Status"),
    ]
}

#[function_component(MembersPage)]
pub fn members_page() -> Html {
    let list = use_entity_list({
        let api = ApiClient::new();
        move || {
            let api = api.clone();
            async move { api.list_members().await }
        }
    });
    let show_form = use_state(|| false);
    let editing = use_state(|| Option::<Member>::None);

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
        Callback::from(move |member: Member| {
            editing.set(Some(member));
            show_form.set(true);
        })
    };

    let on_delete = {
        let list = list.clone();
        Callback::from(move |id: i64| {
            if !confirm("Are you sure you want to delete this member?") {
                return;
            }
            let list = list.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                match api.delete_member(id).await {
                    Ok(()) => {
                        list.remove(id);
                        list.notify(AlertMessage::success("Member deleted successfully."));
                    }
                    Err(error) => {
                        Logger::error_with_component("members", &format!("delete failed: {error}"));
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
        Callback::from(move |member: Member| {
            if editing.is_some() {
                list.replace(member);
                list.notify(AlertMessage::success("Member updated successfully."));
            } else {
                list.append(member);
                list.notify(AlertMessage::success("Member added successfully."));
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
                <h1 class="text-2xl font-semibold text-gray-900">{ "Members" }</h1>
                <button class="btn btn-primary" onclick={on_add}>{ "Add Member" }</button>
            </div>
            { for alert }

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
                    <DataTable<Member>
                        columns={columns()}
                        data={list.state.items.clone()}
                        link_to={member_route as fn(i64) -> Route}
                        on_edit={on_edit}
                        on_delete={on_delete}
                    />
                </div>
            }

            <MemberFormModal
                is_open={*show_form}
                member={(*editing).clone()}
                on_close={on_form_close}
                on_success={on_form_success}
            />
        </div>
    }
}
