use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::services::validation::FieldErrors;

/// Form styling helpers shared by the entity form modals.
pub fn input_class(errors: &FieldErrors, key: &str) -> &'static str {
    if errors.contains_key(key) {
        "form-input border-red-500"
    } else {
        "form-input"
    }
}

pub fn field_error(errors: &FieldErrors, key: &str) -> Html {
    match errors.get(key) {
        Some(message) => html! { <p class="mt-1 text-sm text-red-600">{ message }</p> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub is_open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Generic overlay shell used by every form dialog. Backdrop click and
/// Escape both close it; clicks inside the content stop propagation so
/// they never reach the backdrop handler. While open, background
/// scrolling is suppressed; the escape listener and the scroll lock are
/// released by the effect cleanup on close and on unmount. The caller
/// owns all form state.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    // Keyed on the callback too, so the listener re-binds if the parent
    // hands down a new `on_close` while the modal is open.
    use_effect_with(
        (props.is_open, props.on_close.clone()),
        move |(is_open, on_close)| {
            let mut escape_listener = None;
            if *is_open {
                let document = gloo::utils::document();
                if let Some(body) = document.body() {
                    let _ = body.style().set_property("overflow", "hidden");
                }
                let on_close = on_close.clone();
                escape_listener = Some(EventListener::new(&document, "keydown", move |event| {
                    if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                        if event.key() == "Escape" {
                            on_close.emit(());
                        }
                    }
                }));
            }
            move || {
                drop(escape_listener);
                if let Some(body) = gloo::utils::document().body() {
                    let _ = body.style().remove_property("overflow");
                }
            }
        },
    );

    if !props.is_open {
        return html! {};
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_content_click = Callback::from(|event: MouseEvent| event.stop_propagation());
    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/50"
            onclick={on_backdrop_click}
        >
            <div
                class="relative bg-white rounded-lg shadow-xl max-w-md w-full max-h-[90vh] overflow-auto"
                onclick={on_content_click}
            >
                <div class="flex items-center justify-between px-6 py-4 border-b bg-gray-50">
                    <h3 class="text-lg font-medium text-gray-900">{ &props.title }</h3>
                    <button
                        class="text-gray-400 hover:text-gray-500 rounded-full p-1"
                        aria-label="Close"
                        onclick={on_close_click}
                    >
                        { "\u{2715}" }
                    </button>
                </div>
                <div class="px-6 py-4 bg-white">
                    { props.children.clone() }
                </div>
            </div>
        </div>
    }
}
