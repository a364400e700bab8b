use gloo::timers::callback::Timeout;
use yew::prelude::*;

const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    fn container_class(&self) -> &'static str {
        match self {
            AlertKind::Success => "bg-green-50 border-green-500 text-green-700",
            AlertKind::Error => "bg-red-50 border-red-500 text-red-700",
            AlertKind::Warning => "bg-yellow-50 border-yellow-500 text-yellow-700",
            AlertKind::Info => "bg-blue-50 border-blue-500 text-blue-700",
        }
    }
}

/// A banner message a page wants shown. Kept as plain data so the list
/// hook can own it without touching the DOM.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    pub message: String,
}

impl AlertMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: AlertKind::Info, message: message.into() }
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub kind: AlertKind,
    pub message: AttrValue,
    /// Fired on explicit close and, unless `auto_close` is off, five
    /// seconds after the message appears.
    #[prop_or_default]
    pub on_close: Option<Callback<()>>,
    #[prop_or(true)]
    pub auto_close: bool,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    // Pending timer is dropped, and thereby cancelled, whenever the
    // message changes or the banner unmounts.
    use_effect_with((props.message.clone(), props.auto_close), {
        let on_close = props.on_close.clone();
        move |(message, auto_close)| {
            let timer = (*auto_close && !message.is_empty())
                .then(|| on_close.clone())
                .flatten()
                .map(|on_close| Timeout::new(AUTO_DISMISS_MS, move || on_close.emit(())));
            move || drop(timer)
        }
    });

    if props.message.is_empty() {
        return html! {};
    }

    let close_button = props.on_close.clone().map(|on_close| {
        html! {
            <button
                class="ml-auto rounded-full p-1 hover:bg-gray-200"
                aria-label="Close"
                onclick={Callback::from(move |_| on_close.emit(()))}
            >
                { "\u{2715}" }
            </button>
        }
    });

    html! {
        <div class={format!("border-l-4 p-4 mb-4 rounded-r-md shadow-sm {}", props.kind.container_class())} role="alert">
            <div class="flex items-center justify-between">
                <p class="text-sm font-medium">{ &props.message }</p>
                { for close_button }
            </div>
        </div>
    }
}
