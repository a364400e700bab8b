//! Shared list lifecycle for the entity pages.
//!
//! Every listing page does the same dance: fetch on mount, show a loading
//! row, hold a failed load as a standing error until a reload succeeds,
//! and patch the list in place after a create, update, or delete instead
//! of refetching. Routing all of those
//! transitions through one reducer keeps the async callbacks from closing
//! over stale snapshots of the list.

use std::future::Future;
use std::rc::Rc;

use shared::HasId;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::alert::AlertMessage;
use crate::services::api::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T: Clone + PartialEq> {
    pub items: Vec<T>,
    pub is_loading: bool,
    /// Set when the list itself could not be loaded. Pages render this in
    /// place of the table; only a reload clears it. Distinct from `alert`,
    /// which carries transient mutation outcomes.
    pub load_error: Option<String>,
    pub alert: Option<AlertMessage>,
}

impl<T: Clone + PartialEq> Default for ListState<T> {
    fn default() -> Self {
        Self { items: Vec::new(), is_loading: true, load_error: None, alert: None }
    }
}

pub enum ListAction<T> {
    BeginFetch,
    Loaded(Vec<T>),
    FetchFailed(String),
    Append(T),
    /// Replace the item with the same id; no-op when the id is absent.
    Replace(T),
    Remove(i64),
    Notify(AlertMessage),
    DismissAlert,
}

impl<T: HasId + Clone + PartialEq> Reducible for ListState<T> {
    type Action = ListAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ListAction::BeginFetch => {
                next.is_loading = true;
                next.load_error = None;
            }
            ListAction::Loaded(items) => {
                next.items = items;
                next.is_loading = false;
                next.load_error = None;
            }
            ListAction::FetchFailed(message) => {
                next.is_loading = false;
                next.load_error = Some(message);
            }
            ListAction::Append(item) => {
                next.items.push(item);
            }
            ListAction::Replace(item) => {
                if let Some(slot) =
                    next.items.iter_mut().find(|existing| existing.record_id() == item.record_id())
                {
                    *slot = item;
                }
            }
            ListAction::Remove(id) => {
                next.items.retain(|existing| existing.record_id() != id);
            }
            ListAction::Notify(alert) => {
                next.alert = Some(alert);
            }
            ListAction::DismissAlert => {
                next.alert = None;
            }
        }
        Rc::new(next)
    }
}

pub struct EntityList<T: HasId + Clone + PartialEq + 'static> {
    pub state: UseReducerHandle<ListState<T>>,
    pub reload: Callback<()>,
}

impl<T: HasId + Clone + PartialEq + 'static> EntityList<T> {
    pub fn append(&self, item: T) {
        self.state.dispatch(ListAction::Append(item));
    }

    pub fn replace(&self, item: T) {
        self.state.dispatch(ListAction::Replace(item));
    }

    pub fn remove(&self, id: i64) {
        self.state.dispatch(ListAction::Remove(id));
    }

    pub fn notify(&self, alert: AlertMessage) {
        self.state.dispatch(ListAction::Notify(alert));
    }

    pub fn dismiss_alert(&self) -> Callback<()> {
        let state = self.state.clone();
        Callback::from(move |_| state.dispatch(ListAction::DismissAlert))
    }
}

impl<T: HasId + Clone + PartialEq + 'static> Clone for EntityList<T> {
    fn clone(&self) -> Self {
        Self { state: self.state.clone(), reload: self.reload.clone() }
    }
}

/// Fetches once on mount and exposes the list plus in-place mutations.
/// `loader` runs again whenever `reload` is emitted.
#[hook]
pub fn use_entity_list<T, F, Fut>(loader: F) -> EntityList<T>
where
    T: HasId + Clone + PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let state = use_reducer(ListState::<T>::default);
    let loader = use_memo((), move |_| loader);

    let reload = {
        let state = state.clone();
        let loader = loader.clone();
        Callback::from(move |_: ()| {
            state.dispatch(ListAction::BeginFetch);
            let state = state.clone();
            let future = (loader)();
            spawn_local(async move {
                match future.await {
                    Ok(items) => state.dispatch(ListAction::Loaded(items)),
                    Err(error) => state.dispatch(ListAction::FetchFailed(error.to_string())),
                }
            });
        })
    };

    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    EntityList { state, reload }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        label: String,
    }

    impl HasId for Row {
        fn record_id(&self) -> i64 {
            self.id
        }
    }

    fn row(id: i64, label: &str) -> Row {
        Row { id, label: label.to_string() }
    }

    fn apply(state: ListState<Row>, action: ListAction<Row>) -> ListState<Row> {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn test_loaded_replaces_items_and_clears_loading() {
        let state = apply(ListState::default(), ListAction::Loaded(vec![row(1, "a")]));
        assert!(!state.is_loading);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_fetch_failure_sets_standing_load_error() {
        let state = apply(ListState::default(), ListAction::FetchFailed("boom".to_string()));
        assert!(!state.is_loading);
        assert_eq!(state.load_error.as_deref(), Some("boom"));
        assert!(state.alert.is_none());
    }

    #[test]
    fn test_failed_load_stays_distinct_from_an_empty_successful_load() {
        // Auto-dismissing the banner must not erase the failure; an empty
        // result set and a failed fetch render differently.
        let failed = apply(
            apply(ListState::default(), ListAction::FetchFailed("boom".to_string())),
            ListAction::DismissAlert,
        );
        let empty = apply(ListState::default(), ListAction::Loaded(Vec::new()));
        assert_ne!(failed, empty);
        assert!(failed.load_error.is_some());
        assert!(empty.load_error.is_none());
    }

    #[test]
    fn test_reload_clears_a_previous_load_error() {
        let failed = apply(ListState::default(), ListAction::FetchFailed("boom".to_string()));
        let retrying = apply(failed, ListAction::BeginFetch);
        assert!(retrying.load_error.is_none());
        assert!(retrying.is_loading);
    }

    #[test]
    fn test_replace_swaps_matching_id_only() {
        let state = apply(
            ListState { items: vec![row(1, "a"), row(2, "b")], is_loading: false, load_error: None, alert: None },
            ListAction::Replace(row(2, "patched")),
        );
        assert_eq!(state.items[0].label, "a");
        assert_eq!(state.items[1].label, "patched");
    }

    #[test]
    fn test_replace_with_unknown_id_is_a_no_op() {
        let initial =
            ListState { items: vec![row(1, "a")], is_loading: false, load_error: None, alert: None };
        let state = apply(initial.clone(), ListAction::Replace(row(9, "ghost")));
        assert_eq!(state.items, initial.items);
    }

    #[test]
    fn test_remove_drops_matching_id() {
        let state = apply(
            ListState { items: vec![row(1, "a"), row(2, "b")], is_loading: false, load_error: None, alert: None },
            ListAction::Remove(1),
        );
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 2);
    }

    #[test]
    fn test_append_keeps_existing_items() {
        let state = apply(
            ListState { items: vec![row(1, "a")], is_loading: false, load_error: None, alert: None },
            ListAction::Append(row(2, "b")),
        );
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn test_dismiss_clears_alert() {
        let with_alert = apply(
            ListState::default(),
            ListAction::Notify(AlertMessage::success("saved")),
        );
        assert!(with_alert.alert.is_some());
        let state = apply(with_alert, ListAction::DismissAlert);
        assert!(state.alert.is_none());
    }
}
