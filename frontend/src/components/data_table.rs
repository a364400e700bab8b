use shared::HasId;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;

pub const PAGE_SIZE: usize = 10;

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Half-open index range of the records shown on `page` (1-based).
pub fn page_bounds(page: usize, len: usize) -> (usize, usize) {
    let start = page.saturating_sub(1) * PAGE_SIZE;
    (start.min(len), (start + PAGE_SIZE).min(len))
}

/// Rendering a record the table knows nothing about: the record itself
/// answers for its named fields. Columns with a custom `render` never
/// reach `cell`.
pub trait TableRecord: HasId {
    fn cell(&self, key: &str) -> Html;
}

/// Column descriptor: a named field, or a custom pure formatting
/// function from record to display value.
#[derive(Clone, PartialEq)]
pub struct Column<T> {
    pub key: &'static str,
    pub header: &'static str,
    pub render: Option<fn(&T) -> Html>,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, header: &'static str) -> Self {
        Self { key, header, render: None }
    }

    pub fn rendered(key: &'static str, header: &'static str, render: fn(&T) -> Html) -> Self {
        Self { key, header, render: Some(render) }
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<T>
where
    T: TableRecord + Clone + PartialEq + 'static,
{
    pub columns: Vec<Column<T>>,
    pub data: Vec<T>,
    /// When set, the `id` column and a per-row "View" action link to the
    /// record's detail route.
    #[prop_or_default]
    pub link_to: Option<fn(i64) -> Route>,
    #[prop_or_default]
    pub on_edit: Option<Callback<T>>,
    #[prop_or_default]
    pub on_delete: Option<Callback<i64>>,
    /// Per-row action renderer; fully replaces the default edit/delete
    /// buttons when present.
    #[prop_or_default]
    pub actions: Option<Callback<T, Html>>,
}

/// Paginated, column-driven table over any homogeneous record list. Holds
/// only its own page state and reports interaction intents upward; it
/// performs no network calls and no mutation.
#[function_component]
pub fn DataTable<T>(props: &DataTableProps<T>) -> Html
where
    T: TableRecord + Clone + PartialEq + 'static,
{
    let current_page = use_state(|| 1usize);
    let pages = total_pages(props.data.len());
    // Stay in range when the list shrinks under us (e.g. after a delete).
    let page = (*current_page).clamp(1, pages.max(1));
    let (start, end) = page_bounds(page, props.data.len());

    let go_to = {
        let current_page = current_page.clone();
        Callback::from(move |target: usize| current_page.set(target))
    };

    let rows: Html = props.data[start..end]
        .iter()
        .map(|record| {
            let id = record.record_id();
            let cells: Html = props
                .columns
                .iter()
                .map(|column| {
                    let content = match (column.key, props.link_to) {
                        ("id", Some(link)) => html! {
                            <Link<Route> to={link(id)} classes="text-blue-600 hover:text-blue-900">
                                { record.cell(column.key) }
                            </Link<Route>>
                        },
                        _ => match column.render {
                            Some(render) => render(record),
                            None => record.cell(column.key),
                        },
                    };
                    html! { <td class="px-6 py-4 whitespace-nowrap">{ content }</td> }
                })
                .collect();

            let view_link = props.link_to.map(|link| {
                html! {
                    <Link<Route> to={link(id)} classes="text-indigo-600 hover:text-indigo-900">
                        { "View" }
                    </Link<Route>>
                }
            });
            let controls = match &props.actions {
                Some(actions) => actions.emit(record.clone()),
                None => {
                    let edit = props.on_edit.as_ref().map(|on_edit| {
                        let on_edit = on_edit.clone();
                        let record = record.clone();
                        html! {
                            <button
                                class="text-blue-600 hover:text-blue-900"
                                onclick={Callback::from(move |_| on_edit.emit(record.clone()))}
                            >
                                { "Edit" }
                            </button>
                        }
                    });
                    let delete = props.on_delete.as_ref().map(|on_delete| {
                        let on_delete = on_delete.clone();
                        html! {
                            <button
                                class="text-red-600 hover:text-red-900"
                                onclick={Callback::from(move |_| on_delete.emit(id))}
                            >
                                { "Delete" }
                            </button>
                        }
                    });
                    html! { <>{ for edit }{ for delete }</> }
                }
            };

            html! {
                <tr key={id.to_string()} class="hover:bg-gray-50">
                    { cells }
                    <td class="px-6 py-4 whitespace-nowrap text-right text-sm font-medium">
                        <div class="flex justify-end space-x-2">
                            { for view_link }
                            { controls }
                        </div>
                    </td>
                </tr>
            }
        })
        .collect();

    let pagination = (pages > 1).then(|| {
        let page_buttons: Html = (1..=pages)
            .map(|target| {
                let class = if target == page {
                    "relative inline-flex items-center px-4 py-2 border border-blue-500 bg-blue-50 text-sm font-medium text-blue-600"
                } else {
                    "relative inline-flex items-center px-4 py-2 border border-gray-300 bg-white text-sm font-medium text-gray-500 hover:bg-gray-50"
                };
                let go_to = go_to.clone();
                html! {
                    <button {class} onclick={Callback::from(move |_| go_to.emit(target))}>
                        { target }
                    </button>
                }
            })
            .collect();
        let prev = {
            let go_to = go_to.clone();
            Callback::from(move |_| go_to.emit(page - 1))
        };
        let next = {
            let go_to = go_to.clone();
            Callback::from(move |_| go_to.emit(page + 1))
        };
        html! {
            <div class="px-6 py-3 flex items-center justify-between border-t border-gray-200">
                <p class="text-sm text-gray-700">
                    { format!("Showing {} to {} of {} results", start + 1, end, props.data.len()) }
                </p>
                <nav class="relative z-0 inline-flex rounded-md shadow-sm -space-x-px">
                    <button
                        class="relative inline-flex items-center px-3 py-2 rounded-l-md border border-gray-300 bg-white text-sm font-medium text-gray-500 hover:bg-gray-50 disabled:opacity-50"
                        disabled={page == 1}
                        onclick={prev}
                    >
                        { "Previous" }
                    </button>
                    { page_buttons }
                    <button
                        class="relative inline-flex items-center px-3 py-2 rounded-r-md border border-gray-300 bg-white text-sm font-medium text-gray-500 hover:bg-gray-50 disabled:opacity-50"
                        disabled={page == pages}
                        onclick={next}
                    >
                        { "Next" }
                    </button>
                </nav>
            </div>
        }
    });

    html! {
        <div class="overflow-x-auto shadow-md rounded-lg">
            <table class="min-w-full divide-y divide-gray-200">
                <thead class="bg-gray-50">
                    <tr>
                        { for props.columns.iter().map(|column| html! {
                            <th scope="col" class="px-6 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider">
                                { column.header }
                            </th>
                        }) }
                        <th scope="col" class="relative px-6 py-3">
                            <span class="sr-only">{ "Actions" }</span>
                        </th>
                    </tr>
                </thead>
                <tbody class="bg-white divide-y divide-gray-200">
                    { rows }
                </tbody>
            </table>
            { for pagination }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling_of_len_over_page_size() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(25), 3);
        assert_eq!(total_pages(30), 3);
    }

    #[test]
    fn test_page_bounds_first_page_and_remainder() {
        assert_eq!(page_bounds(1, 25), (0, 10));
        assert_eq!(page_bounds(2, 25), (10, 20));
        assert_eq!(page_bounds(3, 25), (20, 25));
    }

    #[test]
    fn test_page_bounds_out_of_range_pages_are_inert() {
        // Page 0 behaves like page 1, pages past the end yield an empty slice.
        assert_eq!(page_bounds(0, 25), (0, 10));
        assert_eq!(page_bounds(4, 25), (25, 25));
        assert_eq!(page_bounds(1, 0), (0, 0));
    }
}
