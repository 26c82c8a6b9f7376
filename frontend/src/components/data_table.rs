use std::rc::Rc;

use shared::table::DEFAULT_PAGE_SIZE;
use shared::TableRecord;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_table_state::use_table_state;

/// One table header. Sortable headers toggle the sort on click.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: AttrValue,
    pub label: AttrValue,
    pub sortable: bool,
}

impl Column {
    pub fn new(key: impl Into<AttrValue>, label: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
        }
    }

    pub fn fixed(key: impl Into<AttrValue>, label: impl Into<AttrValue>) -> Self {
        Self {
            sortable: false,
            ..Self::new(key, label)
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<R: PartialEq + 'static> {
    pub records: Rc<Vec<R>>,
    pub columns: Vec<Column>,
    /// Renders one `<tr>` for a visible record
    pub render_row: Callback<R, Html>,
    #[prop_or(DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or(AttrValue::from("Search across all columns..."))]
    pub search_placeholder: AttrValue,
    #[prop_or(AttrValue::from("No records found"))]
    pub empty_message: AttrValue,
}

/// Searchable, sortable, paginated list of any [`TableRecord`].
#[function_component(DataTable)]
pub fn data_table<R>(props: &DataTableProps<R>) -> Html
where
    R: TableRecord + Clone + PartialEq + 'static,
{
    let table = use_table_state(props.page_size);
    let view = table.state.present(props.records.as_slice());

    let on_search = {
        let on_search = table.actions.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    let on_prev = {
        let on_prev = table.actions.on_prev.clone();
        let total_pages = view.total_pages;
        Callback::from(move |_: MouseEvent| on_prev.emit(total_pages))
    };

    let on_next = {
        let on_next = table.actions.on_next.clone();
        let total_pages = view.total_pages;
        Callback::from(move |_: MouseEvent| on_next.emit(total_pages))
    };

    let column_count = props.columns.len();

    html! {
        <div class="data-table">
            <div class="data-table-search">
                <input
                    type="text"
                    class="search-input"
                    placeholder={props.search_placeholder.clone()}
                    value={table.state.search.clone()}
                    oninput={on_search}
                />
            </div>

            <div class="table-container">
                <table class="records-table">
                    <thead>
                        <tr>
                            {for props.columns.iter().map(|column| {
                                if column.sortable {
                                    let on_sort = table.actions.on_sort.clone();
                                    let key = column.key.to_string();
                                    let onclick = Callback::from(move |_: MouseEvent| {
                                        on_sort.emit(key.clone())
                                    });
                                    let indicator = table.state.sort.indicator(&column.key);
                                    html! {
                                        <th>
                                            <button type="button" class="sort-header" {onclick}>
                                                {column.label.clone()}
                                                <span class="sort-indicator">{indicator}</span>
                                            </button>
                                        </th>
                                    }
                                } else {
                                    html! { <th>{column.label.clone()}</th> }
                                }
                            })}
                        </tr>
                    </thead>
                    <tbody>
                        {if props.loading {
                            html! {
                                <tr>
                                    <td class="loading" colspan={column_count.to_string()}>
                                        {"Loading..."}
                                    </td>
                                </tr>
                            }
                        } else if view.is_empty() {
                            html! {
                                <tr>
                                    <td class="empty" colspan={column_count.to_string()}>
                                        {props.empty_message.clone()}
                                    </td>
                                </tr>
                            }
                        } else {
                            html! {
                                {for view.rows.iter().map(|record| {
                                    props.render_row.emit((*record).clone())
                                })}
                            }
                        }}
                    </tbody>
                </table>
            </div>

            <div class="pagination">
                <span class="pagination-summary">{view.summary()}</span>
                <div class="pagination-controls">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        disabled={!view.has_prev()}
                        onclick={on_prev}
                    >
                        {"Previous"}
                    </button>
                    <div class="pagination-pages">
                        {for view.page_numbers().into_iter().map(|page| {
                            let on_page = table.actions.on_page.clone();
                            let onclick = Callback::from(move |_: MouseEvent| on_page.emit(page));
                            let active = (page == view.page).then_some("active");
                            html! {
                                <button
                                    type="button"
                                    key={page}
                                    class={classes!("page-number", active)}
                                    {onclick}
                                >
                                    {page.to_string()}
                                </button>
                            }
                        })}
                    </div>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        disabled={!view.has_next()}
                        onclick={on_next}
                    >
                        {"Next"}
                    </button>
                </div>
            </div>
        </div>
    }
}
