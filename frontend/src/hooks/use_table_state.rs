use std::rc::Rc;

use shared::TableState;
use yew::prelude::*;

pub enum TableAction {
    Search(String),
    Sort(String),
    Page(usize),
    /// Step forward; carries the current total page count
    Next(usize),
    /// Step back; carries the current total page count
    Prev(usize),
}

#[derive(Clone, PartialEq, Default)]
struct TableModel(TableState);

impl Reducible for TableModel {
    type Action = TableAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            TableAction::Search(term) => state.set_search(term),
            TableAction::Sort(field) => state.toggle_sort(&field),
            TableAction::Page(page) => state.set_page(page),
            TableAction::Next(total_pages) => state.next_page(total_pages),
            TableAction::Prev(total_pages) => {
                state.clamp_page(total_pages);
                state.prev_page();
            }
        }
        Rc::new(TableModel(state))
    }
}

#[derive(Clone, PartialEq)]
pub struct TableActions {
    pub on_search: Callback<String>,
    pub on_sort: Callback<String>,
    pub on_page: Callback<usize>,
    pub on_next: Callback<usize>,
    pub on_prev: Callback<usize>,
}

pub struct UseTableStateResult {
    pub state: TableState,
    pub actions: TableActions,
}

/// Search, sort and page state for one list. Reducer-backed so rapid clicks
/// always apply to the latest state.
#[hook]
pub fn use_table_state(page_size: usize) -> UseTableStateResult {
    let model = use_reducer(move || TableModel(TableState::with_page_size(page_size)));
    let dispatcher = model.dispatcher();

    let on_search = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |term: String| dispatcher.dispatch(TableAction::Search(term)))
    };
    let on_sort = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |field: String| dispatcher.dispatch(TableAction::Sort(field)))
    };
    let on_page = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |page: usize| dispatcher.dispatch(TableAction::Page(page)))
    };
    let on_next = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |total: usize| dispatcher.dispatch(TableAction::Next(total)))
    };
    let on_prev =
        Callback::from(move |total: usize| dispatcher.dispatch(TableAction::Prev(total)));

    UseTableStateResult {
        state: model.0.clone(),
        actions: TableActions {
            on_search,
            on_sort,
            on_page,
            on_next,
            on_prev,
        },
    }
}
