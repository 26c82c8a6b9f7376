use std::rc::Rc;

use shared::{replace_transaction, Transaction};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_toast::ToastActions;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub enum TransactionsAction {
    Loaded(Vec<Transaction>),
    /// A confirmed edit, applied to whatever list is current
    Replaced(Transaction),
}

#[derive(Clone, PartialEq, Default)]
struct TransactionsModel(Rc<Vec<Transaction>>);

impl Reducible for TransactionsModel {
    type Action = TransactionsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let list = match action {
            TransactionsAction::Loaded(list) => list,
            TransactionsAction::Replaced(edited) => replace_transaction(&self.0, &edited),
        };
        Rc::new(TransactionsModel(Rc::new(list)))
    }
}

#[derive(Clone, PartialEq)]
pub struct TransactionState {
    pub transactions: Rc<Vec<Transaction>>,
    pub loading: bool,
    pub updating: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseTransactionsActions {
    pub refresh: Callback<()>,
    pub update: Callback<(Transaction, Callback<()>)>,
}

pub struct UseTransactionsResult {
    pub state: TransactionState,
    pub actions: UseTransactionsActions,
}

#[hook]
pub fn use_transactions(api_client: &ApiClient, toast: &ToastActions) -> UseTransactionsResult {
    let transactions = use_reducer(TransactionsModel::default);
    let loading = use_state(|| true);
    let updating = use_state(|| false);

    let refresh = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let dispatcher = transactions.dispatcher();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let toast = toast.clone();
            let dispatcher = dispatcher.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_transactions().await {
                    Ok(list) => {
                        Logger::debug_with_component(
                            "use_transactions",
                            &format!("Loaded {} transactions", list.len()),
                        );
                        dispatcher.dispatch(TransactionsAction::Loaded(list));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_transactions",
                            &format!("Failed to fetch transactions: {}", e),
                        );
                        toast.error.emit(e.user_message_or("Failed to load transactions"));
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    // The edited row is swapped in only once the gateway confirms
    let update = {
        let api_client = api_client.clone();
        let toast = toast.clone();
        let dispatcher = transactions.dispatcher();
        let updating = updating.clone();

        use_callback((), move |(edited, on_saved): (Transaction, Callback<()>), _| {
            let api_client = api_client.clone();
            let toast = toast.clone();
            let dispatcher = dispatcher.clone();
            let updating = updating.clone();

            spawn_local(async move {
                updating.set(true);
                let outcome = api_client.update_transaction(&edited).await;
                match outcome {
                    Ok(message) => {
                        dispatcher.dispatch(TransactionsAction::Replaced(edited));
                        toast.success.emit(message);
                        on_saved.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_transactions",
                            &format!("Failed to update {}: {}", edited.transaction_id, e),
                        );
                        toast.error.emit(e.user_message_or("Failed to update transaction"));
                    }
                }
                updating.set(false);
            });
        })
    };

    UseTransactionsResult {
        state: TransactionState {
            transactions: transactions.0.clone(),
            loading: *loading,
            updating: *updating,
        },
        actions: UseTransactionsActions { refresh, update },
    }
}
