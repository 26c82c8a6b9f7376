use std::rc::Rc;

use shared::Transaction;
use yew::prelude::*;

use super::edit_transaction_modal::EditTransactionModal;
use super::transaction_list::transaction_columns;
use crate::components::data_table::{Column, DataTable};

#[derive(Properties, PartialEq)]
pub struct EditTransactionsProps {
    pub transactions: Rc<Vec<Transaction>>,
    pub loading: bool,
    pub updating: bool,
    pub page_size: usize,
    pub on_update: Callback<(Transaction, Callback<()>)>,
}

/// Transaction list with an edit action on every row.
#[function_component(EditTransactions)]
pub fn edit_transactions(props: &EditTransactionsProps) -> Html {
    let editing = use_state(|| Option::<Transaction>::None);

    let mut columns = transaction_columns();
    columns.push(Column::fixed("actions", "Actions"));

    let render_row = {
        let editing = editing.clone();
        Callback::from(move |tx: Transaction| {
            let on_edit = {
                let editing = editing.clone();
                let tx = tx.clone();
                Callback::from(move |_: MouseEvent| editing.set(Some(tx.clone())))
            };
            html! {
                <tr key={tx.transaction_id.clone()}>
                    <td class="date">{tx.formatted_date()}</td>
                    <td>{&tx.devotee_name}</td>
                    <td>{&tx.devotee_email}</td>
                    <td>{&tx.service_name}</td>
                    <td class="amount">{tx.formatted_amount()}</td>
                    <td>{&tx.payment_method}</td>
                    <td class="notes">{&tx.notes}</td>
                    <td class="row-actions">
                        <button type="button" class="btn btn-secondary" onclick={on_edit}>{"Edit"}</button>
                    </td>
                </tr>
            }
        })
    };

    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    html! {
        <section class="edit-transactions">
            <DataTable<Transaction>
                records={props.transactions.clone()}
                columns={columns}
                render_row={render_row}
                page_size={props.page_size}
                loading={props.loading}
                empty_message="No transactions found"
            />
            if let Some(tx) = (*editing).clone() {
                <EditTransactionModal
                    transaction={tx}
                    saving={props.updating}
                    on_save={props.on_update.clone()}
                    on_close={on_close}
                />
            }
        </section>
    }
}
