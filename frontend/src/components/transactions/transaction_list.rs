use std::rc::Rc;

use shared::{Devotee, Transaction};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};

#[derive(Properties, PartialEq)]
pub struct TransactionListProps {
    pub transactions: Rc<Vec<Transaction>>,
    pub loading: bool,
    pub page_size: usize,
    /// Only this devotee's transactions when set
    #[prop_or_default]
    pub devotee: Option<Devotee>,
}

pub fn transaction_columns() -> Vec<Column> {
    vec![
        Column::new("TransactionDate", "Date"),
        Column::new("DevoteeName", "Devotee"),
        Column::new("DevoteeEmail", "Email"),
        Column::new("ServiceName", "Service"),
        Column::new("Amount", "Amount"),
        Column::new("PaymentMethod", "Payment"),
        Column::fixed("Notes", "Notes"),
    ]
}

#[function_component(TransactionList)]
pub fn transaction_list(props: &TransactionListProps) -> Html {
    let records = match &props.devotee {
        Some(devotee) => Rc::new(
            props
                .transactions
                .iter()
                .filter(|tx| devotee.matches(tx))
                .cloned()
                .collect::<Vec<_>>(),
        ),
        None => props.transactions.clone(),
    };

    let render_row = Callback::from(|tx: Transaction| {
        html! {
            <tr key={tx.transaction_id.clone()}>
                <td class="date">{tx.formatted_date()}</td>
                <td>{&tx.devotee_name}</td>
                <td>{&tx.devotee_email}</td>
                <td>{&tx.service_name}</td>
                <td class="amount">{tx.formatted_amount()}</td>
                <td>{&tx.payment_method}</td>
                <td class="notes">{&tx.notes}</td>
            </tr>
        }
    });

    html! {
        <section class="transactions-section">
            <DataTable<Transaction>
                records={records}
                columns={transaction_columns()}
                render_row={render_row}
                page_size={props.page_size}
                loading={props.loading}
                empty_message="No transactions found"
            />
        </section>
    }
}
