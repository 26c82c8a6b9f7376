use shared::validation::{validate_transaction_edit, FormErrors};
use shared::Transaction;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

const PAYMENT_METHODS: [&str; 5] = ["Cash", "Check", "Credit Card", "Zelle", "Other"];

#[derive(Properties, PartialEq)]
pub struct EditTransactionModalProps {
    pub transaction: Transaction,
    pub saving: bool,
    pub on_save: Callback<(Transaction, Callback<()>)>,
    pub on_close: Callback<()>,
}

#[function_component(EditTransactionModal)]
pub fn edit_transaction_modal(props: &EditTransactionModalProps) -> Html {
    let devotee_name = use_state(|| props.transaction.devotee_name.clone());
    let devotee_email = use_state(|| props.transaction.devotee_email.clone());
    let service_name = use_state(|| props.transaction.service_name.clone());
    let amount = use_state(|| format!("{:.2}", props.transaction.amount));
    let payment_method = use_state(|| props.transaction.payment_method.clone());
    let notes = use_state(|| props.transaction.notes.clone());
    let errors = use_state(FormErrors::new);

    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_payment_change = {
        let payment_method = payment_method.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            payment_method.set(select.value());
        })
    };

    let on_notes_input = {
        let notes = notes.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            notes.set(area.value());
        })
    };

    let on_submit = {
        let original = props.transaction.clone();
        let devotee_name = devotee_name.clone();
        let devotee_email = devotee_email.clone();
        let service_name = service_name.clone();
        let amount = amount.clone();
        let payment_method = payment_method.clone();
        let notes = notes.clone();
        let errors = errors.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let parsed = match validate_transaction_edit(&devotee_name, &amount) {
                Ok(value) => value,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };
            errors.set(FormErrors::new());

            let edited = Transaction {
                devotee_name: devotee_name.trim().to_string(),
                devotee_email: devotee_email.trim().to_string(),
                service_name: service_name.trim().to_string(),
                amount: parsed,
                payment_method: (*payment_method).clone(),
                notes: (*notes).clone(),
                ..original.clone()
            };
            on_save.emit((edited, on_close.clone()));
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3 class="modal-title">{"Edit Transaction"}</h3>
                <p class="modal-subtitle">{format!("{} · {}", props.transaction.transaction_id, props.transaction.formatted_date())}</p>
                <form class="modal-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="tx-devotee-name">{"Devotee Name *"}</label>
                        <input
                            id="tx-devotee-name"
                            type="text"
                            value={(*devotee_name).clone()}
                            oninput={text_input(&devotee_name)}
                            disabled={props.saving}
                        />
                        if let Some(error) = errors.get("DevoteeName") {
                            <p class="field-error">{error}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="tx-devotee-email">{"Devotee Email"}</label>
                        <input
                            id="tx-devotee-email"
                            type="email"
                            value={(*devotee_email).clone()}
                            oninput={text_input(&devotee_email)}
                            disabled={props.saving}
                        />
                    </div>

                    <div class="form-group">
                        <label for="tx-service">{"Service"}</label>
                        <input
                            id="tx-service"
                            type="text"
                            value={(*service_name).clone()}
                            oninput={text_input(&service_name)}
                            disabled={props.saving}
                        />
                    </div>

                    <div class="form-group">
                        <label for="tx-amount">{"Amount *"}</label>
                        <input
                            id="tx-amount"
                            type="text"
                            inputmode="decimal"
                            value={(*amount).clone()}
                            oninput={text_input(&amount)}
                            disabled={props.saving}
                        />
                        if let Some(error) = errors.get("Amount") {
                            <p class="field-error">{error}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="tx-payment">{"Payment Method"}</label>
                        <select id="tx-payment" onchange={on_payment_change} disabled={props.saving}>
                            {for PAYMENT_METHODS.iter().map(|method| html! {
                                <option value={*method} selected={*method == payment_method.as_str()}>{*method}</option>
                            })}
                            if !payment_method.is_empty() && !PAYMENT_METHODS.contains(&payment_method.as_str()) {
                                <option value={(*payment_method).clone()} selected=true>{(*payment_method).clone()}</option>
                            }
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="tx-notes">{"Notes"}</label>
                        <textarea
                            id="tx-notes"
                            rows="3"
                            value={(*notes).clone()}
                            oninput={on_notes_input}
                            disabled={props.saving}
                        />
                    </div>

                    <div class="modal-buttons">
                        <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.saving}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.saving}>
                            {if props.saving { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
