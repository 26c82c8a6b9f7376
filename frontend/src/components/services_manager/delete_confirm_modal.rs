use shared::Service;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DeleteConfirmModalProps {
    pub service: Service,
    pub deleting: bool,
    pub on_confirm: Callback<Service>,
    pub on_cancel: Callback<()>,
}

#[function_component(DeleteConfirmModal)]
pub fn delete_confirm_modal(props: &DeleteConfirmModalProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        let service = props.service.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(service.clone()))
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal modal-small">
                <h3 class="modal-title">{"Delete Service"}</h3>
                <p>
                    {"Are you sure you want to delete "}
                    <strong>{&props.service.name}</strong>
                    {"? This cannot be undone."}
                </p>
                <div class="modal-buttons">
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.deleting}>
                        {"Cancel"}
                    </button>
                    <button type="button" class="btn btn-danger" onclick={on_confirm} disabled={props.deleting}>
                        {if props.deleting { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
