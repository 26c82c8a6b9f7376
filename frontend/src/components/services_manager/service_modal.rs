use shared::validation::{validate_service, FormErrors};
use shared::Service;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceModalMode {
    Add,
    /// The name is the row's identity and stays fixed while editing
    Edit(Service),
}

#[derive(Properties, PartialEq)]
pub struct ServiceModalProps {
    pub mode: ServiceModalMode,
    pub saving: bool,
    pub on_save: Callback<(Service, Callback<()>)>,
    pub on_close: Callback<()>,
}

#[function_component(ServiceModal)]
pub fn service_modal(props: &ServiceModalProps) -> Html {
    let initial = match &props.mode {
        ServiceModalMode::Add => Service::default(),
        ServiceModalMode::Edit(service) => service.clone(),
    };
    let is_edit = matches!(props.mode, ServiceModalMode::Edit(_));

    let group = use_state(|| initial.group.clone());
    let name = use_state(|| initial.name.clone());
    let price = use_state(|| initial.price.clone());
    let errors = use_state(FormErrors::new);

    let on_group_input = {
        let group = group.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            group.set(input.value());
        })
    };

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_price_input = {
        let price = price.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            price.set(input.value());
        })
    };

    let on_submit = {
        let group = group.clone();
        let name = name.clone();
        let price = price.clone();
        let errors = errors.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(found) = validate_service(&name, &group) {
                errors.set(found);
                return;
            }
            errors.set(FormErrors::new());
            let service = Service {
                name: (*name).clone(),
                price: (*price).clone(),
                group: (*group).clone(),
            };
            on_save.emit((service, on_close.clone()));
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3 class="modal-title">{if is_edit { "Edit Service" } else { "Add Service" }}</h3>
                <form class="modal-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="service-group">{"Category *"}</label>
                        <input
                            id="service-group"
                            type="text"
                            placeholder="Enter category"
                            value={(*group).clone()}
                            oninput={on_group_input}
                            disabled={props.saving}
                        />
                        if let Some(error) = errors.get("group") {
                            <p class="field-error">{error}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="service-name">{"Name *"}</label>
                        <input
                            id="service-name"
                            type="text"
                            placeholder="Enter service name"
                            value={(*name).clone()}
                            oninput={on_name_input}
                            disabled={props.saving || is_edit}
                        />
                        if let Some(error) = errors.get("name") {
                            <p class="field-error">{error}</p>
                        }
                    </div>

                    <div class="form-group">
                        <label for="service-price">{"Price"}</label>
                        <input
                            id="service-price"
                            type="text"
                            placeholder="e.g. $51 or Contact office"
                            value={(*price).clone()}
                            oninput={on_price_input}
                            disabled={props.saving}
                        />
                    </div>

                    <div class="modal-buttons">
                        <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.saving}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={props.saving}>
                            {if props.saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
