mod delete_confirm_modal;
mod service_modal;

use shared::Service;
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::hooks::use_services::use_services;
use crate::hooks::use_session::use_app_context;
use delete_confirm_modal::DeleteConfirmModal;
use service_modal::{ServiceModal, ServiceModalMode};

#[function_component(ServicesManager)]
pub fn services_manager() -> Html {
    let ctx = use_app_context();
    let services = use_services(&ctx.api, &ctx.toast);
    let modal = use_state(|| Option::<ServiceModalMode>::None);
    let delete_target = use_state(|| Option::<Service>::None);

    let columns = vec![
        Column::new("group", "Category"),
        Column::new("name", "Name"),
        Column::new("price", "Price"),
        Column::fixed("actions", "Actions"),
    ];

    let render_row = {
        let modal = modal.clone();
        let delete_target = delete_target.clone();
        let busy = services.state.deleting;

        Callback::from(move |service: Service| {
            let on_edit = {
                let modal = modal.clone();
                let service = service.clone();
                Callback::from(move |_: MouseEvent| {
                    modal.set(Some(ServiceModalMode::Edit(service.clone())))
                })
            };
            let on_delete = {
                let delete_target = delete_target.clone();
                let service = service.clone();
                Callback::from(move |_: MouseEvent| delete_target.set(Some(service.clone())))
            };

            html! {
                <tr key={service.name.clone()}>
                    <td>{&service.group}</td>
                    <td>{&service.name}</td>
                    <td>{&service.price}</td>
                    <td class="row-actions">
                        <button type="button" class="btn-icon" title="Edit" onclick={on_edit}>{"✏️"}</button>
                        <button type="button" class="btn-icon" title="Delete" onclick={on_delete} disabled={busy}>
                            {"🗑️"}
                        </button>
                    </td>
                </tr>
            }
        })
    };

    let on_add = {
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| modal.set(Some(ServiceModalMode::Add)))
    };

    let on_close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(None))
    };

    let on_cancel_delete = {
        let delete_target = delete_target.clone();
        Callback::from(move |_: ()| delete_target.set(None))
    };

    let on_confirm_delete = {
        let delete_target = delete_target.clone();
        let delete = services.actions.delete.clone();
        Callback::from(move |service: Service| {
            let delete_target = delete_target.clone();
            delete.emit((service, Callback::from(move |_: ()| delete_target.set(None))));
        })
    };

    html! {
        <section class="services-manager">
            <div class="section-header">
                <h2>{"Manage Services"}</h2>
                <button type="button" class="btn btn-primary" onclick={on_add}>{"+ Add Service"}</button>
            </div>
            <DataTable<Service>
                records={services.state.services.clone()}
                columns={columns}
                render_row={render_row}
                page_size={ctx.config.page_size}
                loading={services.state.loading}
                empty_message="No services found"
            />
            if let Some(mode) = (*modal).clone() {
                <ServiceModal
                    mode={mode}
                    saving={services.state.saving}
                    on_save={services.actions.save.clone()}
                    on_close={on_close_modal}
                />
            }
            if let Some(service) = (*delete_target).clone() {
                <DeleteConfirmModal
                    service={service}
                    deleting={services.state.deleting}
                    on_confirm={on_confirm_delete}
                    on_cancel={on_cancel_delete}
                />
            }
        </section>
    }
}
