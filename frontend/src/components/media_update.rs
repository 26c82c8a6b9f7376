use shared::gateway::MediaUpdateRequest;
use shared::validation::{validate_media_update, FormErrors};
use shared::{Record, TableRecord};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::hooks::use_media::use_media;
use crate::hooks::use_session::use_app_context;
use crate::services::logging::Logger;

/// Website slots the media gateway accepts.
const MEDIA_SECTIONS: [&str; 4] = ["Home Banner", "Gallery", "Events", "Announcements"];

/// One column per field seen on any entry, labelled by its name.
fn media_columns(entries: &[Record]) -> Vec<Column> {
    Record::column_keys(entries, "id")
        .into_iter()
        .map(|key| Column::new(key.clone(), key))
        .collect()
}

#[function_component(MediaUpdate)]
pub fn media_update() -> Html {
    let ctx = use_app_context();
    let section = use_state(|| MEDIA_SECTIONS[0].to_string());
    let title = use_state(String::new);
    let url = use_state(String::new);
    let description = use_state(String::new);
    let errors = use_state(FormErrors::new);
    let is_saving = use_state(|| false);
    let media = use_media(&ctx.api);

    let columns = media_columns(&media.state.entries);
    let render_row = {
        let keys: Vec<AttrValue> = columns.iter().map(|column| column.key.clone()).collect();
        Callback::from(move |entry: Record| {
            html! {
                <tr key={entry.id.clone()}>
                    {for keys.iter().map(|key| html! {
                        <td>{entry.field(key).search_text().unwrap_or_default()}</td>
                    })}
                </tr>
            }
        })
    };

    let on_section_change = {
        let section = section.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            section.set(select.value());
        })
    };

    let on_title_input = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_url_input = {
        let url = url.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            url.set(input.value());
        })
    };

    let on_description_input = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(area.value());
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let section = section.clone();
        let title = title.clone();
        let url = url.clone();
        let description = description.clone();
        let errors = errors.clone();
        let is_saving = is_saving.clone();
        let refresh = media.refresh.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_saving {
                return;
            }
            if let Err(found) = validate_media_update(&title, &url) {
                errors.set(found);
                return;
            }
            errors.set(FormErrors::new());

            let request = MediaUpdateRequest {
                section: (*section).clone(),
                title: title.trim().to_string(),
                url: url.trim().to_string(),
                description: description.trim().to_string(),
            };
            is_saving.set(true);
            let ctx = ctx.clone();
            let title = title.clone();
            let url = url.clone();
            let description = description.clone();
            let is_saving = is_saving.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match ctx.api.update_media(&request).await {
                    Ok(message) => {
                        ctx.toast.success.emit(message);
                        title.set(String::new());
                        url.set(String::new());
                        description.set(String::new());
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "media_update",
                            &format!("Update failed: {}", e),
                        );
                        ctx.toast.error.emit(e.user_message_or("Failed to update media"));
                    }
                }
                is_saving.set(false);
            });
        })
    };

    html! {
        <section class="media-update">
            <h3>{"Website Media Update"}</h3>
            <form class="media-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="media-section">{"Section"}</label>
                    <select id="media-section" onchange={on_section_change} disabled={*is_saving}>
                        {for MEDIA_SECTIONS.iter().map(|name| html! {
                            <option value={*name} selected={*name == section.as_str()}>
                                {*name}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="media-title">{"Title *"}</label>
                    <input
                        id="media-title"
                        type="text"
                        value={(*title).clone()}
                        oninput={on_title_input}
                        disabled={*is_saving}
                    />
                    if let Some(error) = errors.get("title") {
                        <p class="field-error">{error}</p>
                    }
                </div>

                <div class="form-group">
                    <label for="media-url">{"Media URL *"}</label>
                    <input
                        id="media-url"
                        type="url"
                        placeholder="https://"
                        value={(*url).clone()}
                        oninput={on_url_input}
                        disabled={*is_saving}
                    />
                    if let Some(error) = errors.get("url") {
                        <p class="field-error">{error}</p>
                    }
                </div>

                <div class="form-group">
                    <label for="media-description">{"Description"}</label>
                    <textarea
                        id="media-description"
                        rows="3"
                        value={(*description).clone()}
                        oninput={on_description_input}
                        disabled={*is_saving}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_saving}>
                    {if *is_saving { "Saving..." } else { "Update Media" }}
                </button>
            </form>

            <h3>{"Current Media"}</h3>
            <DataTable<Record>
                records={media.state.entries.clone()}
                {columns}
                {render_row}
                page_size={ctx.config.page_size}
                loading={media.state.loading}
                search_placeholder="Search media..."
                empty_message="No media entries yet"
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_media_columns_follow_entry_fields() {
        let entries = vec![
            Record::new("m1")
                .with("id", "m1")
                .with("title", "Diwali")
                .with("url", "https://x/a.jpg"),
            Record::new("m2").with("section", "Events"),
        ];
        let keys: Vec<String> = media_columns(&entries)
            .iter()
            .map(|column| column.key.to_string())
            .collect();
        assert_eq!(keys, vec!["section", "title", "url"]);
        assert!(media_columns(&[]).is_empty());
    }
}
