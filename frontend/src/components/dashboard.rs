use std::rc::Rc;

use shared::{unique_devotees, DashboardTab, Devotee};
use yew::prelude::*;

use crate::components::media_update::MediaUpdate;
use crate::components::transactions::{DevoteeSearch, EditTransactions, TransactionList};
use crate::hooks::use_session::use_app_context;
use crate::hooks::use_transactions::use_transactions;
use crate::services::logging::Logger;

/// Open tab plus the devotee picked on the Find Devotee tab.
#[derive(Debug, Clone, PartialEq, Default)]
struct Selection {
    tab: Option<DashboardTab>,
    devotee: Option<Devotee>,
}

impl Selection {
    /// Switching tabs drops the devotee picked on the previous one.
    fn with_tab(&self, tab: DashboardTab) -> Self {
        Selection {
            tab: Some(tab),
            devotee: None,
        }
    }

    fn with_devotee(&self, devotee: Devotee) -> Self {
        Selection {
            tab: self.tab,
            devotee: Some(devotee),
        }
    }
}

/// Admin dashboard. Only the tabs the signed-in role may open are rendered.
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let ctx = use_app_context();
    let tabs = ctx.session.visible_tabs();
    let selection = use_state(|| Selection {
        tab: tabs.first().copied(),
        devotee: None,
    });
    let transactions = use_transactions(&ctx.api, &ctx.toast);

    let devotees: Rc<Vec<Devotee>> =
        use_memo(transactions.state.transactions.clone(), |list| unique_devotees(list));

    // A stale tab (role changed under us) falls back to the first allowed one
    let current = match selection.tab {
        Some(tab) if tabs.contains(&tab) => Some(tab),
        _ => tabs.first().copied(),
    };

    let on_select_devotee = {
        let selection = selection.clone();
        Callback::from(move |devotee: Devotee| selection.set(selection.with_devotee(devotee)))
    };

    let on_new_devotee = Callback::from(|name: String| {
        Logger::info_with_component("dashboard", &format!("No transactions yet for '{}'", name));
    });

    let page_size = ctx.config.page_size;
    let panel = match current {
        Some(DashboardTab::FindDevotee) => html! {
            <div class="find-devotee">
                <h3>{"Search Devotee"}</h3>
                <DevoteeSearch
                    devotees={devotees.clone()}
                    on_select={on_select_devotee}
                    on_new_name={on_new_devotee}
                />
                if let Some(devotee) = selection.devotee.clone() {
                    <TransactionList
                        transactions={transactions.state.transactions.clone()}
                        loading={transactions.state.loading}
                        page_size={page_size}
                        devotee={devotee}
                    />
                }
            </div>
        },
        Some(DashboardTab::Transactions) => html! {
            <TransactionList
                transactions={transactions.state.transactions.clone()}
                loading={transactions.state.loading}
                page_size={page_size}
            />
        },
        Some(DashboardTab::EditTransactions) => html! {
            <EditTransactions
                transactions={transactions.state.transactions.clone()}
                loading={transactions.state.loading}
                updating={transactions.state.updating}
                page_size={page_size}
                on_update={transactions.actions.update.clone()}
            />
        },
        Some(DashboardTab::WebsiteMediaUpdate) => html! { <MediaUpdate /> },
        None => html! {
            <p class="home-note">{"No dashboard tools are available for your account."}</p>
        },
    };

    html! {
        <section class="dashboard">
            <div class="tabs" role="tablist">
                {for tabs.iter().copied().map(|tab| {
                    let selection = selection.clone();
                    let onclick =
                        Callback::from(move |_: MouseEvent| selection.set(selection.with_tab(tab)));
                    let class = if Some(tab) == current { "tab active" } else { "tab" };
                    html! {
                        <button type="button" role="tab" {class} {onclick}>{tab.label()}</button>
                    }
                })}
            </div>
            <div class="tab-panel" role="tabpanel">
                {panel}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_tab_change_clears_devotee() {
        let devotee = Devotee {
            name: "Lakshmi Rao".into(),
            email: "lrao@example.org".into(),
        };
        let picked = Selection::default()
            .with_tab(DashboardTab::FindDevotee)
            .with_devotee(devotee.clone());
        assert_eq!(picked.devotee, Some(devotee));

        let moved = picked.with_tab(DashboardTab::Transactions);
        assert_eq!(moved.tab, Some(DashboardTab::Transactions));
        assert!(moved.devotee.is_none());

        let back = moved.with_tab(DashboardTab::FindDevotee);
        assert!(back.devotee.is_none());
    }
}
