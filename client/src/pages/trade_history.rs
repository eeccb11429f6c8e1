//! Trade history for one batch: units that have been stopped and removed.

#[cfg(test)]
#[path = "trade_history_test.rs"]
mod trade_history_test;

use leptos::prelude::*;

use crate::components::fetch_status::{Empty, FetchError, Loading};
use crate::net::api::fetch_units;
use crate::net::types::Unit;
use crate::state::session::use_session;
use crate::util::format::short_timestamp;

/// Deleted units of `batch_id`, most recently deleted first.
pub fn history_units(units: Vec<Unit>, batch_id: &str) -> Vec<Unit> {
    let mut history: Vec<Unit> = units
        .into_iter()
        .filter(|unit| unit.is_deleted() && unit.batch_id.as_deref() == Some(batch_id))
        .collect();
    // ISO-8601 strings sort chronologically.
    history.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
    history
}

#[component]
pub fn TradeHistoryPage(batch_id: String) -> impl IntoView {
    let ctx = use_session();
    let auth = ctx.authenticator();
    let base_url = ctx.config.api_base_url.clone();
    let filter_id = batch_id.clone();
    let units = LocalResource::new(move || {
        let auth = auth.clone();
        let base_url = base_url.clone();
        let batch_id = filter_id.clone();
        async move { fetch_units(&base_url, &auth, false).await.map(|units| history_units(units, &batch_id)) }
    });

    view! {
        <section class="card trade-history">
            <h1 class="card__title">"Trade History"</h1>
            <p class="card__subtitle">"Batch ID: " <span class="mono">{batch_id}</span></p>
            <Suspense fallback=move || view! { <Loading/> }>
                {move || {
                    units
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! { <Empty text="No deleted units for this batch"/> }.into_any()
                            }
                            Ok(list) => render_units(list).into_any(),
                            Err(error) => view! { <FetchError error=error/> }.into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}

fn render_units(units: Vec<Unit>) -> impl IntoView {
    let rows = units
        .into_iter()
        .map(|unit| {
            view! {
                <tr>
                    <td>{unit.symbol.clone()}</td>
                    <td>{unit.size_label()}</td>
                    <td>{short_timestamp(unit.created_at.as_deref())}</td>
                    <td>{short_timestamp(unit.deleted_at.as_deref())}</td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Symbol"</th>
                    <th>"Size"</th>
                    <th>"Started"</th>
                    <th>"Deleted"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
