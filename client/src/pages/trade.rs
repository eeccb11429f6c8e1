//! Trade page: account batches with their running units.
//!
//! Each batch links to its history page (`/trade/history/:batch_id`).

#[cfg(test)]
#[path = "trade_test.rs"]
mod trade_test;

use leptos::prelude::*;
use session::{ApiError, Route};

use crate::components::fetch_status::{Empty, FetchError, Loading};
use crate::net::api::{fetch_batches, fetch_units};
use crate::net::types::{Batch, Unit};
use crate::state::session::use_session;

/// Units whose `batch_id` matches `batch_id`, in server order.
pub fn units_in_batch<'a>(units: &'a [Unit], batch_id: &str) -> Vec<&'a Unit> {
    units.iter().filter(|unit| unit.batch_id.as_deref() == Some(batch_id)).collect()
}

pub fn history_href(batch: &Batch) -> String {
    Route::TradeHistory { batch_id: batch.id.clone() }.path()
}

#[component]
pub fn TradePage() -> impl IntoView {
    let ctx = use_session();
    let auth = ctx.authenticator();
    let base_url = ctx.config.api_base_url.clone();
    let overview = LocalResource::new(move || {
        let auth = auth.clone();
        let base_url = base_url.clone();
        async move {
            let batches = fetch_batches(&base_url, &auth).await?;
            let units = fetch_units(&base_url, &auth, true).await?;
            Ok::<_, ApiError>((batches, units))
        }
    });

    view! {
        <section class="card trade">
            <h1 class="card__title">"Trade"</h1>
            <p class="card__subtitle">"Batches and their active units"</p>
            <Suspense fallback=move || view! { <Loading/> }>
                {move || {
                    overview
                        .get()
                        .map(|result| match result {
                            Ok((batches, _)) if batches.is_empty() => {
                                view! { <Empty text="No batches yet"/> }.into_any()
                            }
                            Ok((batches, units)) => render_batches(batches, &units).into_any(),
                            Err(error) => view! { <FetchError error=error/> }.into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}

fn render_batches(batches: Vec<Batch>, units: &[Unit]) -> impl IntoView {
    batches
        .into_iter()
        .map(|batch| {
            let symbols = units_in_batch(units, &batch.id)
                .into_iter()
                .map(|unit| view! { <li class="batch__unit">{unit.symbol.clone()} " × " {unit.size_label()}</li> })
                .collect::<Vec<_>>();
            let count = symbols.len();
            view! {
                <article class="batch">
                    <header class="batch__header">
                        <h2 class="batch__name">{batch.name.clone()}</h2>
                        <span class="batch__count">{format!("{count} active")}</span>
                        <a class="batch__history" href=history_href(&batch)>"History"</a>
                    </header>
                    <ul class="batch__units">{symbols}</ul>
                </article>
            }
        })
        .collect::<Vec<_>>()
}
