//! Accounts page listing the user's exchange integration accounts.

use leptos::prelude::*;

use crate::components::fetch_status::{Empty, FetchError, Loading};
use crate::net::api::fetch_accounts;
use crate::net::types::IntegrationAccount;
use crate::state::session::use_session;
use crate::util::format::short_timestamp;

#[component]
pub fn AccountsPage() -> impl IntoView {
    let ctx = use_session();
    let auth = ctx.authenticator();
    let base_url = ctx.config.api_base_url.clone();
    let accounts = LocalResource::new(move || {
        let auth = auth.clone();
        let base_url = base_url.clone();
        async move { fetch_accounts(&base_url, &auth).await }
    });

    view! {
        <section class="card accounts">
            <h1 class="card__title">"Accounts"</h1>
            <p class="card__subtitle">"Manage your integration accounts"</p>
            <Suspense fallback=move || view! { <Loading/> }>
                {move || {
                    accounts
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => view! { <Empty text="No accounts yet"/> }.into_any(),
                            Ok(list) => render_accounts(list).into_any(),
                            Err(error) => view! { <FetchError error=error/> }.into_any(),
                        })
                }}
            </Suspense>
        </section>
    }
}

fn render_accounts(accounts: Vec<IntegrationAccount>) -> impl IntoView {
    let rows = accounts
        .into_iter()
        .map(|account| {
            view! {
                <tr>
                    <td>{account.label()}</td>
                    <td class="mono">{account.masked_api_key()}</td>
                    <td>{account.batch_id.clone().unwrap_or_else(|| "-".to_owned())}</td>
                    <td>{account.proxy.clone().unwrap_or_else(|| "-".to_owned())}</td>
                    <td>{short_timestamp(account.created_at.as_deref())}</td>
                </tr>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Account"</th>
                    <th>"API key"</th>
                    <th>"Batch"</th>
                    <th>"Proxy"</th>
                    <th>"Created"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
