//! Root application component with the session context and route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app opens the session store once, provides it through context, starts
//! the token refresh installer and renders exactly one of two views: the
//! login page while signed out, or the navigation shell around the routed
//! page while signed in. Route selection is `session::resolve`, so the guard
//! re-evaluates whenever the path or the session changes.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::Router;
use leptos_router::hooks::use_location;
use session::{Route, resolve};

use crate::components::layout::Layout;
use crate::pages::{
    accounts::AccountsPage, dashboard::DashboardPage, login::LoginPage, trade::TradePage,
    trade_history::TradeHistoryPage,
};
use crate::state::session::{SessionContext, client_config, use_session};
use crate::util::auth::install_token_refresh;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = SessionContext::open(client_config());
    install_token_refresh(&ctx);
    provide_context(ctx);

    view! {
        <Title text="Backpack"/>

        <Router>
            <GuardedView/>
        </Router>
    }
}

#[component]
fn GuardedView() -> impl IntoView {
    let session = use_session().session;
    let pathname = use_location().pathname;
    let route = Memo::new(move |_| {
        let pathname = pathname.get();
        session.with(|s| resolve(&pathname, s))
    });

    move || match route.get() {
        Route::Login => view! { <LoginPage/> }.into_any(),
        page => view! { <Layout>{render_page(page)}</Layout> }.into_any(),
    }
}

fn render_page(route: Route) -> AnyView {
    match route {
        Route::Dashboard => view! { <DashboardPage/> }.into_any(),
        Route::Accounts => view! { <AccountsPage/> }.into_any(),
        Route::Trade => view! { <TradePage/> }.into_any(),
        Route::TradeHistory { batch_id } => view! { <TradeHistoryPage batch_id=batch_id/> }.into_any(),
        Route::NotFound | Route::Login => view! { <p class="not-found">"Page not found."</p> }.into_any(),
    }
}
