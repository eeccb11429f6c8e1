//! Dashboard landing page for signed-in users.

use leptos::prelude::*;

use crate::components::nav_bar::identity_label;
use crate::state::session::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session().session;

    view! {
        <section class="card dashboard">
            <h1 class="card__title">"Dashboard"</h1>
            <p class="card__subtitle">"Welcome to your dashboard overview"</p>
            <p class="dashboard__who">"Signed in as " {move || session.with(identity_label)}</p>
        </section>
    }
}
