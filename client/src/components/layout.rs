//! Authenticated shell: navigation bar above the routed page.

use leptos::prelude::*;

use crate::components::nav_bar::NavBar;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            <NavBar/>
            <main class="layout__main">{children()}</main>
        </div>
    }
}
