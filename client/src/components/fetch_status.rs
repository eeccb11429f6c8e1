//! Loading / error placeholders shared by the data pages.

use leptos::prelude::*;
use session::ApiError;

/// Message shown when a page's read fails.
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected { status: 401, .. } => "Your session has expired. Sign in again.".to_owned(),
        ApiError::Rejected { message, .. } => message.clone(),
        ApiError::Transport(_) | ApiError::Decode(_) => format!("Could not load data: {err}"),
    }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! { <p class="fetch-status fetch-status--loading">"Loading..."</p> }
}

#[component]
pub fn FetchError(error: ApiError) -> impl IntoView {
    view! { <p class="fetch-status fetch-status--error">{error_message(&error)}</p> }
}

#[component]
pub fn Empty(text: &'static str) -> impl IntoView {
    view! { <p class="fetch-status fetch-status--empty">{text}</p> }
}
