//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the authenticated shell chrome and shared page states,
//! reading the session from Leptos context.

pub mod fetch_status;
pub mod layout;
pub mod nav_bar;
