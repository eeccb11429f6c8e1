//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its data fetch and delegates shared chrome to
//! `components`. Which page renders is decided by the session crate's route
//! guard in `app`.

pub mod accounts;
pub mod dashboard;
pub mod login;
pub mod trade;
pub mod trade_history;
