//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! background refresh) from page and component logic.

pub mod auth;
pub mod format;
pub mod storage;
pub mod timer;
