//! Client state modules.
//!
//! DESIGN
//! ======
//! The only shared state is the session; page data is fetched per page and
//! kept local to it.

pub mod session;
