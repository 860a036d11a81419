//! Console services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session, form, and table logic so route handlers can
//! stay focused on protocol translation and calling the records API.

pub mod forms;
pub mod listing;
pub mod session;
