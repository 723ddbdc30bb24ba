//! Web server module.
//!
//! Serves the task list UI: the page routes, the static asset mount, and the
//! health endpoint.

mod server;
pub mod templates;

pub use server::{WebHandle, WebServer, start_server};
