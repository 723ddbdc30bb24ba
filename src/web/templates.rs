//! HTML templates for the web pages.
//!
//! Templates are embedded at compile time using `include_str!` and filled by
//! placeholder substitution at render time.

/// The task list page template. Placeholder: `{{tasks}}`.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// The edit form page template. Placeholders: `{{index}}`, `{{description}}`.
pub const EDIT_TEMPLATE: &str = include_str!("templates/edit.html");
