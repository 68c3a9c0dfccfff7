//! HTML templates for course pages and content items

pub mod engine;
pub mod rendering;

pub use engine::TemplateEngine;
pub use rendering::{escape_html, interpolate_template, wrap_in_base};
