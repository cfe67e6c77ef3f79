//! HTML output
//!
//! Serializes bound element trees and wraps rendered components in their
//! host element.

pub mod config;
pub mod element;
pub mod html;

pub use config::ElementConfig;
pub use element::render_component_element;
pub use html::render_html;
