//! Data binding for templates
//!
//! Templates mark the places that receive data with attributes:
//!
//! ```text
//! <h1 data-path="sampleText"></h1>
//! <img data-path-src="sampleImage.src" data-path-alt="sampleImage.alt">
//! ```
//!
//! `data-path` sets the element's text, `data-path-<attr>` sets attribute
//! `<attr>`. The data comes from whichever source [`select_data`] picks.

mod binder;
pub mod data;
pub mod marker;

pub use binder::{bind_fragment, bind_template};
pub use data::{select_data, DataMap, DataSourceKind, DataSources, ResolvedData};
pub use marker::{KeyPath, Marker};
