//! Data-source selection and path lookup
//!
//! Three sources can feed a template: an override JSON string, data the
//! caller already fetched, and content-management fields. Exactly one is used
//! per render, picked in that order. Nothing is merged.

use std::fmt;

use serde_json::{Map, Value};

use super::marker::KeyPath;
use crate::error::DataError;

/// Key of the wrapped value in a field descriptor (`{"value": ...}`)
const FIELD_VALUE: &str = "value";

/// A JSON object keyed by field or data name
pub type DataMap = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Override,
    Fetched,
    Fields,
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSourceKind::Override => "override",
            DataSourceKind::Fetched => "fetched",
            DataSourceKind::Fields => "fields",
        })
    }
}

/// The data source selected for one render
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedData<'a> {
    /// Parsed override JSON, any JSON value
    Override(Value),
    Fetched(&'a DataMap),
    Fields(&'a DataMap),
}

impl<'a> ResolvedData<'a> {
    pub fn kind(&self) -> DataSourceKind {
        match self {
            ResolvedData::Override(_) => DataSourceKind::Override,
            ResolvedData::Fetched(_) => DataSourceKind::Fetched,
            ResolvedData::Fields(_) => DataSourceKind::Fields,
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        match self {
            ResolvedData::Override(value) => value.get(key),
            ResolvedData::Fetched(map) | ResolvedData::Fields(map) => map.get(key),
        }
    }

    /// Follow a dotted path through the data
    ///
    /// Each segment after the first is looked up in the current object, or
    /// inside its `value` when the object is a field descriptor, so both
    /// `image.value.src` and `image.src` reach the same leaf. A descriptor at
    /// the end of the path is unwrapped.
    pub fn resolve(&self, path: &KeyPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.get(first)?;
        for segment in rest {
            current = lookup(current, segment)?;
        }
        Some(unwrap_descriptor(current))
    }

    /// Resolve a path to the text a marker should receive
    ///
    /// Only strings, numbers and booleans produce text. Missing values,
    /// `null`, objects and arrays yield `None` and leave the marker unfilled.
    pub fn resolve_text(&self, path: &KeyPath) -> Option<String> {
        match self.resolve(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

fn lookup<'v>(current: &'v Value, segment: &str) -> Option<&'v Value> {
    let object = current.as_object()?;
    object.get(segment).or_else(|| {
        object
            .get(FIELD_VALUE)
            .and_then(Value::as_object)
            .and_then(|inner| inner.get(segment))
    })
}

fn unwrap_descriptor(value: &Value) -> &Value {
    match value.as_object().and_then(|o| o.get(FIELD_VALUE)) {
        Some(inner) => inner,
        None => value,
    }
}

/// Candidate data sources for a render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSources {
    pub override_data: Option<String>,
    pub fetched: Option<DataMap>,
    pub fields: Option<DataMap>,
}

impl DataSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, json: impl Into<String>) -> Self {
        self.override_data = Some(json.into());
        self
    }

    pub fn with_fetched(mut self, data: DataMap) -> Self {
        self.fetched = Some(data);
        self
    }

    pub fn with_fields(mut self, fields: DataMap) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn select(&self) -> Result<Option<ResolvedData<'_>>, DataError> {
        select_data(
            self.override_data.as_deref(),
            self.fetched.as_ref(),
            self.fields.as_ref(),
        )
    }
}

/// Pick the data source for a render: override, then fetched, then fields
///
/// An empty override string counts as absent. A non-empty override that is
/// not valid JSON is an error; it is never skipped in favor of a lower source.
pub fn select_data<'a>(
    override_data: Option<&str>,
    fetched: Option<&'a DataMap>,
    fields: Option<&'a DataMap>,
) -> Result<Option<ResolvedData<'a>>, DataError> {
    let selected = if let Some(json) = override_data.filter(|s| !s.is_empty()) {
        let value = serde_json::from_str(json)
            .map_err(|err| DataError::invalid_override(json, err))?;
        Some(ResolvedData::Override(value))
    } else if let Some(data) = fetched {
        Some(ResolvedData::Fetched(data))
    } else {
        fields.map(ResolvedData::Fields)
    };

    match &selected {
        Some(data) => tracing::debug!(source = %data.kind(), "selected data source"),
        None => tracing::debug!("no data source, template renders unbound"),
    }
    Ok(selected)
}
