use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entity in the query schema, as listed on the overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ResourceDetails>,
}

impl Resource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Resource {
            name: name.into(),
            url: url.into(),
            description: description.into(),
            details: None,
        }
    }

    pub fn with_details(self, details: ResourceDetails) -> Self {
        Resource {
            details: Some(details),
            ..self
        }
    }

    pub fn field_count(&self) -> usize {
        self.details.as_ref().map_or(0, |d| d.fields.len())
    }
}

/// Field schema served by the schema endpoint for a single resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: BTreeMap<String, Field>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_details: Option<FieldDetails>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub incompatible_fields: Vec<String>,
}

/// Sparse per-field metadata. Everything but `description` is discarded on normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_resources: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filterable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_repeated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectable_with: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,
}

impl FieldDetails {
    /// Only the description survives.
    pub fn pruned(&self) -> FieldDetails {
        FieldDetails {
            description: self.description.clone(),
            ..Default::default()
        }
    }
}

/// Schema payloads carry values outside these sets; those decode as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Attribute,
    Metric,
    Segment,
    Resource,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "INT64")]
    Int64,
    #[serde(rename = "DOUBLE")]
    Double,
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "RESOURCE_NAME")]
    ResourceName,
    #[serde(rename = "ENUM")]
    Enum,
    #[serde(rename = "BOOLEAN")]
    Boolean,
    #[serde(rename = "MESSAGE")]
    Message,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "INT32")]
    Int32,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "UINT64")]
    Uint64,
    #[serde(rename = "OTHER", other)]
    Other,
}

/// `null` in the payload reads as the member's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
