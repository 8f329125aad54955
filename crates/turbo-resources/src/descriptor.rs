//! Registration descriptors and column-form expansion.

use serde::{Deserialize, Serialize};

use crate::error::ResourceError;
use crate::html::is_valid_attribute_name;
use crate::resource::{Attributes, Resource, ResourceKind};

/// A user-supplied asset: either a bare URL or a full attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralResource {
    /// `https://cdn.example.com/file.js`
    Url(String),
    /// `{ src = "...", integrity = "...", crossorigin = "anonymous" }`
    Attributes(Attributes),
}

impl LiteralResource {
    /// Build the resource for this literal.
    pub fn to_resource(&self, kind: ResourceKind) -> Resource {
        match self {
            Self::Url(url) => Resource::from_url(kind, url.clone()),
            Self::Attributes(attributes) => Resource::from_attributes(kind, attributes.clone()),
        }
    }

    /// Check that every attribute key is a valid HTML attribute name.
    pub fn validate(&self) -> Result<(), ResourceError> {
        let Self::Attributes(attributes) = self else {
            return Ok(());
        };
        match attributes.keys().find(|key| !is_valid_attribute_name(key)) {
            Some(key) => Err(ResourceError::InvalidAttributeName(key.clone())),
            None => Ok(()),
        }
    }
}

impl From<&str> for LiteralResource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for LiteralResource {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<Attributes> for LiteralResource {
    fn from(attributes: Attributes) -> Self {
        Self::Attributes(attributes)
    }
}

/// A descriptor field holding either one value or one value per resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Sequence, indexed positionally in column form.
    Many(Vec<T>),
    /// Scalar, broadcast to every resource.
    One(T),
}

impl<T> OneOrMany<T> {
    fn column_len(&self) -> Option<usize> {
        match self {
            Self::Many(values) => Some(values.len()),
            Self::One(_) => None,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(String::from).collect())
    }
}

impl From<bool> for OneOrMany<bool> {
    fn from(value: bool) -> Self {
        Self::One(value)
    }
}

/// Assets bundled by a component library.
///
/// Either record form (one resource, all fields scalar) or column form
/// (sequences of length N, producing N resources).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_package_path: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_package_path: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<OneOrMany<bool>>,
}

/// One expanded row of a dependency descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRecord {
    pub external_url: Option<String>,
    pub relative_package_path: Option<String>,
    pub dev_package_path: Option<String>,
    pub namespace: Option<String>,
    pub dynamic: bool,
}

impl DependencyRecord {
    /// Build the resource for this row.
    pub fn to_resource(&self, kind: ResourceKind) -> Resource {
        let mut resource = Resource::new(kind).with_dynamic(self.dynamic);
        if let Some(url) = &self.external_url {
            resource = resource.with_external_url(url.clone());
        }
        if let Some(path) = &self.relative_package_path {
            resource = resource.with_relative_package_path(path.clone());
        }
        if let Some(path) = &self.dev_package_path {
            resource = resource.with_dev_package_path(path.clone());
        }
        if let Some(namespace) = &self.namespace {
            resource = resource.with_namespace(namespace.clone());
        }
        resource
    }
}

impl DependencySpec {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the external (CDN) URL, one per row or shared.
    pub fn with_external_url(mut self, value: impl Into<OneOrMany<String>>) -> Self {
        self.external_url = Some(value.into());
        self
    }

    /// Set the package-relative path, one per row or shared.
    pub fn with_relative_package_path(mut self, value: impl Into<OneOrMany<String>>) -> Self {
        self.relative_package_path = Some(value.into());
        self
    }

    /// Set the development bundle path, one per row or shared.
    pub fn with_dev_package_path(mut self, value: impl Into<OneOrMany<String>>) -> Self {
        self.dev_package_path = Some(value.into());
        self
    }

    /// Set the owning package namespace, one per row or shared.
    pub fn with_namespace(mut self, value: impl Into<OneOrMany<String>>) -> Self {
        self.namespace = Some(value.into());
        self
    }

    /// Set the dynamic flag, one per row or shared.
    pub fn with_dynamic(mut self, value: impl Into<OneOrMany<bool>>) -> Self {
        self.dynamic = Some(value.into());
        self
    }

    /// Number of rows when in column form, `None` for record form.
    ///
    /// Sequences of length 1 broadcast like scalars. The longest sequence
    /// sets the row count and every other sequence must match it.
    pub fn column_count(&self) -> Result<Option<usize>, ResourceError> {
        let lengths = [
            ("external_url", self.external_url.as_ref().and_then(OneOrMany::column_len)),
            (
                "relative_package_path",
                self.relative_package_path.as_ref().and_then(OneOrMany::column_len),
            ),
            (
                "dev_package_path",
                self.dev_package_path.as_ref().and_then(OneOrMany::column_len),
            ),
            ("namespace", self.namespace.as_ref().and_then(OneOrMany::column_len)),
            ("dynamic", self.dynamic.as_ref().and_then(OneOrMany::column_len)),
        ];

        let Some(expected) = lengths
            .iter()
            .filter_map(|(_, len)| *len)
            .max()
            .filter(|len| *len > 1)
        else {
            return Ok(None);
        };

        for (field, len) in lengths {
            match len {
                Some(found) if found != 1 && found != expected => {
                    return Err(ResourceError::ColumnLengthMismatch {
                        field,
                        expected,
                        found,
                    });
                }
                _ => {}
            }
        }

        Ok(Some(expected))
    }

    /// Expand into one record per resource, in order.
    pub fn records(&self) -> Result<Vec<DependencyRecord>, ResourceError> {
        let rows = self.column_count()?.unwrap_or(1);
        Ok((0..rows).map(|i| self.record_at(i)).collect())
    }

    fn record_at(&self, index: usize) -> DependencyRecord {
        DependencyRecord {
            external_url: pick(&self.external_url, index),
            relative_package_path: pick(&self.relative_package_path, index),
            dev_package_path: pick(&self.dev_package_path, index),
            namespace: pick(&self.namespace, index),
            dynamic: pick(&self.dynamic, index).unwrap_or(false),
        }
    }
}

fn pick<T: Clone>(value: &Option<OneOrMany<T>>, index: usize) -> Option<T> {
    match value {
        None => None,
        Some(OneOrMany::One(v)) => Some(v.clone()),
        Some(OneOrMany::Many(values)) if values.len() == 1 => values.first().cloned(),
        Some(OneOrMany::Many(values)) => values.get(index).cloned(),
    }
}

/// Anything that can be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// User-supplied external asset.
    Literal(LiteralResource),
    /// Library-bundled asset(s).
    Dependency(DependencySpec),
}

impl Descriptor {
    /// Expand into resources without touching any registry.
    pub fn to_resources(&self, kind: ResourceKind) -> Result<Vec<Resource>, ResourceError> {
        match self {
            Self::Literal(literal) => {
                literal.validate()?;
                Ok(vec![literal.to_resource(kind)])
            }
            Self::Dependency(spec) => Ok(spec
                .records()?
                .iter()
                .map(|record| record.to_resource(kind))
                .collect()),
        }
    }
}

impl From<LiteralResource> for Descriptor {
    fn from(literal: LiteralResource) -> Self {
        Self::Literal(literal)
    }
}

impl From<DependencySpec> for Descriptor {
    fn from(spec: DependencySpec) -> Self {
        Self::Dependency(spec)
    }
}

impl From<&str> for Descriptor {
    fn from(url: &str) -> Self {
        Self::Literal(url.into())
    }
}

impl From<String> for Descriptor {
    fn from(url: String) -> Self {
        Self::Literal(url.into())
    }
}

impl From<Attributes> for Descriptor {
    fn from(attributes: Attributes) -> Self {
        Self::Literal(attributes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_form_yields_one_record() {
        let spec = DependencySpec::new()
            .with_relative_package_path("fake.min.js")
            .with_dev_package_path("fake.dev.js")
            .with_external_url("https://fake.external.url/hello.js")
            .with_namespace("dash_whatever");

        let records = spec.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_package_path.as_deref(), Some("fake.min.js"));
        assert_eq!(records[0].namespace.as_deref(), Some("dash_whatever"));
        assert!(!records[0].dynamic);
    }

    #[test]
    fn test_column_form_indexes_and_broadcasts() {
        let spec = DependencySpec::new()
            .with_relative_package_path(vec!["a.js", "b.js", "c.js"])
            .with_external_url(vec!["https://x/a.js", "https://x/b.js", "https://x/c.js"])
            .with_namespace("lib");

        let records = spec.records().unwrap();
        assert_eq!(records.len(), 3);
        for (record, name) in records.iter().zip(["a", "b", "c"]) {
            assert_eq!(record.relative_package_path.as_deref(), Some(format!("{name}.js").as_str()));
            assert_eq!(record.external_url.as_deref(), Some(format!("https://x/{name}.js").as_str()));
            assert_eq!(record.namespace.as_deref(), Some("lib"));
        }
    }

    #[test]
    fn test_single_element_sequence_broadcasts() {
        let spec = DependencySpec::new()
            .with_relative_package_path(vec!["a.js", "b.js"])
            .with_namespace(vec!["lib"]);

        let records = spec.records().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.namespace.as_deref() == Some("lib")));
    }

    #[test]
    fn test_dynamic_column() {
        let spec = DependencySpec::new()
            .with_relative_package_path(vec!["a.js", "b.js"])
            .with_dynamic(vec![false, true]);

        let records = spec.records().unwrap();
        assert!(!records[0].dynamic);
        assert!(records[1].dynamic);
    }

    #[test]
    fn test_mismatched_columns_rejected() {
        let spec = DependencySpec::new()
            .with_relative_package_path(vec!["a.js", "b.js", "c.js"])
            .with_external_url(vec!["https://x/a.js", "https://x/b.js"]);

        let err = spec.records().unwrap_err();
        assert_eq!(
            err,
            ResourceError::ColumnLengthMismatch {
                field: "external_url",
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn test_longest_column_sets_row_count() {
        let spec = DependencySpec::new()
            .with_external_url(vec!["https://x/a.js", "https://x/b.js"])
            .with_relative_package_path(vec!["a.js", "b.js", "c.js"])
            .with_namespace(vec!["lib"]);

        assert_eq!(
            spec.column_count().unwrap_err(),
            ResourceError::ColumnLengthMismatch {
                field: "external_url",
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn test_empty_sequence_next_to_column_rejected() {
        let spec = DependencySpec::new()
            .with_relative_package_path(vec!["a.js", "b.js"])
            .with_dev_package_path(Vec::<String>::new());

        assert!(matches!(
            spec.records(),
            Err(ResourceError::ColumnLengthMismatch { found: 0, .. })
        ));
    }

    #[test]
    fn test_empty_sequence_alone_is_absent() {
        let spec = DependencySpec::new()
            .with_relative_package_path("a.js")
            .with_dev_package_path(Vec::<String>::new());

        let records = spec.records().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].dev_package_path.is_none());
    }

    #[test]
    fn test_deserialize_column_form_from_json() {
        let spec: DependencySpec = serde_json::from_str(
            r#"{
                "relative_package_path": ["a.min.js", "b.min.js"],
                "namespace": "dash_core",
                "dynamic": true
            }"#,
        )
        .unwrap();

        assert_eq!(spec.column_count().unwrap(), Some(2));
        assert_eq!(spec.namespace, Some(OneOrMany::One("dash_core".to_string())));
        assert_eq!(spec.dynamic, Some(OneOrMany::One(true)));
    }

    #[test]
    fn test_literal_deserializes_url_or_attributes() {
        let url: LiteralResource = serde_json::from_str(r#""https://x/a.css""#).unwrap();
        assert_eq!(url, LiteralResource::Url("https://x/a.css".to_string()));

        let attrs: LiteralResource =
            serde_json::from_str(r#"{"href": "https://x/a.css", "media": "print"}"#).unwrap();
        match attrs {
            LiteralResource::Attributes(map) => {
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                assert_eq!(keys, ["href", "media"]);
            }
            other => panic!("expected attributes, got {other:?}"),
        }
    }

    #[test]
    fn test_descriptor_literal_expands_to_one_resource() {
        let resources = Descriptor::from("https://x/a.js")
            .to_resources(ResourceKind::Script)
            .unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].external_url(), Some("https://x/a.js"));
    }
}
