//! Package version lookup.

use std::collections::{BTreeMap, HashMap};

/// Resolves a package namespace to its version string.
///
/// The version ends up in the `v=` query parameter of locally served
/// component-suite scripts.
pub trait PackageVersions: Send + Sync {
    /// Version of the package owning `namespace`, if known.
    fn version(&self, namespace: &str) -> Option<String>;
}

impl PackageVersions for HashMap<String, String> {
    fn version(&self, namespace: &str) -> Option<String> {
        self.get(namespace).cloned()
    }
}

impl PackageVersions for BTreeMap<String, String> {
    fn version(&self, namespace: &str) -> Option<String> {
        self.get(namespace).cloned()
    }
}

impl<F> PackageVersions for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn version(&self, namespace: &str) -> Option<String> {
        self(namespace)
    }
}
