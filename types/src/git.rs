//! Build metadata domain types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Build metadata assembled from the configured values.
///
/// Every field is optional: a value that was never configured serializes
/// as `null` rather than being an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BuildMetadata {
    /// Branch the artifact was built from
    pub branch: Option<String>,
    /// Full commit id
    pub commit_id: Option<String>,
    /// Commit timestamp, kept as the free-form string it was recorded as
    pub commit_time: Option<String>,
    /// Tags pointing at the commit
    pub tags: Option<String>,
    /// Short commit message
    pub message: Option<String>,
}

/// Raw key/value contents of the bundled properties resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PropertiesBag(pub HashMap<String, String>);

impl PropertiesBag {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for PropertiesBag {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Summary view over the properties resource.
///
/// Present only when the resource could be loaded at process startup;
/// endpoints report its absence as `null`, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GitProperties {
    pub branch: Option<String>,
    pub commit_id: Option<String>,
    pub commit_time: Option<String>,
}

impl GitProperties {
    /// Build the summary view from the well-known keys of a raw bag.
    pub fn from_bag(bag: &PropertiesBag) -> Self {
        Self {
            branch: bag.get("git.branch").map(str::to_string),
            commit_id: bag.get("git.commit.id").map(str::to_string),
            commit_time: bag.get("git.commit.time").map(str::to_string),
        }
    }
}
