use serde::{Deserialize, Serialize};

/// Kind of a node in a location tree snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeItemKind {
    Location,
    Item,
}

/// One node of the hierarchical location/item tree returned by
/// `GET /v1/locations/tree`. Items are leaves; only locations nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TreeItemKind,
    #[serde(default)]
    pub children: Vec<TreeItem>,
}

impl TreeItem {
    pub fn is_location(&self) -> bool {
        self.kind == TreeItemKind::Location
    }

    /// Child nodes that are themselves locations
    pub fn location_children(&self) -> impl Iterator<Item = &TreeItem> {
        self.children.iter().filter(|child| child.is_location())
    }
}

/// Flat listing entry from `GET /v1/locations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub item_count: Option<i64>,
}

/// Location shape returned by creation and embedded in item payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Single-location detail from `GET /v1/locations/{id}`, with its parent
/// when the location is nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<LocationSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub location: Option<LocationSummary>,
}

/// One page of item search results from `GET /v1/items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<ItemSummary>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl ItemPage {
    /// Whether the backend holds more items than this page covers
    pub fn more_available(&self) -> bool {
        self.total > self.page * self.page_size
    }
}
