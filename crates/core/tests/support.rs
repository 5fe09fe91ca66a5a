// Shared by the workflow test binaries; not every helper is used by each.
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use homebox_core::{
    InventoryClient, ItemPage, ItemSummary, Location, LocationDetails, LocationSummary,
    RemoteResult, TreeItem, TreeItemKind,
};

pub fn location(id: &str, name: &str, children: Vec<TreeItem>) -> TreeItem {
    TreeItem {
        id: id.to_string(),
        name: name.to_string(),
        kind: TreeItemKind::Location,
        children,
    }
}

pub fn item(id: &str, name: &str) -> TreeItem {
    TreeItem {
        id: id.to_string(),
        name: name.to_string(),
        kind: TreeItemKind::Item,
        children: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLocation {
    pub name: String,
    pub parent_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub name: String,
    pub location_id: String,
    pub description: Option<String>,
}

/// In-memory `InventoryClient` that serves a fixed snapshot and records
/// every remote call, so tests can assert exactly which calls a workflow
/// made and in what order.
#[derive(Default)]
pub struct RecordingClient {
    tree: Vec<TreeItem>,
    items: Vec<ItemSummary>,
    pub calls: Mutex<Vec<&'static str>>,
    pub created_locations: Mutex<Vec<CreatedLocation>>,
    pub created_items: Mutex<Vec<CreatedItem>>,
    pub quantity_updates: Mutex<Vec<(String, i64)>>,
    next_id: Mutex<u64>,
}

impl RecordingClient {
    pub fn with_tree(tree: Vec<TreeItem>) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    pub fn with_tree_and_items(tree: Vec<TreeItem>, items: Vec<ItemSummary>) -> Self {
        Self {
            tree,
            items,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| **call == name).count()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn fresh_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("created-{next}")
    }
}

#[async_trait]
impl InventoryClient for RecordingClient {
    async fn location_tree(&self, _with_items: bool) -> RemoteResult<Vec<TreeItem>> {
        self.record("location_tree");
        Ok(self.tree.clone())
    }

    async fn list_locations(&self, _filter_children: Option<bool>) -> RemoteResult<Vec<Location>> {
        self.record("list_locations");
        Ok(Vec::new())
    }

    async fn create_location(
        &self,
        name: &str,
        parent_id: Option<&str>,
        description: Option<&str>,
    ) -> RemoteResult<LocationSummary> {
        self.record("create_location");
        self.created_locations.lock().unwrap().push(CreatedLocation {
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
            description: description.map(str::to_string),
        });
        Ok(LocationSummary {
            id: self.fresh_id(),
            name: name.to_string(),
            description: description.map(str::to_string),
        })
    }

    async fn search_items(
        &self,
        query: Option<&str>,
        _location_ids: Option<&[String]>,
        page_size: i64,
    ) -> RemoteResult<ItemPage> {
        self.record("search_items");
        let items: Vec<ItemSummary> = match query {
            Some(query) => {
                let needle = query.to_lowercase();
                self.items
                    .iter()
                    .filter(|item| item.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            None => self.items.clone(),
        };
        let total = items.len() as i64;
        Ok(ItemPage {
            items,
            page: 1,
            page_size,
            total,
        })
    }

    async fn create_item(
        &self,
        name: &str,
        location_id: &str,
        description: Option<&str>,
    ) -> RemoteResult<ItemSummary> {
        self.record("create_item");
        self.created_items.lock().unwrap().push(CreatedItem {
            name: name.to_string(),
            location_id: location_id.to_string(),
            description: description.map(str::to_string),
        });
        Ok(ItemSummary {
            id: self.fresh_id(),
            name: name.to_string(),
            description: description.map(str::to_string),
            quantity: None,
            location: None,
        })
    }

    async fn update_item_quantity(&self, item_id: &str, quantity: i64) -> RemoteResult<()> {
        self.record("update_item_quantity");
        self.quantity_updates
            .lock()
            .unwrap()
            .push((item_id.to_string(), quantity));
        Ok(())
    }

    async fn location_details(&self, id: &str) -> RemoteResult<LocationDetails> {
        self.record("location_details");
        Ok(LocationDetails {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            parent: None,
        })
    }
}
