use async_trait::async_trait;

use crate::error::RemoteError;
use crate::types::{ItemPage, ItemSummary, Location, LocationDetails, LocationSummary, TreeItem};

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Remote inventory operations the workflows depend on.
///
/// Implemented over HTTP by `homebox-client`; tests substitute in-memory
/// fakes. All calls are sequential within one workflow and none are retried.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetch the full location tree, optionally including item leaves
    async fn location_tree(&self, with_items: bool) -> RemoteResult<Vec<TreeItem>>;

    /// Flat location listing; `filter_children` restricts to locations that
    /// have a parent
    async fn list_locations(&self, filter_children: Option<bool>) -> RemoteResult<Vec<Location>>;

    async fn create_location(
        &self,
        name: &str,
        parent_id: Option<&str>,
        description: Option<&str>,
    ) -> RemoteResult<LocationSummary>;

    /// Server-side item search. `query` narrows by name; `location_ids`
    /// filters to items stored under the given locations.
    async fn search_items(
        &self,
        query: Option<&str>,
        location_ids: Option<&[String]>,
        page_size: i64,
    ) -> RemoteResult<ItemPage>;

    async fn create_item(
        &self,
        name: &str,
        location_id: &str,
        description: Option<&str>,
    ) -> RemoteResult<ItemSummary>;

    async fn update_item_quantity(&self, item_id: &str, quantity: i64) -> RemoteResult<()>;

    /// Detail for one location, including its parent when nested
    async fn location_details(&self, id: &str) -> RemoteResult<LocationDetails>;
}
