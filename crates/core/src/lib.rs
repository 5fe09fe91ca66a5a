mod client;
mod creator;
mod error;
mod insert;
mod report;
mod resolver;
mod types;

pub use client::{InventoryClient, RemoteResult};
pub use creator::{ensure_path, EnsuredPath};
pub use error::{InventoryError, RemoteError, Result};
pub use insert::{insert_item, InsertItemRequest, InsertedItem, DEFAULT_QUANTITY};
pub use report::location_tree_report;
pub use resolver::{path_segments, LocationResolver, ResolvedLocation};
pub use types::{
    ItemPage, ItemSummary, Location, LocationDetails, LocationSummary, TreeItem, TreeItemKind,
};
