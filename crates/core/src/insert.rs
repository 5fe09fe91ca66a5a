use crate::client::InventoryClient;
use crate::error::{InventoryError, Result};
use crate::resolver::{name_matches, LocationResolver, ResolvedLocation};
use crate::types::ItemSummary;

/// Quantity assumed by the backend when an item is created
pub const DEFAULT_QUANTITY: i64 = 1;

const DUPLICATE_CHECK_PAGE_SIZE: i64 = 50;

/// Arguments for the item insertion workflow, prior to validation
#[derive(Debug, Clone, Default)]
pub struct InsertItemRequest {
    pub name: String,
    pub location: String,
    pub quantity: Option<i64>,
    pub description: Option<String>,
}

/// Successful insertion: the created item, where it landed, and the
/// quantity in effect after any follow-up update
#[derive(Debug, Clone)]
pub struct InsertedItem {
    pub item: ItemSummary,
    pub location: ResolvedLocation,
    pub quantity: i64,
}

/// Create a new item under a resolved location.
///
/// Validation (blank fields, non-positive quantity) fails before any remote
/// call. The duplicate-name check runs next — a narrow server-side search —
/// so a rejected name never pays for a tree fetch. Only then is the location
/// reference resolved against a fresh snapshot and the item created; a
/// non-default quantity costs one extra update call because the create
/// endpoint does not accept quantity.
pub async fn insert_item(
    client: &dyn InventoryClient,
    request: &InsertItemRequest,
) -> Result<InsertedItem> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(InventoryError::MissingField { field: "Item name" });
    }

    let reference = request.location.trim();
    if reference.is_empty() {
        return Err(InventoryError::MissingField { field: "Location" });
    }

    let quantity = request.quantity.unwrap_or(DEFAULT_QUANTITY);
    if quantity <= 0 {
        return Err(InventoryError::InvalidQuantity { quantity });
    }

    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());

    let existing = client
        .search_items(Some(name), None, DUPLICATE_CHECK_PAGE_SIZE)
        .await?;
    if let Some(duplicate) = existing
        .items
        .iter()
        .find(|item| name_matches(&item.name, name))
    {
        return Err(InventoryError::DuplicateName {
            name: name.to_string(),
            existing_id: duplicate.id.clone(),
        });
    }

    let tree = client.location_tree(false).await?;
    let resolver = LocationResolver::new(&tree);
    let location = resolver.resolve(reference)?;

    let item = client.create_item(name, &location.id, description).await?;
    if quantity != DEFAULT_QUANTITY {
        client.update_item_quantity(&item.id, quantity).await?;
    }
    log::debug!(
        "inserted item '{}' at {} (quantity {quantity})",
        item.name,
        location.full_path()
    );

    Ok(InsertedItem {
        item,
        location,
        quantity,
    })
}
