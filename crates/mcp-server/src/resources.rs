//! Read-only MCP resources backed by the Homebox inventory.

use homebox_core::{
    location_tree_report, InventoryClient, InventoryError, LocationResolver, RemoteError, TreeItem,
};
use rmcp::model::{
    AnnotateAble, RawResource, ReadResourceResult, Resource, ResourceContents,
};
use rmcp::ErrorData as McpError;
use serde_json::{json, Value};

pub const ITEMS_URI: &str = "resource://homebox/items";
pub const LOCATIONS_URI: &str = "resource://homebox/locations";

const ITEMS_PAGE_SIZE: i64 = 100;
const MIME_JSON: &str = "application/json";

/// The resources this server advertises
pub fn all() -> Vec<Resource> {
    vec![
        resource(
            ITEMS_URI,
            "Homebox items",
            "Homebox items with optional location filter.",
        ),
        resource(
            LOCATIONS_URI,
            "Homebox locations",
            "Hierarchical Homebox locations with item counts.",
        ),
    ]
}

/// Dispatch a resource read by URI. The query string (if any) is stripped
/// before matching so `resource://homebox/items?location=...` still routes
/// to the items resource.
pub async fn read(client: &dyn InventoryClient, uri: &str) -> Result<ReadResourceResult, McpError> {
    let (base, query) = match uri.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (uri, None),
    };

    match base {
        ITEMS_URI => read_items(client, query).await,
        LOCATIONS_URI => read_locations(client).await,
        _ => Err(McpError::invalid_params(
            format!("Unknown resource URI: {uri}"),
            None,
        )),
    }
}

/// Items as JSON, optionally filtered to one location (id or path).
///
/// A filter that resolves to nothing yields an empty listing rather than an
/// error; an ambiguous filter is rejected with every candidate path listed.
/// One tree snapshot serves both the filter resolution and the per-item
/// `locationPath` rendering, fetched lazily at most once.
async fn read_items(
    client: &dyn InventoryClient,
    query: Option<&str>,
) -> Result<ReadResourceResult, McpError> {
    let location_filter = query.and_then(location_param);

    let mut snapshot: Option<Vec<TreeItem>> = None;
    let location_ids: Option<Vec<String>> = match &location_filter {
        Some(reference) => {
            let tree = client.location_tree(false).await.map_err(remote_error)?;
            let outcome = LocationResolver::new(&tree).resolve(reference);
            snapshot = Some(tree);
            match outcome {
                Ok(resolved) => Some(vec![resolved.id]),
                Err(err @ InventoryError::AmbiguousLocation { .. }) => {
                    return Err(McpError::invalid_params(err.to_string(), None));
                }
                Err(_) => return Ok(json_result(ITEMS_URI, items_payload(&[], false))),
            }
        }
        None => None,
    };

    let page = client
        .search_items(None, location_ids.as_deref(), ITEMS_PAGE_SIZE)
        .await
        .map_err(remote_error)?;

    if snapshot.is_none() && page.items.iter().any(|item| item.location.is_some()) {
        snapshot = Some(client.location_tree(false).await.map_err(remote_error)?);
    }
    let resolver = snapshot.as_deref().map(LocationResolver::new);

    let items: Vec<Value> = page
        .items
        .iter()
        .map(|item| {
            let path: Vec<String> = item
                .location
                .as_ref()
                .and_then(|location| {
                    resolver
                        .as_ref()
                        .and_then(|resolver| resolver.find_by_id(&location.id))
                })
                .map(|resolved| resolved.path.clone())
                .unwrap_or_default();
            json!({
                "id": item.id,
                "name": item.name,
                "quantity": item.quantity,
                "description": item.description,
                "locationPath": path,
            })
        })
        .collect();

    Ok(json_result(
        ITEMS_URI,
        items_payload(&items, page.more_available()),
    ))
}

/// The location hierarchy as nested JSON with item counts
async fn read_locations(client: &dyn InventoryClient) -> Result<ReadResourceResult, McpError> {
    let tree = client.location_tree(true).await.map_err(remote_error)?;
    Ok(json_result(LOCATIONS_URI, location_tree_report(&tree)))
}

fn remote_error(err: RemoteError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

fn items_payload(items: &[Value], more_available: bool) -> Value {
    json!({
        "items": items,
        "moreAvailable": more_available,
    })
}

/// First `location` query parameter, percent-decoded, blank treated as absent
fn location_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "location")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}

fn resource(uri: &str, name: &str, description: &str) -> Resource {
    RawResource {
        uri: uri.to_string(),
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        mime_type: Some(MIME_JSON.to_string()),
        size: None,
        icons: None,
    }
    .no_annotation()
}

fn json_result(uri: &str, payload: Value) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(MIME_JSON.to_string()),
            text: payload.to_string(),
            meta: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use homebox_core::{
        ItemPage, ItemSummary, Location, LocationDetails, LocationSummary, RemoteResult,
        TreeItemKind,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct StubClient {
        tree: Vec<TreeItem>,
        page: ItemPage,
        tree_fetches: Mutex<usize>,
    }

    impl StubClient {
        fn new(tree: Vec<TreeItem>, page: ItemPage) -> Self {
            Self {
                tree,
                page,
                tree_fetches: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl InventoryClient for StubClient {
        async fn location_tree(&self, _with_items: bool) -> RemoteResult<Vec<TreeItem>> {
            *self.tree_fetches.lock().unwrap() += 1;
            Ok(self.tree.clone())
        }

        async fn list_locations(
            &self,
            _filter_children: Option<bool>,
        ) -> RemoteResult<Vec<Location>> {
            Ok(Vec::new())
        }

        async fn create_location(
            &self,
            _name: &str,
            _parent_id: Option<&str>,
            _description: Option<&str>,
        ) -> RemoteResult<LocationSummary> {
            unreachable!("resources never create locations")
        }

        async fn search_items(
            &self,
            _query: Option<&str>,
            location_ids: Option<&[String]>,
            _page_size: i64,
        ) -> RemoteResult<ItemPage> {
            let mut page = self.page.clone();
            if let Some(ids) = location_ids {
                page.items.retain(|item| {
                    item.location
                        .as_ref()
                        .is_some_and(|location| ids.contains(&location.id))
                });
                page.total = page.items.len() as i64;
            }
            Ok(page)
        }

        async fn create_item(
            &self,
            _name: &str,
            _location_id: &str,
            _description: Option<&str>,
        ) -> RemoteResult<ItemSummary> {
            unreachable!("resources never create items")
        }

        async fn update_item_quantity(&self, _item_id: &str, _quantity: i64) -> RemoteResult<()> {
            unreachable!("resources never update items")
        }

        async fn location_details(&self, id: &str) -> RemoteResult<LocationDetails> {
            Ok(LocationDetails {
                id: id.to_string(),
                name: id.to_string(),
                description: None,
                parent: None,
            })
        }
    }

    fn location_node(id: &str, name: &str, children: Vec<TreeItem>) -> TreeItem {
        TreeItem {
            id: id.to_string(),
            name: name.to_string(),
            kind: TreeItemKind::Location,
            children,
        }
    }

    fn item_in(id: &str, name: &str, location_id: &str, location_name: &str) -> ItemSummary {
        ItemSummary {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            quantity: Some(1),
            location: Some(LocationSummary {
                id: location_id.to_string(),
                name: location_name.to_string(),
                description: None,
            }),
        }
    }

    fn page_of(items: Vec<ItemSummary>) -> ItemPage {
        let total = items.len() as i64;
        ItemPage {
            items,
            page: 1,
            page_size: 100,
            total,
        }
    }

    fn sample_tree() -> Vec<TreeItem> {
        vec![location_node(
            "loc-home",
            "Home",
            vec![location_node("loc-garage", "Garage", Vec::new())],
        )]
    }

    fn payload_of(result: &ReadResourceResult) -> Value {
        let ResourceContents::TextResourceContents { text, .. } = &result.contents[0] else {
            panic!("expected text contents");
        };
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn items_resource_renders_location_paths() {
        let client = StubClient::new(
            sample_tree(),
            page_of(vec![item_in("item-1", "Hammer", "loc-garage", "Garage")]),
        );

        let result = read(&client, ITEMS_URI).await.unwrap();
        let payload = payload_of(&result);

        assert_eq!(
            payload,
            json!({
                "items": [{
                    "id": "item-1",
                    "name": "Hammer",
                    "quantity": 1,
                    "description": null,
                    "locationPath": ["Home", "Garage"],
                }],
                "moreAvailable": false,
            })
        );
        // One snapshot serves every item's path.
        assert_eq!(*client.tree_fetches.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn items_resource_skips_the_tree_when_no_item_has_a_location() {
        let client = StubClient::new(
            sample_tree(),
            page_of(vec![ItemSummary {
                id: "item-1".to_string(),
                name: "Hammer".to_string(),
                description: None,
                quantity: None,
                location: None,
            }]),
        );

        let result = read(&client, ITEMS_URI).await.unwrap();
        let payload = payload_of(&result);

        assert_eq!(payload["items"][0]["locationPath"], json!([]));
        assert_eq!(*client.tree_fetches.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn items_resource_filters_by_resolved_location() {
        let client = StubClient::new(
            sample_tree(),
            page_of(vec![
                item_in("item-1", "Hammer", "loc-garage", "Garage"),
                item_in("item-2", "Doormat", "loc-home", "Home"),
            ]),
        );

        let uri = format!("{ITEMS_URI}?location=Home%2FGarage");
        let result = read(&client, &uri).await.unwrap();
        let payload = payload_of(&result);

        let names: Vec<&str> = payload["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Hammer"]);
        // Filter resolution and path rendering share one snapshot.
        assert_eq!(*client.tree_fetches.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn unresolvable_location_filter_yields_an_empty_listing() {
        let client = StubClient::new(
            sample_tree(),
            page_of(vec![item_in("item-1", "Hammer", "loc-garage", "Garage")]),
        );

        let uri = format!("{ITEMS_URI}?location=Cellar");
        let result = read(&client, &uri).await.unwrap();
        let payload = payload_of(&result);

        assert_eq!(payload, json!({"items": [], "moreAvailable": false}));
    }

    #[tokio::test]
    async fn ambiguous_location_filter_is_rejected() {
        let tree = vec![
            location_node("h1", "Home", vec![location_node("g1", "Garage", Vec::new())]),
            location_node("h2", "home", vec![location_node("g2", "Garage", Vec::new())]),
        ];
        let client = StubClient::new(tree, page_of(Vec::new()));

        let uri = format!("{ITEMS_URI}?location=home%2Fgarage");
        let err = read(&client, &uri).await.unwrap_err();
        assert!(err.message.contains("ambiguous"));
    }

    #[tokio::test]
    async fn more_available_reflects_the_page_window() {
        let mut page = page_of(vec![item_in("item-1", "Hammer", "loc-garage", "Garage")]);
        page.total = 250;
        let client = StubClient::new(sample_tree(), page);

        let result = read(&client, ITEMS_URI).await.unwrap();
        let payload = payload_of(&result);
        assert_eq!(payload["moreAvailable"], json!(true));
    }

    #[tokio::test]
    async fn locations_resource_nests_counts_by_name() {
        let tree = vec![location_node(
            "loc-home",
            "Home",
            vec![
                location_node("loc-garage", "Garage", Vec::new()),
                TreeItem {
                    id: "item-1".to_string(),
                    name: "Doormat".to_string(),
                    kind: TreeItemKind::Item,
                    children: Vec::new(),
                },
            ],
        )];
        let client = StubClient::new(tree, page_of(Vec::new()));

        let result = read(&client, LOCATIONS_URI).await.unwrap();
        let payload = payload_of(&result);

        assert_eq!(
            payload,
            json!({
                "Home": {
                    "itemCount": 1,
                    "Garage": 0,
                }
            })
        );
    }

    #[tokio::test]
    async fn unknown_uris_are_rejected() {
        let client = StubClient::new(Vec::new(), page_of(Vec::new()));
        let err = read(&client, "resource://homebox/other").await.unwrap_err();
        assert!(err.message.contains("Unknown resource URI"));
    }
}
