//! MCP tools for Homebox
//!
//! Exposes inventory operations (list/create locations, insert items) to AI
//! agents via the MCP protocol. Every failure is returned as a plain-text
//! tool result so it reaches the model instead of aborting the request.

use std::sync::Arc;

use homebox_core::{ensure_path, insert_item, InsertItemRequest, InventoryClient, DEFAULT_QUANTITY};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ListResourcesResult, PaginatedRequestParam,
    ReadResourceRequestParam, ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::schemars;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::resources;

/// Homebox MCP Service
#[derive(Clone)]
pub struct HomeboxService {
    client: Arc<dyn InventoryClient>,
    tool_router: ToolRouter<Self>,
}

impl HomeboxService {
    pub fn new(client: Arc<dyn InventoryClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for HomeboxService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Homebox inventory access. Use 'list_locations' to see storage locations, 'create_location' to add a location (slash-separated paths create nested locations, reusing existing parents), and 'insert_item' to store a new item at a location given by id or path. The 'resource://homebox/items' and 'resource://homebox/locations' resources expose the inventory as JSON.".into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: resources::all(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        resources::read(self.client.as_ref(), &request.uri).await
    }
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLocationsRequest {
    /// Restrict the listing to nested locations
    #[schemars(description = "When true, only return locations that have a parent location")]
    #[serde(default)]
    pub filter_children: Option<bool>,

    /// Append stored item counts
    #[schemars(description = "When true, include the stored item counts next to each location name")]
    #[serde(default)]
    pub include_counts: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    /// Target location path
    #[schemars(
        description = "The location name or a '/' separated path (e.g., 'Home/Basement/Shelf A'). Matching is case-insensitive and preserves spaces."
    )]
    pub path: String,

    /// Description for the final path segment
    #[schemars(description = "Optional description applied to the final location created in the path")]
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertItemRequestParams {
    /// Item name, unique across the inventory
    #[schemars(description = "The unique name of the item to create")]
    pub name: String,

    /// Where to store the item
    #[schemars(
        description = "Location ID or '/' separated absolute path (e.g., 'Home/Kitchen/Shelf A')"
    )]
    pub location: String,

    /// How many to store
    #[schemars(description = "Optional quantity for the item (defaults to 1)")]
    #[serde(default)]
    pub quantity: Option<i64>,

    /// Free-form item description
    #[schemars(description = "Optional description for the item")]
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl HomeboxService {
    /// List locations as newline-separated names
    #[tool(
        description = "List Homebox locations and optionally include the current item counts."
    )]
    pub async fn list_locations(
        &self,
        Parameters(request): Parameters<ListLocationsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let locations = match self.client.list_locations(request.filter_children).await {
            Ok(locations) => locations,
            Err(err) => return Ok(error_text(err.to_string())),
        };
        if locations.is_empty() {
            return Ok(success_text("No locations found."));
        }

        let include_counts = request.include_counts.unwrap_or(false);
        let lines: Vec<String> = locations
            .iter()
            .map(|location| {
                if include_counts {
                    let count = location
                        .item_count
                        .map_or_else(|| "unknown".to_string(), |count| count.to_string());
                    format!("{} (items: {count})", location.name)
                } else {
                    location.name.clone()
                }
            })
            .collect();

        Ok(success_text(lines.join("\n")))
    }

    /// Create a location path, reusing existing parents
    #[tool(
        description = "Create a Homebox location. Provide a single name or a slash-separated path to create nested locations, reusing existing parents when present."
    )]
    pub async fn create_location(
        &self,
        Parameters(request): Parameters<CreateLocationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let raw_path = request.path.trim();
        if raw_path.is_empty() {
            return Ok(error_text("Path is required to create a location."));
        }
        let description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        let tree = match self.client.location_tree(false).await {
            Ok(tree) => tree,
            Err(err) => return Ok(error_text(err.to_string())),
        };

        let ensured = match ensure_path(self.client.as_ref(), &tree, raw_path, description).await {
            Ok(ensured) => ensured,
            Err(err) => return Ok(error_text(err.to_string())),
        };

        let full_path = ensured.full_path();
        let message = if ensured.created.is_empty() {
            let final_name = ensured.path.last().map(String::as_str).unwrap_or(raw_path);
            format!("Location \"{final_name}\" already exists at path: {full_path}.")
        } else {
            let created_names: Vec<&str> = ensured
                .created
                .iter()
                .map(|summary| summary.name.as_str())
                .collect();
            let noun = if created_names.len() == 1 {
                "location"
            } else {
                "locations"
            };
            format!(
                "Created {noun}: {}. Full path: {full_path}",
                created_names.join(" ; ")
            )
        };

        Ok(success_text(message))
    }

    /// Insert a new item under a resolved location
    #[tool(
        description = "Insert a new Homebox item given a unique name, quantity, location, and optional description."
    )]
    pub async fn insert_item(
        &self,
        Parameters(request): Parameters<InsertItemRequestParams>,
    ) -> Result<CallToolResult, McpError> {
        let workflow_request = InsertItemRequest {
            name: request.name,
            location: request.location,
            quantity: request.quantity,
            description: request.description,
        };

        let inserted = match insert_item(self.client.as_ref(), &workflow_request).await {
            Ok(inserted) => inserted,
            Err(err) => return Ok(error_text(err.to_string())),
        };

        let mut message = format!(
            "Created item \"{}\" at location: {}.",
            inserted.item.name,
            inserted.location.full_path()
        );
        if inserted.quantity != DEFAULT_QUANTITY {
            message.push_str(&format!(" Quantity set to {}.", inserted.quantity));
        } else {
            message.push_str(&format!(" Quantity defaults to {DEFAULT_QUANTITY}."));
        }

        Ok(success_text(message))
    }
}

fn success_text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

fn error_text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}
