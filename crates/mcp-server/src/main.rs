//! Homebox MCP Server
//!
//! Exposes a Homebox inventory to AI agents via the MCP protocol.
//!
//! ## Tools
//!
//! - `list_locations` - List storage locations, optionally with item counts
//! - `create_location` - Create a location from a slash-separated path,
//!   reusing existing parents
//! - `insert_item` - Insert a new item at a location given by id or path
//!
//! ## Resources
//!
//! - `resource://homebox/items` - Items as JSON, filterable by location
//! - `resource://homebox/locations` - Nested location hierarchy with counts
//!
//! ## Usage
//!
//! Requires `HOMEBOX_BASE_URL` and `HOMEBOX_API_TOKEN`. Add to your MCP
//! client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "homebox": {
//!       "command": "homebox-mcp",
//!       "env": {
//!         "HOMEBOX_BASE_URL": "https://homebox.example/api",
//!         "HOMEBOX_API_TOKEN": "..."
//!       }
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

use homebox_client::{HomeboxClient, HomeboxConfig};
use homebox_mcp::HomeboxService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = HomeboxConfig::from_env().context("Homebox connection settings")?;
    log::info!("Starting Homebox MCP server against {}", config.base_url);

    let client = HomeboxClient::new(config);
    let service = HomeboxService::new(Arc::new(client));
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("Homebox MCP server stopped");
    Ok(())
}
