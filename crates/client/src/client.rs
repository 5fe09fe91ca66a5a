use async_trait::async_trait;
use homebox_core::{
    InventoryClient, ItemPage, ItemSummary, Location, LocationDetails, LocationSummary,
    RemoteError, RemoteResult, TreeItem,
};
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;

use crate::config::HomeboxConfig;

/// HTTP implementation of the inventory contract against the Homebox
/// `/v1` REST API. Attaches the bearer token to every request; applies no
/// retry policy of its own.
#[derive(Debug, Clone)]
pub struct HomeboxClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationCreateBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemCreateBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    location_id: &'a str,
}

#[derive(Serialize)]
struct ItemPatchBody {
    quantity: i64,
}

impl HomeboxClient {
    pub fn new(config: HomeboxConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Build over a caller-supplied reqwest client (timeouts, proxies)
    pub fn with_http(http: reqwest::Client, config: HomeboxConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.base_url)
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = self.prepare(request).send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response.text().await.unwrap_or_default();
        let detail = if detail.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("no further detail")
                .to_string()
        } else {
            detail
        };
        log::warn!("Homebox returned HTTP {}: {detail}", status.as_u16());
        Err(RemoteError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

#[async_trait]
impl InventoryClient for HomeboxClient {
    async fn location_tree(&self, with_items: bool) -> RemoteResult<Vec<TreeItem>> {
        let mut request = self.http.get(self.url("/locations/tree"));
        if with_items {
            request = request.query(&[("withItems", "true")]);
        }
        self.send(request).await?.json().await.map_err(transport)
    }

    async fn list_locations(&self, filter_children: Option<bool>) -> RemoteResult<Vec<Location>> {
        let mut request = self.http.get(self.url("/locations"));
        if let Some(filter) = filter_children {
            request = request.query(&[("filterChildren", filter.to_string())]);
        }
        self.send(request).await?.json().await.map_err(transport)
    }

    async fn create_location(
        &self,
        name: &str,
        parent_id: Option<&str>,
        description: Option<&str>,
    ) -> RemoteResult<LocationSummary> {
        let request = self.http.post(self.url("/locations")).json(&LocationCreateBody {
            name,
            description,
            parent_id,
        });
        self.send(request).await?.json().await.map_err(transport)
    }

    async fn search_items(
        &self,
        query: Option<&str>,
        location_ids: Option<&[String]>,
        page_size: i64,
    ) -> RemoteResult<ItemPage> {
        let mut request = self
            .http
            .get(self.url("/items"))
            .query(&[("pageSize", page_size.to_string())]);
        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.query(&[("q", query)]);
        }
        for id in location_ids.unwrap_or_default() {
            request = request.query(&[("locations", id.as_str())]);
        }
        self.send(request).await?.json().await.map_err(transport)
    }

    async fn create_item(
        &self,
        name: &str,
        location_id: &str,
        description: Option<&str>,
    ) -> RemoteResult<ItemSummary> {
        let request = self.http.post(self.url("/items")).json(&ItemCreateBody {
            name,
            description,
            location_id,
        });
        self.send(request).await?.json().await.map_err(transport)
    }

    async fn update_item_quantity(&self, item_id: &str, quantity: i64) -> RemoteResult<()> {
        let request = self
            .http
            .patch(self.url(&format!("/items/{item_id}")))
            .json(&ItemPatchBody { quantity });
        self.send(request).await?;
        Ok(())
    }

    async fn location_details(&self, id: &str) -> RemoteResult<LocationDetails> {
        let request = self.http.get(self.url(&format!("/locations/{id}")));
        self.send(request).await?.json().await.map_err(transport)
    }
}
