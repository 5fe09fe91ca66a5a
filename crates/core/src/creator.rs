use crate::client::InventoryClient;
use crate::error::{InventoryError, Result};
use crate::resolver::{name_matches, path_segments};
use crate::types::{LocationSummary, TreeItem};

/// Outcome of ensuring a location path exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsuredPath {
    /// Locations created by this call, in creation order (empty when the
    /// whole path already existed)
    pub created: Vec<LocationSummary>,
    /// One name per path segment: tree casing where a segment was reused,
    /// the created name where it was new
    pub path: Vec<String>,
}

impl EnsuredPath {
    pub fn full_path(&self) -> String {
        self.path.join(" / ")
    }
}

/// Ensure every segment of a slash-delimited path exists as a location,
/// creating only the missing suffix, parent-first.
///
/// Matching walks the given snapshot: at each segment the current parent's
/// location children are searched case-insensitively, and only a miss
/// triggers a creation call. Once one segment is created, every deeper
/// segment is necessarily missing too (a fresh location has no children),
/// so the remainder of the path is created without further matching. The
/// description applies solely to the final segment, and only when that
/// segment is newly created. Re-running a fully existing path creates
/// nothing.
pub async fn ensure_path(
    client: &dyn InventoryClient,
    tree: &[TreeItem],
    raw_path: &str,
    description: Option<&str>,
) -> Result<EnsuredPath> {
    let segments = path_segments(raw_path);
    if segments.is_empty() {
        return Err(InventoryError::EmptyReference);
    }

    let mut parent_id: Option<String> = None;
    let mut siblings: Vec<&TreeItem> = tree.iter().filter(|node| node.is_location()).collect();
    let mut path = Vec::with_capacity(segments.len());
    let mut created = Vec::new();
    let last = segments.len() - 1;

    for (depth, segment) in segments.iter().enumerate() {
        if let Some(found) = siblings
            .iter()
            .copied()
            .find(|node| name_matches(&node.name, segment))
        {
            parent_id = Some(found.id.clone());
            path.push(found.name.clone());
            siblings = found.location_children().collect();
            continue;
        }

        let summary = client
            .create_location(
                segment,
                parent_id.as_deref(),
                if depth == last { description } else { None },
            )
            .await?;
        log::debug!(
            "created location '{}' under parent {:?}",
            summary.name,
            parent_id
        );
        parent_id = Some(summary.id.clone());
        path.push(summary.name.clone());
        created.push(summary);
        siblings = Vec::new();
    }

    Ok(EnsuredPath { created, path })
}
